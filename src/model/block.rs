use super::blocks::*;
use super::common::BlockCommon;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// The block kinds a customer page is made of.
///
/// Everything else Notion can return is kept as `Unsupported` so that
/// position in the sequence is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    Image(AttachmentBlock),
    File(AttachmentBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get block type name
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::Image(_) => "image",
            Block::File(_) => "file",
            Block::Unsupported(b) => &b.block_type,
        }
    }

    /// Heading level 1-3, or `None` for non-heading blocks.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading1(_) => Some(1),
            Block::Heading2(_) => Some(2),
            Block::Heading3(_) => Some(3),
            _ => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// Concatenated text of paragraphs and headings; `None` for other kinds.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Block::Paragraph(b) | Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                Some(b.content.plain_text())
            }
            _ => None,
        }
    }

    /// The image or file payload, if this block carries one.
    pub fn attachment(&self) -> Option<&AttachmentBlock> {
        match self {
            Block::Image(b) | Block::File(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_attachment(&self) -> bool {
        self.attachment().is_some()
    }

    /// Convenience constructors, mostly for building fixtures.
    pub fn paragraph(id: BlockId, text: &str) -> Self {
        Block::Paragraph(TextBlock {
            common: BlockCommon::new(id),
            content: TextBlockContent::from_plain(text),
        })
    }

    pub fn heading(level: u8, id: BlockId, text: &str) -> Self {
        let block = TextBlock {
            common: BlockCommon::new(id),
            content: TextBlockContent::from_plain(text),
        };
        match level {
            1 => Block::Heading1(block),
            3 => Block::Heading3(block),
            _ => Block::Heading2(block),
        }
    }
}
