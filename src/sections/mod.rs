// src/sections/mod.rs
//! Heading-relative scanning of a page's block sequence.
//!
//! A page body is a flat list of blocks. A section is a `heading_2` whose
//! text contains a known title, plus every block after it up to the next
//! heading of any level. The functions here are the only place that
//! reasons about positions; everything else goes through `PageOutline`.

mod outline;

pub use outline::{PageOutline, Section};

use crate::model::Block;
use crate::types::BlockId;

/// How heading text is compared against a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

/// A heading to look for: a `heading_2` whose text contains `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingQuery<'a> {
    pub text: &'a str,
    pub case: CaseSensitivity,
}

impl<'a> HeadingQuery<'a> {
    pub fn case_sensitive(text: &'a str) -> Self {
        Self {
            text,
            case: CaseSensitivity::Sensitive,
        }
    }

    pub fn case_insensitive(text: &'a str) -> Self {
        Self {
            text,
            case: CaseSensitivity::Insensitive,
        }
    }

    pub fn matches(&self, block: &Block) -> bool {
        let Block::Heading2(heading) = block else {
            return false;
        };
        let heading_text = heading.content.plain_text();
        match self.case {
            CaseSensitivity::Sensitive => heading_text.contains(self.text),
            CaseSensitivity::Insensitive => heading_text
                .to_lowercase()
                .contains(&self.text.to_lowercase()),
        }
    }
}

/// Index of the first heading matching `query`.
pub fn find_heading(blocks: &[Block], query: &HeadingQuery) -> Option<usize> {
    blocks.iter().position(|block| query.matches(block))
}

/// Exclusive end of the section opened by the heading at `heading_index`:
/// the index of the next heading of any level, or `blocks.len()`.
pub fn find_section_end(blocks: &[Block], heading_index: usize) -> usize {
    let start = (heading_index + 1).min(blocks.len());
    blocks[start..]
        .iter()
        .position(Block::is_heading)
        .map_or(blocks.len(), |offset| start + offset)
}

/// Block to insert new section content after: the last block in the
/// section satisfying `qualifies`, else the heading itself.
pub fn insertion_anchor<'a>(
    blocks: &'a [Block],
    heading_index: usize,
    qualifies: impl Fn(&Block) -> bool,
) -> &'a BlockId {
    let end = find_section_end(blocks, heading_index);
    blocks[heading_index + 1..end]
        .iter()
        .rev()
        .find(|block| qualifies(block))
        .unwrap_or(&blocks[heading_index])
        .id()
}
