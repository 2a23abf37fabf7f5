// src/sections/outline.rs
//! Section tree rebuilt from a flat block list.

use super::{find_heading, find_section_end, insertion_anchor, HeadingQuery};
use crate::model::Block;
use crate::types::BlockId;

/// A page body viewed as heading-led sections.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutline {
    blocks: Vec<Block>,
    /// Heading index and exclusive end of each section, in page order.
    spans: Vec<(usize, usize)>,
}

/// A heading and the blocks it owns.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    blocks: &'a [Block],
    heading: usize,
    end: usize,
}

impl PageOutline {
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut spans = Vec::new();
        let mut index = blocks.iter().position(Block::is_heading);
        while let Some(heading) = index {
            let end = find_section_end(&blocks, heading);
            spans.push((heading, end));
            index = (end < blocks.len()).then_some(end);
        }
        Self { blocks, spans }
    }

    /// All blocks in page order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn sections(&self) -> impl Iterator<Item = Section<'_>> {
        self.spans.iter().map(|&(heading, end)| Section {
            blocks: &self.blocks,
            heading,
            end,
        })
    }

    /// First section whose heading matches `query`.
    pub fn find(&self, query: &HeadingQuery) -> Option<Section<'_>> {
        let heading = find_heading(&self.blocks, query)?;
        self.sections().find(|section| section.heading == heading)
    }
}

impl<'a> Section<'a> {
    pub fn heading(&self) -> &'a Block {
        &self.blocks[self.heading]
    }

    pub fn title(&self) -> String {
        self.heading().plain_text().unwrap_or_default()
    }

    /// Blocks owned by the heading; never contains a heading.
    pub fn items(&self) -> &'a [Block] {
        &self.blocks[self.heading + 1..self.end]
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.items().iter().any(|block| block.id() == id)
    }

    /// Where new content goes: after the last item satisfying `qualifies`,
    /// else right after the heading.
    pub fn anchor(&self, qualifies: impl Fn(&Block) -> bool) -> &'a BlockId {
        insertion_anchor(self.blocks, self.heading, qualifies)
    }
}
