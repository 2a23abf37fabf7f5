// src/comments/mod.rs
//! Comments stored as paragraph blocks.
//!
//! A comment is a paragraph whose text follows one of two shapes:
//!
//! - tagged: `[SALES COMMENT] **[Jan 5, 2025, 3:45 PM]** body`
//! - legacy: `**[Jan 5, 2025, 3:45 PM]** body`
//!
//! Tagged comments belong to the section named by their tag wherever they
//! sit on the page. Legacy comments belong to a section only when they sit
//! under its heading.

use crate::constants::COMMENT_TIMESTAMP_FORMAT;
use crate::model::{Block, Comment};
use crate::sections::{HeadingQuery, PageOutline, Section};
use crate::types::{BlockId, CommentSection};
use chrono::{DateTime, Local, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;

lazy_static! {
    static ref TAGGED_COMMENT: Regex =
        Regex::new(r"^\[([^\]]*)\]\s*\*\*\[(.*?)\]\*\*\s*((?s).*)$")
            .expect("Failed to compile tagged comment regex - this is a bug in the code");
    static ref LEGACY_COMMENT: Regex = Regex::new(r"^\*\*\[(.*?)\]\*\*\s*((?s).*)$")
        .expect("Failed to compile legacy comment regex - this is a bug in the code");
}

/// Which shape a comment was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentMarker {
    Tagged(CommentSection),
    Legacy,
}

/// A paragraph text recognized as a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedComment {
    pub marker: CommentMarker,
    pub timestamp: String,
    pub body: String,
}

/// Recognizes comment text. Blank text, unknown tags and anything else
/// that is not comment-shaped yield `None`. The body is trimmed.
pub fn parse(text: &str) -> Option<ParsedComment> {
    if text.trim().is_empty() {
        return None;
    }

    if let Some(captures) = TAGGED_COMMENT.captures(text) {
        let tag = format!("[{}]", &captures[1]);
        let section = CommentSection::ALL
            .into_iter()
            .find(|section| section.tag() == tag)?;
        return Some(ParsedComment {
            marker: CommentMarker::Tagged(section),
            timestamp: captures[2].to_string(),
            body: captures[3].trim().to_string(),
        });
    }

    LEGACY_COMMENT.captures(text).map(|captures| ParsedComment {
        marker: CommentMarker::Legacy,
        timestamp: captures[1].to_string(),
        body: captures[2].trim().to_string(),
    })
}

/// Paragraph text for a new comment in `section`.
pub fn format(section: CommentSection, timestamp: &str, body: &str) -> String {
    format!("{} **[{}]**\n{}", section.tag(), timestamp, body.trim())
}

/// Renders a comment timestamp, e.g. `Jan 5, 2025, 3:45 PM`.
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(COMMENT_TIMESTAMP_FORMAT).to_string()
}

/// Timestamp for a comment written now, in the server's time zone.
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}

fn parse_block(block: &Block) -> Option<ParsedComment> {
    match block {
        Block::Paragraph(paragraph) => parse(&paragraph.content.plain_text()),
        _ => None,
    }
}

/// Whether a block is a paragraph in either comment shape.
pub fn is_comment_block(block: &Block) -> bool {
    parse_block(block).is_some()
}

fn to_comment(block_id: &BlockId, parsed: ParsedComment) -> Comment {
    Comment {
        id: block_id.to_dashed(),
        block_id: block_id.clone(),
        timestamp: parsed.timestamp,
        text: parsed.body,
    }
}

/// The section a comment write lands in.
pub fn comment_section<'a>(outline: &'a PageOutline, section: CommentSection) -> Option<Section<'a>> {
    outline.find(&HeadingQuery::case_sensitive(section.heading()))
}

/// Comments of one section, in page order.
pub fn comments_for_section(outline: &PageOutline, section: CommentSection) -> Vec<Comment> {
    let legacy_scope = comment_section(outline, section);

    outline
        .blocks()
        .iter()
        .filter_map(|block| {
            let parsed = parse_block(block)?;
            let belongs = match parsed.marker {
                CommentMarker::Tagged(tag) => tag == section,
                CommentMarker::Legacy => legacy_scope
                    .as_ref()
                    .is_some_and(|scope| scope.contains(block.id())),
            };
            belongs.then(|| to_comment(block.id(), parsed))
        })
        .collect()
}

/// Comments of `filter`, or of every section (sales first) when `None`.
pub fn list_comments(outline: &PageOutline, filter: Option<CommentSection>) -> Vec<Comment> {
    match filter {
        Some(section) => comments_for_section(outline, section),
        None => CommentSection::ALL
            .into_iter()
            .flat_map(|section| comments_for_section(outline, section))
            .collect(),
    }
}

/// Comment built from the block a write created.
pub fn created_comment(block_id: &BlockId, timestamp: &str, body: &str) -> Comment {
    Comment {
        id: block_id.to_dashed(),
        block_id: block_id.clone(),
        timestamp: timestamp.to_string(),
        text: body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use pretty_assertions::assert_eq;

    fn id(n: u8) -> BlockId {
        BlockId::parse(&format!("{:032x}", n)).unwrap()
    }

    #[test]
    fn format_then_parse_round_trips() {
        let text = format(CommentSection::Sales, "Jan 5, 2025, 3:45 PM", "Called customer");
        assert_eq!(text, "[SALES COMMENT] **[Jan 5, 2025, 3:45 PM]**\nCalled customer");
        assert_eq!(
            parse(&text),
            Some(ParsedComment {
                marker: CommentMarker::Tagged(CommentSection::Sales),
                timestamp: "Jan 5, 2025, 3:45 PM".to_string(),
                body: "Called customer".to_string(),
            })
        );
    }

    #[test]
    fn multi_line_bodies_survive() {
        let text = format(CommentSection::Appointment, "ts", "line one\nline two\n");
        let parsed = parse(&text).unwrap();
        assert_eq!(parsed.body, "line one\nline two");
        assert_eq!(parsed.marker, CommentMarker::Tagged(CommentSection::Appointment));
    }

    #[test]
    fn legacy_shape_is_recognized() {
        let parsed = parse("**[Dec 1, 2024, 9:05 AM]**\n  Left voicemail  ").unwrap();
        assert_eq!(parsed.marker, CommentMarker::Legacy);
        assert_eq!(parsed.timestamp, "Dec 1, 2024, 9:05 AM");
        assert_eq!(parsed.body, "Left voicemail");
    }

    #[test]
    fn non_comments_are_rejected() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   \n "), None);
        assert_eq!(parse("Just a note"), None);
        assert_eq!(parse("[BILLING COMMENT] **[ts]** body"), None);
    }

    #[test]
    fn timestamps_use_twelve_hour_clock() {
        let utc = Utc.with_ymd_and_hms(2025, 1, 5, 15, 45, 0).unwrap();
        assert_eq!(format_timestamp(&utc), "Jan 5, 2025, 3:45 PM");

        let offset = FixedOffset::east_opt(0).unwrap();
        let morning = offset.with_ymd_and_hms(2024, 12, 11, 0, 7, 0).unwrap();
        assert_eq!(format_timestamp(&morning), "Dec 11, 2024, 12:07 AM");
    }

    fn outline() -> PageOutline {
        PageOutline::from_blocks(vec![
            Block::paragraph(id(1), "[APPOINTMENT COMMENT] **[t0]** stray appointment note"),
            Block::heading(2, id(2), "Sales Comments"),
            Block::paragraph(id(3), "**[t1]** legacy sales"),
            Block::paragraph(id(4), "[SALES COMMENT] **[t2]**\nCalled customer"),
            Block::paragraph(id(5), ""),
            Block::heading(2, id(6), "Appointment Comments"),
            Block::paragraph(id(7), "**[t3]** legacy appointment"),
            Block::paragraph(id(8), "[SALES COMMENT] **[t4]** misplaced sales"),
        ])
    }

    #[test]
    fn section_listing_mixes_tagged_and_scoped_legacy() {
        let outline = outline();
        let sales: Vec<_> = comments_for_section(&outline, CommentSection::Sales)
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(sales, vec!["legacy sales", "Called customer", "misplaced sales"]);

        let appointment: Vec<_> = comments_for_section(&outline, CommentSection::Appointment)
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(appointment, vec!["stray appointment note", "legacy appointment"]);
    }

    #[test]
    fn unfiltered_listing_puts_sales_first() {
        let all = list_comments(&outline(), None);
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].text, "legacy sales");
        assert_eq!(all[3].text, "stray appointment note");
    }

    #[test]
    fn comment_ids_are_block_ids() {
        let comments = list_comments(&outline(), Some(CommentSection::Sales));
        assert_eq!(comments[1].id, id(4).to_dashed());
        assert_eq!(comments[1].block_id, id(4));
        assert_eq!(list_comments(&outline(), Some(CommentSection::Sales)), comments);
    }

    #[test]
    fn new_comments_go_after_the_last_comment() {
        let outline = outline();
        let sales = comment_section(&outline, CommentSection::Sales).unwrap();
        assert_eq!(sales.anchor(is_comment_block), &id(4));

        let empty = PageOutline::from_blocks(vec![Block::heading(2, id(9), "Sales Comments")]);
        let section = comment_section(&empty, CommentSection::Sales).unwrap();
        assert_eq!(section.anchor(is_comment_block), &id(9));
    }

    #[test]
    fn heading_lookup_is_case_sensitive() {
        let outline = PageOutline::from_blocks(vec![Block::heading(2, id(1), "sales comments")]);
        assert!(comment_section(&outline, CommentSection::Sales).is_none());
    }
}
