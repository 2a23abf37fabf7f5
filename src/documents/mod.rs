// src/documents/mod.rs
//! Image and file blocks under a documents heading, viewed as documents.

use crate::model::{Block, Document, DocumentKind};
use crate::sections::{HeadingQuery, PageOutline, Section};
use crate::types::DocumentSection;
use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::percent_decode_str;
use url::Url;

/// Characters of the block id used in synthesized names.
const SYNTHESIZED_NAME_ID_CHARS: usize = 8;

/// The section holding documents of `section`. Matching ignores case.
pub fn document_section<'a>(
    outline: &'a PageOutline,
    section: DocumentSection,
) -> Option<Section<'a>> {
    outline.find(&HeadingQuery::case_insensitive(section.heading()))
}

/// Documents under the heading of `section`, in page order. A page
/// without that heading has no documents.
pub fn list_documents(outline: &PageOutline, section: DocumentSection) -> Vec<Document> {
    match document_section(outline, section) {
        Some(found) => found
            .items()
            .iter()
            .filter_map(|block| document_from_block(block, None))
            .collect(),
        None => {
            log::debug!("No \"{}\" heading on page", section.heading());
            Vec::new()
        }
    }
}

/// Document view of an image or file block; `None` for other kinds.
///
/// `file_name` takes precedence over anything the block carries. Uploads
/// pass the name the client sent since Notion may not echo it back.
pub fn document_from_block(block: &Block, file_name: Option<&str>) -> Option<Document> {
    let (kind, attachment) = match block {
        Block::Image(attachment) => (DocumentKind::Image, attachment),
        Block::File(attachment) => (DocumentKind::File, attachment),
        _ => return None,
    };

    let url = attachment.source.url().unwrap_or_default();
    let file_name = file_name
        .or(attachment.name.as_deref())
        .or(attachment.source.name())
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .or_else(|| file_name_from_url(url))
        .unwrap_or_else(|| {
            format!(
                "{}_{}",
                kind.display_prefix(),
                block.id().tail(SYNTHESIZED_NAME_ID_CHARS)
            )
        });

    Some(Document {
        id: block.id().clone(),
        kind,
        file_name,
        file_url: url.to_string(),
        created_time: block.common().created_time.as_ref().map(timestamp),
        last_edited_time: block.common().last_edited_time.as_ref().map(timestamp),
    })
}

/// Last path segment of `url`, percent-decoded, when it looks like a
/// file name (contains a `.`).
pub fn file_name_from_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let segment = match Url::parse(url) {
        Ok(parsed) => parsed.path_segments()?.last()?.to_string(),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            path.rsplit('/').next().unwrap_or_default().to_string()
        }
    };

    let decoded = percent_decode_str(&segment)
        .decode_utf8()
        .map(|name| name.into_owned())
        .unwrap_or(segment);

    decoded.contains('.').then_some(decoded)
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttachmentBlock, BlockCommon, FileSource};
    use crate::types::{BlockId, FileUploadId};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn id(n: u8) -> BlockId {
        BlockId::parse(&format!("{:032x}", n)).unwrap()
    }

    fn image(n: u8, source: FileSource) -> Block {
        Block::Image(AttachmentBlock {
            common: BlockCommon::new(id(n)),
            source,
            caption: vec![],
            name: None,
        })
    }

    fn file(n: u8, source: FileSource, name: Option<&str>) -> Block {
        Block::File(AttachmentBlock {
            common: BlockCommon::new(id(n)),
            source,
            caption: vec![],
            name: name.map(str::to_string),
        })
    }

    fn hosted(url: &str) -> FileSource {
        FileSource::Hosted {
            url: url.to_string(),
            name: None,
        }
    }

    #[test]
    fn url_tail_is_decoded_and_query_stripped() {
        assert_eq!(
            file_name_from_url("https://s3.example.com/a/b/Site%20Plan.pdf?X-Amz-Signature=abc"),
            Some("Site Plan.pdf".to_string())
        );
        assert_eq!(file_name_from_url("https://example.com/a/b/download"), None);
        assert_eq!(file_name_from_url("files/photo.jpg?v=2"), Some("photo.jpg".to_string()));
        assert_eq!(file_name_from_url(""), None);
    }

    #[test]
    fn file_name_fallback_order() {
        let named = file(
            1,
            FileSource::External {
                url: "https://example.com/x.pdf".to_string(),
                name: Some("contract.pdf".to_string()),
            },
            Some("Signed contract.pdf"),
        );
        assert_eq!(
            document_from_block(&named, None).unwrap().file_name,
            "Signed contract.pdf"
        );
        assert_eq!(
            document_from_block(&named, Some("upload.pdf")).unwrap().file_name,
            "upload.pdf"
        );

        let external = file(
            2,
            FileSource::External {
                url: "https://example.com/x.pdf".to_string(),
                name: Some("contract.pdf".to_string()),
            },
            None,
        );
        assert_eq!(document_from_block(&external, None).unwrap().file_name, "contract.pdf");

        let from_url = image(3, hosted("https://files.example.com/roof.png?sig=1"));
        assert_eq!(document_from_block(&from_url, None).unwrap().file_name, "roof.png");
    }

    #[test]
    fn synthesized_names_use_block_id_tail() {
        let id = BlockId::parse("550e8400e29b41d4a716446655440abc").unwrap();
        let block = Block::File(AttachmentBlock {
            common: BlockCommon::new(id),
            source: FileSource::Upload {
                id: FileUploadId::parse("650e8400e29b41d4a716446655440000").unwrap(),
                url: None,
                name: None,
            },
            caption: vec![],
            name: None,
        });
        let document = document_from_block(&block, None).unwrap();
        assert_eq!(document.file_name, "Document_55440abc");
        assert_eq!(document.file_url, "");
        assert_eq!(document.kind, DocumentKind::File);

        let picture = image(9, hosted("https://example.com/render"));
        assert_eq!(
            document_from_block(&picture, None).unwrap().file_name,
            "Image_00000009"
        );
    }

    #[test]
    fn timestamps_are_rfc3339_with_millis() {
        let created = Utc.with_ymd_and_hms(2025, 1, 5, 15, 45, 0).unwrap();
        let block = Block::Image(AttachmentBlock {
            common: BlockCommon::new(id(4)).with_times(created, created),
            source: hosted("https://example.com/a.png"),
            caption: vec![],
            name: None,
        });
        let document = document_from_block(&block, None).unwrap();
        assert_eq!(document.created_time.as_deref(), Some("2025-01-05T15:45:00.000Z"));
        assert_eq!(document.last_edited_time, document.created_time);
    }

    #[test]
    fn lists_only_attachments_in_the_matching_section() {
        let outline = PageOutline::from_blocks(vec![
            image(1, hosted("https://example.com/stray.png")),
            Block::heading(2, id(2), "SALES DOCUMENTS"),
            image(3, hosted("https://example.com/a.png")),
            Block::paragraph(id(4), "caption"),
            file(5, hosted("https://example.com/b.pdf"), None),
            Block::heading(3, id(6), "Other"),
            image(7, hosted("https://example.com/c.png")),
        ]);
        let names: Vec<_> = list_documents(&outline, DocumentSection::Sales)
            .into_iter()
            .map(|d| d.file_name)
            .collect();
        assert_eq!(names, vec!["a.png", "b.pdf"]);
    }

    #[test]
    fn missing_heading_means_no_documents() {
        let outline = PageOutline::from_blocks(vec![image(1, hosted("https://example.com/a.png"))]);
        assert!(list_documents(&outline, DocumentSection::AppointmentOwner).is_empty());
        assert!(document_from_block(&Block::paragraph(id(2), "x"), None).is_none());
    }
}
