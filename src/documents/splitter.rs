//! Header-based section splitting.
//!
//! Partitions one document's raw text on markdown header lines and
//! extracts a document-level title. Header level is ignored when
//! deciding boundaries: a `###` starts a sibling section, not a nested
//! one.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use super::cleaner;
use super::types::{Document, Section};

/// Name given to the span before the first header.
pub const PREAMBLE_SECTION: &str = "Introduction";

/// Header line of any level.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+[ \t]+\S.*$").unwrap());

/// First level-1 header, used as the document title.
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+\S.*$").unwrap());

/// Split a document into its page title and ordered sections.
///
/// The title is the first level-1 header found anywhere in the
/// document, falling back to the file name. The title line itself is
/// the document's name, not a section boundary; text between it and
/// the next header lands in the `"Introduction"` section. A header
/// with no body before the next header yields an empty body; that is
/// legal here and resolved after cleaning. Whitespace-only documents
/// yield no sections.
pub fn split(document: &Document) -> (String, Vec<Section>) {
    let raw = document.raw_text.as_str();
    if raw.trim().is_empty() {
        return (document.file_name.clone(), Vec::new());
    }

    let title_match = TITLE_RE.find(raw);
    let page_title = title_match
        .map(|m| m.as_str().trim_start_matches('#').trim().to_string())
        .unwrap_or_else(|| document.file_name.clone());

    let text: Cow<'_, str> = match title_match {
        Some(m) => Cow::Owned(format!("{}{}", &raw[..m.start()], &raw[m.end()..])),
        None => Cow::Borrowed(raw),
    };

    let headers: Vec<regex::Match> = HEADER_RE.find_iter(&text).collect();
    let mut sections = Vec::new();

    let preamble_end = headers.first().map_or(text.len(), |m| m.start());
    let preamble = text[..preamble_end].trim();
    if !preamble.is_empty() {
        sections.push(Section {
            file_name: document.file_name.clone(),
            section_name: PREAMBLE_SECTION.to_string(),
            page_title: page_title.clone(),
            order_index: 0,
            body_text: preamble.to_string(),
        });
    }

    for (i, header) in headers.iter().enumerate() {
        let body_end = headers.get(i + 1).map_or(text.len(), |next| next.start());
        let body = text[header.end()..body_end].trim();
        let section_name = cleaner::clean(header.as_str().trim_start_matches('#').trim());
        sections.push(Section {
            file_name: document.file_name.clone(),
            section_name,
            page_title: page_title.clone(),
            order_index: sections.len(),
            body_text: body.to_string(),
        });
    }

    (page_title, sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new("notes", text)
    }

    #[test]
    fn test_title_and_sections() {
        let (title, sections) = split(&doc("# Title\n\nIntro text.\n\n## Sec A\n\nShort body."));

        assert_eq!(title, "Title");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].section_name, "Introduction");
        assert_eq!(sections[0].body_text, "Intro text.");
        assert_eq!(sections[1].section_name, "Sec A");
        assert_eq!(sections[1].body_text, "Short body.");
    }

    #[test]
    fn test_no_headers_falls_back_to_file_name() {
        let (title, sections) = split(&doc("Just a body, no headers."));

        assert_eq!(title, "notes");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_name, "Introduction");
        assert_eq!(sections[0].body_text, "Just a body, no headers.");
    }

    #[test]
    fn test_title_found_mid_document() {
        let (title, sections) = split(&doc("preface\n\n## First\n\nbody\n\n# Real Title\n\nmore"));

        assert_eq!(title, "Real Title");
        assert_eq!(sections[0].section_name, "Introduction");
        assert_eq!(sections[0].body_text, "preface");
        assert!(sections.iter().all(|s| s.page_title == "Real Title"));
    }

    #[test]
    fn test_second_level_one_header_is_a_section() {
        let (title, sections) = split(&doc("# Title\n\nintro\n\n# Appendix\n\nextra"));

        assert_eq!(title, "Title");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].section_name, "Introduction");
        assert_eq!(sections[1].section_name, "Appendix");
        assert_eq!(sections[1].body_text, "extra");
    }

    #[test]
    fn test_whitespace_document_yields_nothing() {
        let (_, sections) = split(&doc("   \n\n  "));
        assert!(sections.is_empty());
    }

    #[test]
    fn test_header_with_no_body_is_kept_with_empty_body() {
        let (_, sections) = split(&doc("## Empty\n## Full\n\ncontent"));

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].section_name, "Empty");
        assert_eq!(sections[0].body_text, "");
        assert_eq!(sections[1].body_text, "content");
    }

    #[test]
    fn test_flat_section_model() {
        // A level-3 header is a sibling boundary, same as level-2.
        let (_, sections) = split(&doc("## Parent\n\na\n\n### Child\n\nb"));

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].section_name, "Parent");
        assert_eq!(sections[1].section_name, "Child");
        assert_eq!(sections[1].body_text, "b");
    }

    #[test]
    fn test_section_names_are_markdown_cleaned() {
        let (_, sections) = split(&doc("## **Quick** `Start`\n\nbody"));
        assert_eq!(sections[0].section_name, "Quick Start");
    }

    #[test]
    fn test_order_index_is_contiguous() {
        let (_, sections) = split(&doc("# T\n\nintro\n\n## A\n\na\n\n## B\n\nb"));
        let indices: Vec<usize> = sections.iter().map(|s| s.order_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
