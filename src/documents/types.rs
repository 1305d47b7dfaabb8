//! Core types for markdown ingestion and section retrieval.

use serde::{Deserialize, Serialize};

/// Provenance label stamped on every chunk record.
pub const SOURCE_LABEL: &str = "Markdown File";

/// A raw markdown document as read from disk.
///
/// One per input file; discarded once its chunks are assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name without the `.md` extension.
    pub file_name: String,

    /// Unprocessed markdown text.
    pub raw_text: String,
}

impl Document {
    /// Create a new document.
    pub fn new(file_name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// A header-delimited span of one document, before cleaning and chunking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// File the section came from.
    pub file_name: String,

    /// Header text with hash markers stripped and markdown removed.
    /// The span before the first header is named `"Introduction"`.
    pub section_name: String,

    /// First level-1 header of the document, or the file name if none.
    pub page_title: String,

    /// Position of this section within its document.
    pub order_index: usize,

    /// Raw body text between this header and the next. May be empty
    /// here; emptiness is resolved after cleaning.
    pub body_text: String,
}

/// Composite key identifying one section across the whole corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionKey {
    pub file_name: String,
    pub section_name: String,
}

impl SectionKey {
    pub fn new(file_name: impl Into<String>, section_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            section_name: section_name.into(),
        }
    }
}

/// A bounded-size fragment of a section, the unit embedded and searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// File the chunk came from.
    pub file_name: String,

    /// Section the chunk belongs to.
    pub section_name: String,

    /// Title of the source document.
    pub page_title: String,

    /// 0-based position within the parent section. Contiguous per
    /// section; the sort key for reconstruction.
    pub chunk_index: usize,

    /// Provenance label, always [`SOURCE_LABEL`] for this pipeline.
    pub source: String,

    /// Cleaned chunk text handed to the embedding model.
    pub text: String,
}

impl ChunkRecord {
    /// The `(file_name, section_name)` pair this chunk belongs to.
    pub fn section_key(&self) -> SectionKey {
        SectionKey::new(self.file_name.clone(), self.section_name.clone())
    }

    /// Human-readable section identifier, `"{file_name} - {section_name}"`.
    pub fn section_id(&self) -> String {
        format!("{} - {}", self.file_name, self.section_name)
    }

    /// This chunk's metadata without the text payload.
    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            file_name: self.file_name.clone(),
            section_name: self.section_name.clone(),
            page_title: self.page_title.clone(),
            chunk_index: self.chunk_index,
            source: self.source.clone(),
        }
    }

    /// Get the length of the chunk text in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Chunk metadata carried by reconstruction results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub file_name: String,
    pub section_name: String,
    pub page_title: String,
    pub chunk_index: usize,
    pub source: String,
}

/// A reconstructed section returned for a query, keyed externally by
/// the section id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionResult {
    /// All of the section's chunk texts joined in index order.
    pub content: String,

    /// Metadata of the section's first chunk.
    pub metadata: ChunkMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ChunkRecord {
        ChunkRecord {
            file_name: "guide".to_string(),
            section_name: "Setup".to_string(),
            page_title: "User Guide".to_string(),
            chunk_index: 2,
            source: SOURCE_LABEL.to_string(),
            text: "Install the toolchain.".to_string(),
        }
    }

    #[test]
    fn test_section_id_format() {
        assert_eq!(sample_record().section_id(), "guide - Setup");
    }

    #[test]
    fn test_section_key_matches_record_fields() {
        let record = sample_record();
        assert_eq!(record.section_key(), SectionKey::new("guide", "Setup"));
    }

    #[test]
    fn test_metadata_drops_text_only() {
        let record = sample_record();
        let metadata = record.metadata();
        assert_eq!(metadata.file_name, record.file_name);
        assert_eq!(metadata.section_name, record.section_name);
        assert_eq!(metadata.page_title, record.page_title);
        assert_eq!(metadata.chunk_index, record.chunk_index);
        assert_eq!(metadata.source, record.source);
    }
}
