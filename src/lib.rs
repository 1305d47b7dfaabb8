//! Section-aware semantic retrieval for markdown document collections.
//!
//! mdrecall ingests a directory of markdown files, splits each document
//! into header-delimited sections, cleans and chunks the section
//! bodies, and embeds the chunks. Queries are answered at chunk
//! granularity for embedding precision, then widened back to full
//! sections so results stay readable and complete.

pub mod config;
pub mod documents;
pub mod logging;
pub mod retrieve;
pub mod semantic;

pub use config::Settings;
pub use documents::{
    ChunkMetadata, ChunkRecord, Document, IngestError, IngestResult, Section, SectionKey,
    SectionResult, TextChunker, assemble, read_directory,
};
pub use retrieve::{ChunkStore, reconstruct_sections, retrieve_sections};
pub use semantic::{SemanticSearchError, VectorIndex};
