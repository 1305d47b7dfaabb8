//! Markdown ingestion pipeline.
//!
//! This module provides:
//! - Document discovery from a directory of markdown files
//! - Header-based section splitting with title extraction
//! - Markdown syntax stripping
//! - Size-bounded chunking with overlap
//! - Chunk record assembly with full section metadata

pub mod assembler;
pub mod chunker;
pub mod cleaner;
pub mod source;
pub mod splitter;
pub mod types;

pub use assembler::assemble;
pub use chunker::TextChunker;
pub use source::read_directory;
pub use types::{
    ChunkMetadata, ChunkRecord, Document, SOURCE_LABEL, Section, SectionKey, SectionResult,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from document ingestion.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Source path is a file, not a directory: {0}")]
    SourceNotADirectory(PathBuf),

    #[error("No chunk records produced; input documents were empty or cleaned to nothing")]
    EmptyResult,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;
