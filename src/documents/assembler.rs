//! Chunk record assembly.
//!
//! Drives the per-document pipeline: section splitting, markdown
//! cleaning, chunking, and metadata stamping. The output is the flat
//! record sequence handed to the embedding index.

use indexmap::IndexMap;

use super::chunker::TextChunker;
use super::types::{ChunkRecord, Document, SOURCE_LABEL};
use super::{IngestError, IngestResult, cleaner, splitter};

/// Turn raw documents into embeddable chunk records.
///
/// Sections whose bodies clean down to nothing are dropped, never
/// emitted as empty chunks. Chunk indices are 0-based and contiguous
/// within each section. Fails with [`IngestError::EmptyResult`] when
/// no document yields any chunk.
pub fn assemble(
    documents: &IndexMap<String, String>,
    chunker: &TextChunker,
) -> IngestResult<Vec<ChunkRecord>> {
    let mut records = Vec::new();

    for (file_name, raw_text) in documents {
        let document = Document::new(file_name.clone(), raw_text.clone());
        let (_, sections) = splitter::split(&document);

        for section in sections {
            let body = cleaner::clean(&section.body_text);
            if body.is_empty() {
                tracing::debug!(
                    target: "ingest",
                    "dropping empty section '{}' in {}",
                    section.section_name,
                    section.file_name
                );
                continue;
            }

            for (chunk_index, text) in chunker.chunk(&body).into_iter().enumerate() {
                records.push(ChunkRecord {
                    file_name: section.file_name.clone(),
                    section_name: section.section_name.clone(),
                    page_title: section.page_title.clone(),
                    chunk_index,
                    source: SOURCE_LABEL.to_string(),
                    text,
                });
            }
        }
    }

    if records.is_empty() {
        return Err(IngestError::EmptyResult);
    }

    tracing::info!(target: "ingest", "assembled {} chunk records from {} documents", records.len(), documents.len());
    Ok(records)
}
