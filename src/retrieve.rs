//! Section reconstruction from chunk-level search hits.
//!
//! Retrieval runs at chunk granularity for embedding precision; answers
//! are delivered at section granularity for readability. Given the
//! chunks a similarity search matched, this module regroups every chunk
//! of each matched section, restores source order, and reassembles the
//! full section text.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::documents::{ChunkRecord, SectionKey, SectionResult};
use crate::semantic::{SemanticSearchError, VectorIndex};

/// All chunk records from one ingestion, indexed by section.
///
/// The by-section lookup is built once here so reconstruction never
/// rescans the full collection per query. The store is a plain value
/// owned by the caller; it carries no pipeline state.
pub struct ChunkStore {
    records: Vec<ChunkRecord>,
    by_section: HashMap<SectionKey, Vec<usize>>,
}

impl ChunkStore {
    /// Index `records` by their `(file_name, section_name)` pair.
    pub fn new(records: Vec<ChunkRecord>) -> Self {
        let mut by_section: HashMap<SectionKey, Vec<usize>> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            by_section.entry(record.section_key()).or_default().push(i);
        }
        Self {
            records,
            by_section,
        }
    }

    /// All records in ingestion order.
    pub fn records(&self) -> &[ChunkRecord] {
        &self.records
    }

    /// Number of stored chunk records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every chunk of one section, sorted by chunk index.
    pub fn section_chunks(&self, key: &SectionKey) -> Vec<&ChunkRecord> {
        let mut chunks: Vec<&ChunkRecord> = self
            .by_section
            .get(key)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default();
        chunks.sort_by_key(|chunk| chunk.chunk_index);
        chunks
    }
}

/// Rebuild full sections for every section represented in `hits`.
///
/// Each hit contributes its whole section, not just the matched chunk:
/// all of the section's chunks are gathered from the store, ordered by
/// chunk index, and joined with single spaces. The lowest-index chunk
/// donates the representative metadata. Hit ranking determines which
/// sections appear, nothing else. Empty hits produce an empty map.
pub fn reconstruct_sections(
    hits: &[ChunkRecord],
    store: &ChunkStore,
) -> IndexMap<String, SectionResult> {
    let mut sections = IndexMap::new();

    for hit in hits {
        let section_id = hit.section_id();
        if sections.contains_key(&section_id) {
            continue;
        }

        let chunks = store.section_chunks(&hit.section_key());
        let Some(first) = chunks.first() else {
            continue;
        };

        let content = chunks
            .iter()
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        sections.insert(
            section_id,
            SectionResult {
                content,
                metadata: first.metadata(),
            },
        );
    }

    sections
}

/// Run a similarity query and reconstruct the matching sections.
///
/// Composes the embedding index and the chunk store: the index ranks
/// chunks against the query, the store supplies full section context.
pub fn retrieve_sections(
    index: &VectorIndex,
    store: &ChunkStore,
    query: &str,
    k: usize,
) -> Result<IndexMap<String, SectionResult>, SemanticSearchError> {
    let ranked = index.search(query, k)?;
    let hits: Vec<ChunkRecord> = ranked
        .into_iter()
        .map(|(i, _)| store.records()[i].clone())
        .collect();
    Ok(reconstruct_sections(&hits, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::SOURCE_LABEL;

    fn record(file: &str, section: &str, index: usize, text: &str) -> ChunkRecord {
        ChunkRecord {
            file_name: file.to_string(),
            section_name: section.to_string(),
            page_title: "Title".to_string(),
            chunk_index: index,
            source: SOURCE_LABEL.to_string(),
            text: text.to_string(),
        }
    }

    fn three_chunk_store() -> ChunkStore {
        ChunkStore::new(vec![
            record("doc", "Alpha", 0, "alpha start"),
            record("doc", "Alpha", 1, "alpha middle"),
            record("doc", "Alpha", 2, "alpha end"),
            record("doc", "Beta", 0, "beta only"),
        ])
    }

    #[test]
    fn test_single_hit_reconstructs_whole_section() {
        let store = three_chunk_store();
        let hits = vec![record("doc", "Alpha", 1, "alpha middle")];

        let sections = reconstruct_sections(&hits, &store);

        assert_eq!(sections.len(), 1);
        let result = &sections["doc - Alpha"];
        assert_eq!(result.content, "alpha start alpha middle alpha end");
        assert_eq!(result.metadata.chunk_index, 0);
        assert_eq!(result.metadata.section_name, "Alpha");
    }

    #[test]
    fn test_empty_hits_yield_empty_map() {
        let store = three_chunk_store();
        assert!(reconstruct_sections(&[], &store).is_empty());
    }

    #[test]
    fn test_duplicate_section_hits_collapse() {
        let store = three_chunk_store();
        let hits = vec![
            record("doc", "Alpha", 0, "alpha start"),
            record("doc", "Alpha", 2, "alpha end"),
        ];

        let sections = reconstruct_sections(&hits, &store);
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_hits_from_different_sections() {
        let store = three_chunk_store();
        let hits = vec![
            record("doc", "Beta", 0, "beta only"),
            record("doc", "Alpha", 2, "alpha end"),
        ];

        let sections = reconstruct_sections(&hits, &store);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections["doc - Beta"].content, "beta only");
        assert_eq!(
            sections["doc - Alpha"].content,
            "alpha start alpha middle alpha end"
        );
    }

    #[test]
    fn test_same_section_name_in_different_files_stays_separate() {
        let store = ChunkStore::new(vec![
            record("one", "Intro", 0, "first file"),
            record("two", "Intro", 0, "second file"),
        ]);
        let hits = vec![
            record("one", "Intro", 0, "first file"),
            record("two", "Intro", 0, "second file"),
        ];

        let sections = reconstruct_sections(&hits, &store);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections["one - Intro"].content, "first file");
        assert_eq!(sections["two - Intro"].content, "second file");
    }

    #[test]
    fn test_section_chunks_sorted_by_index() {
        // Store built from shuffled input still yields ordered chunks.
        let store = ChunkStore::new(vec![
            record("doc", "Alpha", 2, "alpha end"),
            record("doc", "Alpha", 0, "alpha start"),
            record("doc", "Alpha", 1, "alpha middle"),
        ]);

        let chunks = store.section_chunks(&SectionKey::new("doc", "Alpha"));
        let indices: Vec<usize> = chunks.iter().map(|c| c.chunk_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
