//! In-memory vector index over chunk embeddings.

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::Mutex;

use crate::documents::ChunkRecord;

/// Error type for semantic search operations.
#[derive(Debug, thiserror::Error)]
pub enum SemanticSearchError {
    #[error("Failed to initialize embedding model: {0}")]
    ModelInit(String),

    #[error("Failed to generate embedding: {0}")]
    Embedding(String),

    #[error("No embeddings available for search")]
    NoEmbeddings,
}

/// Batch size for embedding generation. Smaller batches reduce memory
/// pressure during large ingestions.
const EMBEDDING_BATCH_SIZE: usize = 64;

/// Resolve a configured model name to a fastembed model.
pub fn embedding_model_from_name(name: &str) -> Result<EmbeddingModel, SemanticSearchError> {
    match name {
        "AllMiniLML6V2" => Ok(EmbeddingModel::AllMiniLML6V2),
        "AllMiniLML12V2" => Ok(EmbeddingModel::AllMiniLML12V2),
        "BGESmallENV15" => Ok(EmbeddingModel::BGESmallENV15),
        other => Err(SemanticSearchError::ModelInit(format!(
            "unknown embedding model: {other}"
        ))),
    }
}

/// Embeddings for one ingestion's chunk records, searchable by cosine
/// similarity.
///
/// Built once per ingestion and handed back to the caller alongside the
/// chunk store; holds nothing but the model and the vectors.
pub struct VectorIndex {
    /// The embedding model (wrapped in Mutex for interior mutability).
    model: Mutex<TextEmbedding>,

    /// One embedding per chunk record, in record order.
    embeddings: Vec<Vec<f32>>,

    /// Model dimensions for diagnostics.
    dimensions: usize,
}

impl VectorIndex {
    /// Embed every chunk record's text with the given model.
    pub fn build(
        records: &[ChunkRecord],
        model: EmbeddingModel,
    ) -> Result<Self, SemanticSearchError> {
        let mut text_model =
            TextEmbedding::try_new(InitOptions::new(model).with_show_download_progress(false))
                .map_err(|e| SemanticSearchError::ModelInit(e.to_string()))?;

        let mut embeddings = Vec::with_capacity(records.len());
        for batch in records.chunks(EMBEDDING_BATCH_SIZE) {
            let texts: Vec<&str> = batch.iter().map(|r| r.text.as_str()).collect();
            let batch_embeddings = text_model
                .embed(texts, None)
                .map_err(|e| SemanticSearchError::Embedding(e.to_string()))?;
            embeddings.extend(batch_embeddings);
        }

        let dimensions = embeddings.first().map(Vec::len).unwrap_or(0);
        tracing::info!(
            target: "semantic",
            "embedded {} chunks ({dimensions} dimensions)",
            embeddings.len()
        );

        Ok(Self {
            model: Mutex::new(text_model),
            embeddings,
            dimensions,
        })
    }

    /// Rank indexed chunks against `query`, highest similarity first.
    ///
    /// Returns `(record_index, score)` pairs truncated to `k`; record
    /// indices refer to the record order the index was built from.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<(usize, f32)>, SemanticSearchError> {
        if self.embeddings.is_empty() {
            return Err(SemanticSearchError::NoEmbeddings);
        }

        let query_embeddings = self
            .model
            .lock()
            .map_err(|_| SemanticSearchError::Embedding("embedding model lock poisoned".to_string()))?
            .embed(vec![query], None)
            .map_err(|e| SemanticSearchError::Embedding(e.to_string()))?;
        let query_embedding = query_embeddings.into_iter().next().ok_or_else(|| {
            SemanticSearchError::Embedding("model returned no query embedding".to_string())
        })?;

        let mut similarities: Vec<(usize, f32)> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, embedding)| (i, cosine_similarity(&query_embedding, embedding)))
            .collect();

        // Sort by similarity descending
        similarities.sort_by(|a, b| b.1.total_cmp(&a.1));
        similarities.truncate(k);
        Ok(similarities)
    }

    /// Get the number of indexed embeddings.
    pub fn embedding_count(&self) -> usize {
        self.embeddings.len()
    }

    /// Embedding dimension of the underlying model.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Calculate cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
