//! Semantic search over chunk records.
//!
//! Thin wrapper around fastembed: chunk texts are embedded once at
//! ingestion, queries are embedded per call and ranked by cosine
//! similarity. This is the single ingestion/query surface the
//! reconstruction pipeline depends on.

mod index;

pub use index::{SemanticSearchError, VectorIndex, embedding_model_from_name};

// Re-export key types
pub use fastembed::{EmbeddingModel, TextEmbedding};
