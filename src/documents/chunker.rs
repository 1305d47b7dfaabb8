//! Recursive size-bounded text chunking.
//!
//! Splits a cleaned section body into chunks no larger than a
//! configured character budget, preferring paragraph boundaries, then
//! line boundaries, then word boundaries, then raw characters.
//! Consecutive chunks share a configurable amount of trailing context
//! so information at a boundary is retrievable from either neighbor.

use std::collections::VecDeque;

use crate::config::ChunkingConfig;

/// Split-point priorities, coarsest first. The empty separator means
/// per-character splitting and always applies.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Splits section bodies into overlapping, size-bounded chunks.
#[derive(Debug, Clone)]
pub struct TextChunker {
    max_chars: usize,
    overlap_chars: usize,
}

impl TextChunker {
    /// Create a chunker from validated chunking configuration.
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            max_chars: config.max_chunk_chars,
            overlap_chars: config.overlap_chars,
        }
    }

    /// Split `body` into chunks of at most `max_chars` characters.
    ///
    /// Bodies that already fit are returned unchanged as a single
    /// chunk. Longer bodies are split at the best available boundary
    /// and merged back greedily, carrying roughly `overlap_chars` of
    /// trailing context into each following chunk.
    pub fn chunk(&self, body: &str) -> Vec<String> {
        if body.is_empty() {
            return Vec::new();
        }
        if char_len(body) <= self.max_chars {
            return vec![body.to_string()];
        }
        self.split_text(body, &SEPARATORS)
    }

    fn split_text(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // First separator that occurs in the text wins; "" always does.
        let position = separators
            .iter()
            .position(|sep| sep.is_empty() || text.contains(sep))
            .unwrap_or(separators.len() - 1);
        let separator = separators[position];
        let remaining = &separators[position + 1..];

        let splits: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut fitting: Vec<String> = Vec::new();
        for split in splits {
            if char_len(&split) <= self.max_chars {
                fitting.push(split);
                continue;
            }
            if !fitting.is_empty() {
                self.merge_splits(std::mem::take(&mut fitting), separator, &mut chunks);
            }
            if remaining.is_empty() {
                chunks.push(split);
            } else {
                chunks.extend(self.split_text(&split, remaining));
            }
        }
        if !fitting.is_empty() {
            self.merge_splits(fitting, separator, &mut chunks);
        }
        chunks
    }

    /// Greedily pack splits into chunks, re-joining with the separator
    /// they were split on. When a chunk fills up it is emitted and the
    /// window shrinks from the front until at most `overlap_chars`
    /// remain to seed the next chunk.
    fn merge_splits(&self, splits: Vec<String>, separator: &str, out: &mut Vec<String>) {
        let separator_len = char_len(separator);
        let mut window: VecDeque<String> = VecDeque::new();
        let mut total = 0usize;

        for split in splits {
            let len = char_len(&split);
            let sep = if window.is_empty() { 0 } else { separator_len };
            if total + len + sep > self.max_chars && !window.is_empty() {
                if let Some(chunk) = join_window(&window, separator) {
                    out.push(chunk);
                }
                while total > self.overlap_chars
                    || (total + len + if window.is_empty() { 0 } else { separator_len }
                        > self.max_chars
                        && total > 0)
                {
                    let Some(first) = window.pop_front() else {
                        break;
                    };
                    total -= char_len(&first) + if window.is_empty() { 0 } else { separator_len };
                }
            }
            total += len + if window.is_empty() { 0 } else { separator_len };
            window.push_back(split);
        }

        if let Some(chunk) = join_window(&window, separator) {
            out.push(chunk);
        }
    }
}

fn join_window(window: &VecDeque<String>, separator: &str) -> Option<String> {
    let joined = window
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator);
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
