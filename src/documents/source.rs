//! Markdown document discovery.
//!
//! Reads every markdown file in a directory (non-recursively) into an
//! ordered file-stem -> content map for the ingestion pipeline.

use ignore::WalkBuilder;
use indexmap::IndexMap;
use std::path::Path;

use super::{IngestError, IngestResult};

/// Read all `.md` files (case-insensitive extension) directly inside
/// `dir` into an ordered map keyed by file stem.
///
/// Entries are sorted by path so downstream chunking is deterministic.
/// Files that cannot be read are logged and skipped; they never abort
/// the rest of the directory. Subdirectories are ignored.
pub fn read_directory(dir: &Path) -> IngestResult<IndexMap<String, String>> {
    if !dir.exists() {
        return Err(IngestError::SourceNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(IngestError::SourceNotADirectory(dir.to_path_buf()));
    }

    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .git_ignore(true)
        .require_git(false)
        .build();

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(target: "ingest", "skipping unreadable entry: {e}");
                continue;
            }
        };
        let path = entry.path();
        let is_markdown = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if is_markdown {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();

    let mut documents = IndexMap::new();
    for path in paths {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(target: "ingest", "could not read {}: {e}", path.display());
                continue;
            }
        };
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();
        documents.insert(stem, content);
    }

    tracing::debug!(target: "ingest", "read {} markdown files from {}", documents.len(), dir.display());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_markdown_files_keyed_by_stem() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("first.md"), "# One").unwrap();
        fs::write(dir.path().join("second.MD"), "# Two").unwrap();
        fs::write(dir.path().join("ignored.txt"), "not markdown").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        fs::write(dir.path().join("subdir/nested.md"), "# Nested").unwrap();

        let documents = read_directory(dir.path()).unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents["first"], "# One");
        assert_eq!(documents["second"], "# Two");
    }

    #[test]
    fn test_entries_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zebra.md"), "z").unwrap();
        fs::write(dir.path().join("alpha.md"), "a").unwrap();

        let documents = read_directory(dir.path()).unwrap();
        let keys: Vec<&String> = documents.keys().collect();
        assert_eq!(keys, vec!["alpha", "zebra"]);
    }

    #[test]
    fn test_empty_directory_yields_empty_map() {
        let dir = TempDir::new().unwrap();
        assert!(read_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_path_is_distinct_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = read_directory(&missing).unwrap_err();
        assert!(matches!(err, IngestError::SourceNotFound(_)));
    }

    #[test]
    fn test_file_path_is_distinct_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a-file.md");
        fs::write(&file, "# Not a directory").unwrap();

        let err = read_directory(&file).unwrap_err();
        assert!(matches!(err, IngestError::SourceNotADirectory(_)));
    }
}
