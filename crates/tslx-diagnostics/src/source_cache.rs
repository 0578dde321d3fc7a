//! Source text store used to render diagnostics.

use crate::span::{FileId, Location, Span};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A cached source file with line information.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: FileId,
    pub path: PathBuf,
    pub source: String,
    /// Byte offsets where each line starts
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(id: FileId, path: PathBuf, source: String) -> Self {
        let line_starts = compute_line_starts(&source);
        Self {
            id,
            path,
            source,
            line_starts,
        }
    }

    /// Get the 1-indexed line and column for a byte offset.
    pub fn line_column(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source.len() as u32);

        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };

        let line_start = self.line_starts[line_idx];
        ((line_idx + 1) as u32, (offset - line_start + 1).max(1))
    }

    /// Get the text of a 1-indexed line, without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }

        let idx = (line - 1) as usize;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&e| e as usize)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\n').trim_end_matches('\r'))
    }

    pub fn slice(&self, start: u32, end: u32) -> Option<&str> {
        self.source.get(start as usize..end as usize)
    }
}

fn compute_line_starts(source: &str) -> Vec<u32> {
    let mut starts = vec![0];
    for (i, c) in source.char_indices() {
        if c == '\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}

/// Files indexed by [`FileId`], in the order they were added.
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Vec<SourceFile>,
    path_to_id: HashMap<PathBuf, FileId>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, returning its id. Adding the same path twice returns the first id.
    pub fn add_file(&mut self, path: impl AsRef<Path>, source: String) -> FileId {
        let path = path.as_ref().to_path_buf();
        if let Some(&id) = self.path_to_id.get(&path) {
            return id;
        }

        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFile::new(id, path.clone(), source));
        self.path_to_id.insert(path, id);
        id
    }

    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0 as usize)
    }

    pub fn get_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.path_to_id.get(path.as_ref()).copied()
    }

    /// Resolve a span to a Location with file path, line, and column.
    pub fn location(&self, span: Span) -> Option<Location> {
        if span.is_dummy() {
            return None;
        }

        let file = self.get_file(span.file_id)?;
        let (line, column) = file.line_column(span.start);

        Some(Location {
            file: file.path.to_string_lossy().into_owned(),
            line,
            column,
        })
    }

    /// Get the source text covered by a span.
    pub fn source_text(&self, span: Span) -> Option<&str> {
        if span.is_dummy() {
            return None;
        }
        self.get_file(span.file_id)?.slice(span.start, span.end)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_starts() {
        assert_eq!(compute_line_starts("line1\nline2\nline3"), vec![0, 6, 12]);
    }

    #[test]
    fn test_line_column() {
        let mut cache = SourceCache::new();
        let id = cache.add_file("main.ts", "hello\nworld\n".to_string());
        let file = cache.get_file(id).unwrap();

        assert_eq!(file.line_column(0), (1, 1));
        assert_eq!(file.line_column(4), (1, 5));
        assert_eq!(file.line_column(6), (2, 1));
        assert_eq!(file.line_column(7), (2, 2));
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut cache = SourceCache::new();
        let a = cache.add_file("a.ts", String::new());
        let b = cache.add_file("b.ts", String::new());
        assert_eq!(cache.add_file("a.ts", "ignored".to_string()), a);
        assert_eq!((a, b), (FileId(0), FileId(1)));
        let paths: Vec<_> = cache.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("a.ts"), PathBuf::from("b.ts")]);
    }

    #[test]
    fn test_location_and_text() {
        let mut cache = SourceCache::new();
        let id = cache.add_file("main.ts", "let x = 42;\nlet nil = 1;".to_string());

        let loc = cache.location(Span::new(id, 16, 19)).unwrap();
        assert_eq!((loc.line, loc.column), (2, 5));
        assert_eq!(cache.source_text(Span::new(id, 16, 19)), Some("nil"));
        assert!(cache.location(Span::DUMMY).is_none());
    }
}
