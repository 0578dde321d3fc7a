//! Lexical path helpers.
//!
//! Program paths are kept as absolute, `/`-separated strings so they compare
//! and match the same way on every platform.

use std::path::Path;

/// Make `path` absolute (against the current directory) and resolve `.` and `..` lexically.
pub fn normalize_path(path: impl AsRef<Path>) -> String {
    let raw = path.as_ref().to_string_lossy().replace('\\', "/");
    let absolute = if is_absolute(&raw) {
        raw
    } else {
        let cwd = std::env::current_dir()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        format!("{}/{}", cwd.trim_end_matches('/'), raw)
    };

    let (prefix, rest) = split_root(&absolute);
    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            part => parts.push(part),
        }
    }
    format!("{}{}", prefix, parts.join("/"))
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || (path.len() >= 3 && path.as_bytes()[1] == b':' && path.as_bytes()[2] == b'/')
}

/// Split `C:/a/b` into (`C:/`, `a/b`) and `/a/b` into (`/`, `a/b`).
fn split_root(path: &str) -> (&str, &str) {
    if path.starts_with('/') {
        ("/", &path[1..])
    } else if path.len() >= 3 && path.as_bytes()[1] == b':' {
        (&path[..3], &path[3..])
    } else {
        ("", path)
    }
}

/// Relative path from directory `from` to `to`, both normalized.
pub fn relative_path(from: &str, to: &str) -> String {
    let from_parts: Vec<&str> = from.split('/').filter(|p| !p.is_empty()).collect();
    let to_parts: Vec<&str> = to.split('/').filter(|p| !p.is_empty()).collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result: Vec<&str> = Vec::new();
    result.extend(std::iter::repeat("..").take(from_parts.len() - common));
    result.extend(&to_parts[common..]);
    result.join("/")
}

/// Directory part of a normalized path.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Deepest directory containing every path in `files`.
pub fn common_dir<'a>(files: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut common: Option<Vec<&str>> = None;
    for file in files {
        let dir: Vec<&str> = parent_dir(file).split('/').collect();
        common = Some(match common {
            None => dir,
            Some(prev) => prev
                .iter()
                .zip(dir.iter())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| *a)
                .collect(),
        });
    }
    common.map(|parts| {
        let joined = parts.join("/");
        if joined.is_empty() {
            "/".to_string()
        } else {
            joined
        }
    })
}

/// Remove everything from the last `.` of the file name on, if there is one.
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_path("/project/./src/../main.ts"), "/project/main.ts");
        assert_eq!(normalize_path("C:\\project\\src\\a.ts"), "C:/project/src/a.ts");
        assert!(normalize_path("main.ts").ends_with("/main.ts"));
    }

    #[test]
    fn test_relative() {
        assert_eq!(relative_path("/project", "/project/folder/bar.test.tsx"), "folder/bar.test.tsx");
        assert_eq!(relative_path("/project/src", "/project/lib/a.ts"), "../lib/a.ts");
        assert_eq!(relative_path("/", "/a.ts"), "a.ts");
    }

    #[test]
    fn test_common_dir() {
        let files = ["/project/main.ts", "/project/folder/bar.ts"];
        assert_eq!(common_dir(files).as_deref(), Some("/project"));
        assert_eq!(common_dir(["/a.ts"]).as_deref(), Some("/"));
        assert_eq!(common_dir(std::iter::empty()), None);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("folder/bar.test.tsx"), "folder/bar.test");
        assert_eq!(strip_extension("Makefile"), "Makefile");
        assert_eq!(strip_extension("dir.v2/file"), "dir.v2/file");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }
}
