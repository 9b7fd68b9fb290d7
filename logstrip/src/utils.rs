//! Utility functions shared by the transform core and the CLI.

use crate::constants::DEFAULT_EXCLUDE_FOLDERS;
use rustc_hash::FxHashSet;
use std::path::Path;

/// A utility struct to convert byte offsets to line and column numbers.
///
/// The parser and the splice buffer work with byte offsets, but diagnostics
/// should report line numbers which are more human-readable.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to a 1-indexed (line, column) pair.
    ///
    /// The column is a byte offset within the line, which matches what
    /// Tree-sitter reports for ASCII sources.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_index(offset);
        let line_start = self.line_starts[line - 1];
        (line, offset - line_start + 1)
    }
}

/// Parses exclude folders, combining defaults with user inputs.
///
/// `include_folders` entries are carved back out of the exclusion set so a
/// user can force-include a folder the defaults would skip.
pub fn parse_exclude_folders<S: std::hash::BuildHasher>(
    user_exclude_folders: Option<std::collections::HashSet<String, S>>,
    use_defaults: bool,
    include_folders: Option<std::collections::HashSet<String, S>>,
) -> FxHashSet<String> {
    let mut exclude_folders = FxHashSet::default();

    if use_defaults {
        for folder in DEFAULT_EXCLUDE_FOLDERS {
            exclude_folders.insert((*folder).to_owned());
        }
    }

    if let Some(user_folders) = user_exclude_folders {
        exclude_folders.extend(user_folders);
    }

    if let Some(include) = include_folders {
        for folder in include {
            exclude_folders.remove(&folder);
        }
    }

    exclude_folders
}

/// Checks whether a path has one of the configured source extensions.
#[must_use]
pub fn has_strippable_extension(path: &Path, extensions: &FxHashSet<String>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(ext))
}

/// Checks whether any component of the path is an excluded folder name.
#[must_use]
pub fn is_excluded_path(path: &Path, exclude_folders: &FxHashSet<String>) -> bool {
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| exclude_folders.contains(name))
    })
}

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_line_index_first_line() {
        let index = LineIndex::new("abc\ndef\n");
        assert_eq!(index.line_index(0), 1);
        assert_eq!(index.line_index(2), 1);
    }

    #[test]
    fn test_line_index_later_lines() {
        let index = LineIndex::new("abc\ndef\nghi");
        assert_eq!(index.line_index(4), 2);
        assert_eq!(index.line_index(8), 3);
    }

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("abc\ndef\n");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(5), (2, 2));
    }

    #[test]
    fn test_parse_exclude_folders_defaults() {
        let folders = parse_exclude_folders::<std::collections::hash_map::RandomState>(
            None, true, None,
        );
        assert!(folders.contains("node_modules"));
        assert!(folders.contains("dist"));
    }

    #[test]
    fn test_parse_exclude_folders_include_overrides() {
        let include: std::collections::HashSet<String> =
            ["dist".to_owned()].into_iter().collect();
        let folders = parse_exclude_folders(None, true, Some(include));
        assert!(!folders.contains("dist"));
        assert!(folders.contains("node_modules"));
    }

    #[test]
    fn test_has_strippable_extension() {
        let extensions: FxHashSet<String> =
            ["js".to_owned(), "mjs".to_owned()].into_iter().collect();
        assert!(has_strippable_extension(Path::new("a/b.js"), &extensions));
        assert!(has_strippable_extension(Path::new("c.mjs"), &extensions));
        assert!(!has_strippable_extension(Path::new("c.ts"), &extensions));
        assert!(!has_strippable_extension(Path::new("noext"), &extensions));
    }

    #[test]
    fn test_is_excluded_path() {
        let exclude: FxHashSet<String> = ["node_modules".to_owned()].into_iter().collect();
        assert!(is_excluded_path(
            &PathBuf::from("pkg/node_modules/lib/index.js"),
            &exclude
        ));
        assert!(!is_excluded_path(&PathBuf::from("src/index.js"), &exclude));
    }

    #[test]
    fn test_normalize_display_path() {
        assert_eq!(
            normalize_display_path(Path::new("./src/main.js")),
            "src/main.js"
        );
    }
}
