//! Shared constants for configuration discovery and file selection.

/// Name of the dedicated configuration file searched for in project roots.
pub const CONFIG_FILENAME: &str = ".logstrip.toml";

/// Name of the package manifest that may carry a `"logstrip"` key.
pub const PACKAGE_JSON_FILENAME: &str = "package.json";

/// Folders excluded from file discovery by default.
pub const DEFAULT_EXCLUDE_FOLDERS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    "coverage",
    ".git",
    ".next",
    ".cache",
];

/// File extensions considered JavaScript sources by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];
