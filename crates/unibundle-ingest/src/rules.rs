//! Path exclusion and extension inclusion rules.
//!
//! Exclusion is a plain, case-sensitive substring test against the whole
//! member path: `src/node_modules_backup/x.ts` is excluded by `node_modules`
//! even though no path segment is literally `node_modules`. Extension matching
//! lower-cases the path and tests each allowed suffix.

use serde::{Deserialize, Serialize};

/// Build output, dependency vendoring, VCS metadata, lockfiles, secrets and
/// top-level docs.
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "coverage",
    ".DS_Store",
    "yarn.lock",
    "package-lock.json",
    ".env",
    "README.md",
];

/// Source, markup, style and data formats that are forwarded as text.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".css", ".html", ".json", ".svg",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRules {
    pub excluded_paths: Vec<String>,
    pub allowed_extensions: Vec<String>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            excluded_paths: DEFAULT_EXCLUDED_PATHS.iter().map(|s| s.to_string()).collect(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Outcome of running one archive member through the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Directory,
    /// Matched the first exclusion token, in list order.
    ExcludedPath { token: String },
    DisallowedExtension,
    /// Neither a file nor a directory (symlinks, links, devices).
    Unsupported,
    Undecodable,
}

impl Decision {
    pub fn is_kept(&self) -> bool {
        matches!(self, Decision::Keep)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Keep => write!(f, "kept"),
            Decision::Directory => write!(f, "directory"),
            Decision::ExcludedPath { token } => write!(f, "excluded by '{token}'"),
            Decision::DisallowedExtension => write!(f, "extension not allowed"),
            Decision::Unsupported => write!(f, "unsupported entry type"),
            Decision::Undecodable => write!(f, "not valid UTF-8"),
        }
    }
}

impl FilterRules {
    pub fn new(
        excluded_paths: impl IntoIterator<Item = impl Into<String>>,
        allowed_extensions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            excluded_paths: excluded_paths.into_iter().map(Into::into).collect(),
            allowed_extensions: allowed_extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// First exclusion token contained in `path`, if any.
    pub fn excluded_by(&self, path: &str) -> Option<&str> {
        self.excluded_paths
            .iter()
            .find(|token| path.contains(token.as_str()))
            .map(String::as_str)
    }

    pub fn has_allowed_extension(&self, path: &str) -> bool {
        let lowered = path.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|ext| lowered.ends_with(ext.as_str()))
    }

    /// Classify a file path. Exclusion is checked before extension.
    pub fn decide(&self, path: &str) -> Decision {
        if let Some(token) = self.excluded_by(path) {
            return Decision::ExcludedPath {
                token: token.to_string(),
            };
        }
        if !self.has_allowed_extension(path) {
            return Decision::DisallowedExtension;
        }
        Decision::Keep
    }
}
