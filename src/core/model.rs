//! Run model
//!
//! Options for a port run and the outcomes it produces. Outcomes are
//! serializable so they can be rendered as JSON Lines as well as text.

use serde::Serialize;
use std::path::PathBuf;

use crate::core::error::PortError;

/// Directory copied by default (the standalone sources)
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Directory produced by default
pub const DEFAULT_OUTPUT_DIR: &str = "src_icu";

/// Extension of the files whose content is rewritten
pub const DEFAULT_EXTENSION: &str = "java";

/// Package token used by the standalone sources
pub const DEFAULT_FROM_TOKEN: &str = "message2x";

/// Package token used inside ICU
pub const DEFAULT_TO_TOKEN: &str = "message2";

/// Diff tool named in the follow-up commands
pub const DEFAULT_DIFF_TOOL: &str = "kdiff";

/// Options for a single port run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortOptions {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extension: String,
    pub rule: TokenRule,
    pub dry_run: bool,
    pub verify: bool,
    pub diff_tool: String,
}

impl Default for PortOptions {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            rule: TokenRule::default(),
            dry_run: false,
            verify: false,
            diff_tool: DEFAULT_DIFF_TOOL.to_string(),
        }
    }
}

impl PortOptions {
    /// Check options that do not depend on the filesystem
    pub fn validate(&self) -> Result<(), PortError> {
        self.rule.validate()
    }
}

/// The token substitution applied to every matching file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule {
    pub from: String,
    pub to: String,

    /// Only rewrite occurrences not embedded in a longer identifier
    pub whole_word: bool,
}

impl Default for TokenRule {
    fn default() -> Self {
        Self {
            from: DEFAULT_FROM_TOKEN.to_string(),
            to: DEFAULT_TO_TOKEN.to_string(),
            whole_word: false,
        }
    }
}

impl TokenRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            whole_word: false,
        }
    }

    pub fn with_whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    pub fn validate(&self) -> Result<(), PortError> {
        if self.from.is_empty() {
            return Err(PortError::EmptyToken);
        }
        Ok(())
    }
}

/// Result of rewriting one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    /// Path of the file in the output tree, using '/' as separator
    pub path: String,

    /// Number of lines where the token was replaced
    pub count: usize,

    /// Whether the file on disk was replaced by the rewritten content
    pub replaced: bool,
}

impl FileOutcome {
    pub fn changed(&self) -> bool {
        self.count > 0
    }
}

/// Aggregated outcome of a port run
#[derive(Debug, Clone, Default, Serialize)]
pub struct PortReport {
    /// Number of files copied into the output tree
    pub files_copied: usize,

    /// Per-file rewrite outcomes, in walk order
    pub files: Vec<FileOutcome>,

    /// Whether the untouched files were verified against the source
    pub verified: bool,
}

impl PortReport {
    pub fn files_changed(&self) -> usize {
        self.files.iter().filter(|f| f.changed()).count()
    }

    pub fn total_replacements(&self) -> usize {
        self.files.iter().map(|f| f.count).sum()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            files_copied: self.files_copied,
            files_scanned: self.files.len(),
            files_changed: self.files_changed(),
            replacements: self.total_replacements(),
            verified: self.verified,
        }
    }
}

/// Totals emitted at the end of a machine-readable run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files_copied: usize,
    pub files_scanned: usize,
    pub files_changed: usize,
    pub replacements: usize,
    pub verified: bool,
}

/// One line of JSON Lines output
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record<'a> {
    File(&'a FileOutcome),
    Summary(Summary),
}
