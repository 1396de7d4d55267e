//! Token rewriter
//!
//! Rewrites one literal token to another, line by line, in every file with a
//! given extension. Each file is streamed into a temporary sibling which only
//! replaces the original when at least one line changed.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::error::PortError;
use crate::core::model::{FileOutcome, TokenRule};
use crate::core::paths::{has_extension, normalize_path};

/// Applies a [`TokenRule`] to lines and files
#[derive(Debug)]
pub struct Rewriter {
    rule: TokenRule,
    /// Present only in whole-word mode
    pattern: Option<Regex>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into lines the way universal-newline reading does.
///
/// `\n`, `\r\n` and a lone `\r` each end a line and stay attached to it,
/// so joining the pieces gives back the input unchanged.
fn lines_inclusive(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut start = 0;
    std::iter::from_fn(move || {
        if start >= bytes.len() {
            return None;
        }
        let mut end = start;
        while end < bytes.len() {
            match bytes[end] {
                b'\n' => {
                    end += 1;
                    break;
                }
                b'\r' => {
                    end += 1;
                    if bytes.get(end) == Some(&b'\n') {
                        end += 1;
                    }
                    break;
                }
                _ => end += 1,
            }
        }
        let line = &text[start..end];
        start = end;
        Some(line)
    })
}

/// Build a regex matching `token` where it is not part of a longer word.
///
/// `\b` is only added on sides where the token itself ends in a word
/// character; on the other sides it would demand a word neighbour instead.
fn whole_word_pattern(token: &str) -> Result<Regex> {
    let mut pattern = String::new();
    if token.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(token));
    if token.chars().last().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern).with_context(|| format!("Invalid token pattern: {}", pattern))
}

impl Rewriter {
    pub fn new(rule: TokenRule) -> Result<Self> {
        rule.validate()?;
        let pattern = if rule.whole_word {
            Some(whole_word_pattern(&rule.from)?)
        } else {
            None
        };
        Ok(Self { rule, pattern })
    }

    /// Rewrite a single line; `None` when the token does not occur in it
    pub fn rewrite_line<'a>(&self, line: &'a str) -> Option<Cow<'a, str>> {
        match &self.pattern {
            Some(re) => {
                if !re.is_match(line) {
                    return None;
                }
                Some(re.replace_all(line, NoExpand(&self.rule.to)))
            }
            None => {
                if !line.contains(self.rule.from.as_str()) {
                    return None;
                }
                Some(Cow::Owned(line.replace(&self.rule.from, &self.rule.to)))
            }
        }
    }

    /// Rewrite one file in place.
    ///
    /// The count is the number of lines in which the token was replaced.
    /// With `dry_run` the file is never replaced.
    pub fn rewrite_file(&self, path: &Path, dry_run: bool) -> Result<FileOutcome> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let content =
            String::from_utf8(bytes).map_err(|_| PortError::NotUtf8(path.to_path_buf()))?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::Builder::new()
            .prefix(".toicu-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

        let mut count = 0;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            for line in lines_inclusive(&content) {
                match self.rewrite_line(line) {
                    Some(rewritten) => {
                        count += 1;
                        writer.write_all(rewritten.as_bytes())?;
                    }
                    None => writer.write_all(line.as_bytes())?,
                }
            }
            writer
                .flush()
                .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
        }

        let display_path = normalize_path(path);

        if count == 0 || dry_run {
            tmp.close()
                .with_context(|| format!("Failed to discard temporary file for {}", path.display()))?;
            debug!(path = %display_path, count, dry_run, "left untouched");
            return Ok(FileOutcome {
                path: display_path,
                count,
                replaced: false,
            });
        }

        let permissions = fs::metadata(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .permissions();
        tmp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Failed to set permissions for {}", path.display()))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to flush {}", path.display()))?;
        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!(path = %display_path, count, "rewritten");
        Ok(FileOutcome {
            path: display_path,
            count,
            replaced: true,
        })
    }

    /// Rewrite every file under `root` with the given extension.
    ///
    /// Files are visited in name order; `on_file` is called after each one
    /// and an error from it stops the walk.
    pub fn rewrite_tree<F>(
        &self,
        root: &Path,
        extension: &str,
        dry_run: bool,
        mut on_file: F,
    ) -> Result<Vec<FileOutcome>>
    where
        F: FnMut(&FileOutcome) -> Result<()>,
    {
        let mut outcomes = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
                continue;
            }

            let outcome = self.rewrite_file(entry.path(), dry_run)?;
            on_file(&outcome)?;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
