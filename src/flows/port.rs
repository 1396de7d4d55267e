//! Port flow - Copy the source tree, rewrite the package token, report
//!
//! Steps:
//! 1. Validate options and the source/output layout (nothing is touched yet)
//! 2. Remove the previous output directory
//! 3. Copy the source tree to the output directory
//! 4. Rewrite the token in every file with the configured extension
//! 5. Optionally verify the remaining files against the source
//! 6. Print the diff commands for the manual comparison

use anyhow::Result;
use std::io::{self, Write};
use tracing::{debug, info};

use crate::backends::copy::{check_layout, check_source, copy_tree, remove_tree};
use crate::backends::rewrite::Rewriter;
use crate::backends::verify::verify_untouched;
use crate::core::model::{PortOptions, PortReport};
use crate::core::paths::normalize_path;
use crate::core::render::{OutputFormat, Renderer};
use crate::flows::report::render_instructions;

/// Run the port flow, printing to stdout
pub fn run_port(opts: &PortOptions, renderer: Renderer, quiet: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    port(opts, renderer, quiet, &mut out)?;
    Ok(())
}

/// Run the port flow, writing all user-facing output to `out`
pub fn port<W: Write>(
    opts: &PortOptions,
    renderer: Renderer,
    quiet: bool,
    out: &mut W,
) -> Result<PortReport> {
    opts.validate()?;
    check_source(&opts.source_dir)?;
    check_layout(&opts.source_dir, &opts.output_dir)?;
    let stages = renderer.format() == OutputFormat::Text && !quiet;
    let rewriter = Rewriter::new(opts.rule.clone())?;

    let source = normalize_path(&opts.source_dir);
    let output = normalize_path(&opts.output_dir);

    if stages {
        writeln!(out, "Remove previous folder {}", output)?;
    }
    remove_tree(&opts.output_dir)?;

    if stages {
        writeln!(out, "Copy {}/ to {}", source.trim_end_matches('/'), output)?;
    }
    let mut report = PortReport {
        files_copied: copy_tree(&opts.source_dir, &opts.output_dir)?,
        ..Default::default()
    };
    debug!(files = report.files_copied, "copy complete");

    if stages {
        writeln!(out, "Process {}", output)?;
    }
    report.files = rewriter.rewrite_tree(
        &opts.output_dir,
        &opts.extension,
        opts.dry_run,
        |outcome| {
            writeln!(out, "{}", renderer.render_file(outcome))?;
            Ok(())
        },
    )?;

    if opts.verify {
        let checked = verify_untouched(&opts.source_dir, &opts.output_dir, &opts.extension)?;
        report.verified = true;
        info!(files = checked, "untouched files match the source");
    }

    let summary = report.summary();
    info!(
        copied = summary.files_copied,
        scanned = summary.files_scanned,
        changed = summary.files_changed,
        replacements = summary.replacements,
        dry_run = opts.dry_run,
        "port complete"
    );

    match renderer.render_summary(summary) {
        Some(line) => writeln!(out, "{}", line)?,
        None => write!(out, "{}", render_instructions(&output, &opts.diff_tool))?,
    }
    out.flush()?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PortError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn options(root: &Path) -> PortOptions {
        PortOptions {
            source_dir: root.join("src"),
            output_dir: root.join("src_icu"),
            ..Default::default()
        }
    }

    fn text_renderer() -> Renderer {
        colored::control::set_override(false);
        Renderer::new(OutputFormat::Text)
    }

    #[test]
    fn test_port_full_run() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        write_file(
            &src.join("main/java/com/ibm/icu/message2x/Parser.java"),
            "package com.ibm.icu.message2x;\n",
        );
        write_file(&src.join("main/java/com/ibm/icu/message2x/Util.java"), "class Util {}\n");
        write_file(
            &src.join("test/resources/com/ibm/icu/dev/test/message2/spec.json"),
            "{\"pkg\": \"message2x\"}\n",
        );

        let opts = PortOptions {
            verify: true,
            ..options(temp.path())
        };
        let mut out = Vec::new();
        let report = port(&opts, text_renderer(), false, &mut out).unwrap();

        assert_eq!(report.files_copied, 3);
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files_changed(), 1);
        assert!(report.verified);

        let dest = temp.path().join("src_icu");
        assert_eq!(
            fs::read_to_string(dest.join("main/java/com/ibm/icu/message2x/Parser.java")).unwrap(),
            "package com.ibm.icu.message2;\n"
        );
        assert_eq!(
            fs::read_to_string(dest.join("test/resources/com/ibm/icu/dev/test/message2/spec.json"))
                .unwrap(),
            "{\"pkg\": \"message2x\"}\n"
        );
        // The source is never modified
        assert_eq!(
            fs::read_to_string(src.join("main/java/com/ibm/icu/message2x/Parser.java")).unwrap(),
            "package com.ibm.icu.message2x;\n"
        );

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Remove previous folder"));
        assert!(text.contains("message2x/Parser.java : 1\n"));
        assert!(text.contains("message2x/Util.java : 0\n"));
        assert!(text.contains("Ready to compare!"));
    }

    #[test]
    fn test_port_missing_source_produces_nothing() {
        let temp = tempdir().unwrap();
        let mut out = Vec::new();

        let err = port(&options(temp.path()), text_renderer(), false, &mut out).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PortError>(),
            Some(PortError::SourceMissing(_))
        ));
        assert!(out.is_empty());
        assert!(!temp.path().join("src_icu").exists());
    }

    #[test]
    fn test_port_quiet_omits_stage_lines() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/A.java"), "message2x\n");

        let mut out = Vec::new();
        port(&options(temp.path()), text_renderer(), true, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Remove previous folder"));
        assert!(text.contains("A.java : 1"));
        assert!(text.contains("Ready to compare!"));
    }

    #[test]
    fn test_port_jsonl_output() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/A.java"), "message2x\nmessage2x\n");
        write_file(&temp.path().join("src/B.java"), "none\n");

        let mut out = Vec::new();
        port(
            &options(temp.path()),
            Renderer::new(OutputFormat::Jsonl),
            false,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["kind"], "file");
        assert_eq!(lines[0]["count"], 2);
        assert_eq!(lines[1]["count"], 0);
        assert_eq!(lines[2]["kind"], "summary");
        assert_eq!(lines[2]["files_changed"], 1);
        assert_eq!(lines[2]["replacements"], 2);
    }

    #[test]
    fn test_port_dry_run_keeps_copy_unmodified() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/A.java"), "message2x\n");

        let opts = PortOptions {
            dry_run: true,
            ..options(temp.path())
        };
        let report = port(&opts, text_renderer(), true, &mut Vec::new()).unwrap();

        assert_eq!(report.total_replacements(), 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("src_icu/A.java")).unwrap(),
            "message2x\n"
        );
    }

    #[test]
    fn test_port_rerun_replaces_previous_output() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/A.java"), "message2x\n");
        let opts = options(temp.path());

        port(&opts, text_renderer(), true, &mut Vec::new()).unwrap();
        write_file(&temp.path().join("src_icu/extra.txt"), "stale");
        let report = port(&opts, text_renderer(), true, &mut Vec::new()).unwrap();

        assert_eq!(report.total_replacements(), 1);
        assert!(!temp.path().join("src_icu/extra.txt").exists());
    }
}
