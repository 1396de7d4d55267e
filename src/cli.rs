//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::core::model::{
    PortOptions, TokenRule, DEFAULT_DIFF_TOOL, DEFAULT_EXTENSION, DEFAULT_FROM_TOKEN,
    DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR, DEFAULT_TO_TOKEN,
};
use crate::core::render::{OutputFormat, Renderer};

/// toicu - convert the standalone MessageFormat 2 sources to ICU ones.
#[derive(Parser, Debug)]
#[command(name = "toicu")]
#[command(
    author,
    version,
    about,
    long_about = r#"toicu prepares a renamed copy of the standalone MessageFormat 2 sources
so they can be compared against an ICU checkout.

A run:
1. removes the previous output directory (src_icu)
2. copies src/ to src_icu
3. rewrites message2x to message2 in every .java file of the copy,
   printing "<path> : <count>" per file
4. prints the diff commands to compare src_icu with $ICU_ROOT

Running without arguments uses exactly these defaults.

Examples:
    toicu
    toicu --verify
    toicu --dry-run --format jsonl
    toicu --src mf2/src --out build/src_icu --diff-tool meld
"#
)]
pub struct Cli {
    /// Source directory to copy.
    #[arg(long = "src", default_value = DEFAULT_SOURCE_DIR, value_name = "DIR")]
    pub source_dir: PathBuf,

    /// Output directory (removed and recreated on every run).
    #[arg(
        long = "out",
        default_value = DEFAULT_OUTPUT_DIR,
        value_name = "DIR",
        long_help = "Output directory. Any existing directory at this path is removed before\n\
the copy. It must not overlap the source directory."
    )]
    pub output_dir: PathBuf,

    /// Extension of the files to rewrite (without the dot).
    #[arg(long = "ext", default_value = DEFAULT_EXTENSION, value_name = "EXT")]
    pub extension: String,

    /// Token to replace.
    #[arg(long, default_value = DEFAULT_FROM_TOKEN, value_name = "TOKEN")]
    pub from: String,

    /// Replacement token.
    #[arg(long, default_value = DEFAULT_TO_TOKEN, value_name = "TOKEN")]
    pub to: String,

    /// Only replace the token where it is not part of a longer word.
    #[arg(
        long,
        long_help = "Only replace occurrences of the token that are not embedded in a longer\n\
identifier. By default any substring match is replaced, so message2xy becomes message2y."
    )]
    pub whole_word: bool,

    /// Report counts without replacing any file in the output tree.
    #[arg(long)]
    pub dry_run: bool,

    /// Check that files outside the rewritten set are identical to the source.
    #[arg(long)]
    pub verify: bool,

    /// Diff tool named in the follow-up commands.
    #[arg(
        long,
        env = "TOICU_DIFF_TOOL",
        default_value = DEFAULT_DIFF_TOOL,
        value_name = "TOOL"
    )]
    pub diff_tool: String,

    /// Output format (text/jsonl).
    #[arg(
        long,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default): colored \"<path> : <count>\" lines and the diff commands\n\
- jsonl: one JSON object per file followed by a summary object"
    )]
    pub format: String,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored output. Colors are also disabled when NO_COLOR is set\n\
or stdout is not a terminal."
    )]
    pub no_color: bool,

    /// Quiet mode (no stage lines, errors only on stderr).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build run options from the parsed arguments
    pub fn port_options(&self) -> PortOptions {
        PortOptions {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            extension: self.extension.trim_start_matches('.').to_string(),
            rule: TokenRule::new(&self.from, &self.to).with_whole_word(self.whole_word),
            dry_run: self.dry_run,
            verify: self.verify,
            diff_tool: self.diff_tool.clone(),
        }
    }
}

/// Install the stderr diagnostics subscriber; `RUST_LOG` wins over the flags
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose, cli.quiet);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let renderer = Renderer::new(format);

    crate::flows::port::run_port(&cli.port_options(), renderer, cli.quiet)
}
