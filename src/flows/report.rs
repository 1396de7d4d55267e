//! Follow-up report - Diff commands for comparing the output with an ICU checkout

/// Environment variable naming the ICU checkout, printed unexpanded
pub const ICU_ROOT_VAR: &str = "$ICU_ROOT";

/// A directory of the output tree and its counterpart in ICU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparePair {
    /// Relative to the output directory
    pub output_subdir: &'static str,
    /// Relative to the ICU checkout
    pub icu_subdir: &'static str,
}

/// Directories worth comparing after a run
pub const COMPARE_PAIRS: &[ComparePair] = &[
    ComparePair {
        output_subdir: "main/java/com/ibm/icu/message2x/",
        icu_subdir: "icu4j/main/core/src/main/java/com/ibm/icu/message2/",
    },
    ComparePair {
        output_subdir: "test/java/com/ibm/icu/dev/test/message2/",
        icu_subdir: "icu4j/main/core/src/test/java/com/ibm/icu/dev/test/message2/",
    },
    ComparePair {
        output_subdir: "test/resources/com/ibm/icu/dev/test/message2/",
        icu_subdir: "icu4j/main/core/src/test/resources/com/ibm/icu/dev/test/message2/",
    },
    ComparePair {
        output_subdir: "test/java/com/ibm/icu/dev/test/message2/",
        icu_subdir: "icu4j/main/common_tests/src/test/java/com/ibm/icu/dev/test/message2/",
    },
];

/// Render the block of diff commands printed at the end of a run
pub fn render_instructions(output_dir: &str, diff_tool: &str) -> String {
    let output_dir = output_dir.trim_end_matches('/');
    let mut text = String::from("\nReady to compare!\n\n");

    for pair in COMPARE_PAIRS {
        text.push_str(&format!(
            "  {} \\\n    {}/{} \\\n    {}/{}\n",
            diff_tool, output_dir, pair.output_subdir, ICU_ROOT_VAR, pair.icu_subdir
        ));
    }

    text
}
