//! Stage 1: extension filtering.
//!
//! Drops entire per-file blocks whose target path does not end with one of
//! the configured suffixes. With an empty allow-list the stage is the
//! identity function.

use crate::block::split_blocks;

/// Keep only the diff blocks whose `+++ b/` path ends with one of `suffixes`.
///
/// An empty `suffixes` list returns the input unchanged, byte for byte.
/// Otherwise kept blocks are concatenated in original order with original
/// line content; blocks that never present a `+++ b/` line (binary notices,
/// truncated input) are dropped, as are any preamble lines before the first
/// header.
///
/// # Examples
///
/// ```
/// use revgate_reduce::filter::filter_extensions;
///
/// let diff = "diff --git a/a.py b/a.py\n+++ b/a.py\n+x = 1\n\
///             diff --git a/b.md b/b.md\n+++ b/b.md\n+# doc\n";
/// let out = filter_extensions(diff, &[".py".into()]);
/// assert!(out.contains("a.py"));
/// assert!(!out.contains("b.md"));
/// ```
pub fn filter_extensions(diff: &str, suffixes: &[String]) -> String {
    if suffixes.is_empty() {
        return diff.to_string();
    }

    let split = split_blocks(diff);
    let mut kept: Vec<&str> = Vec::new();
    for block in &split.blocks {
        if block.matches_suffix(suffixes) {
            kept.extend(block.lines.iter().map(String::as_str));
        }
    }
    kept.join("\n")
}
