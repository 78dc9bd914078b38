//! Stage 2: structural truncation.
//!
//! Rewrites over-budget blocks down to a line budget, always keeping lines
//! that match a priority pattern (function/class/decorator declarations by
//! default) and reporting what was cut in a trailer line.

use crate::block::split_blocks;
use crate::ReduceOptions;

/// Truncate each over-budget block to its line budget.
///
/// New-file blocks get `max_new_file_lines`; modified-file blocks get
/// `max_diff_lines`. Priority-pattern matches are never dropped, even when
/// they alone exceed the budget; the remaining quota is filled with eligible
/// other lines in original order (for new files only `+` addition lines are
/// eligible). A truncated block gains a trailer of the form
/// `... (truncated N lines, new file)`; the leading ellipsis keeps it from
/// colliding with unified-diff line prefixes.
///
/// # Examples
///
/// ```
/// use revgate_core::ReduceConfig;
/// use revgate_reduce::optimize::optimize;
/// use revgate_reduce::ReduceOptions;
///
/// let options = ReduceOptions::from_config(&ReduceConfig::default()).unwrap();
/// let small = "diff --git a/a.py b/a.py\n+++ b/a.py\n+x = 1\n";
/// assert_eq!(optimize(small, &options), small);
/// ```
pub fn optimize(diff: &str, options: &ReduceOptions) -> String {
    if diff.is_empty() {
        return String::new();
    }

    let split = split_blocks(diff);

    // Any leading preamble is treated as a headerless block under the
    // modified-file budget.
    let mut segments: Vec<(bool, Vec<&str>)> = Vec::new();
    if !split.preamble.is_empty() {
        segments.push((false, split.preamble.iter().map(String::as_str).collect()));
    }
    for block in &split.blocks {
        segments.push((
            block.is_new_file,
            block.lines.iter().map(String::as_str).collect(),
        ));
    }

    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    for (is_new, lines) in segments {
        out.push(optimize_segment(is_new, &lines, options));
    }
    out.join("\n")
}

fn optimize_segment(is_new: bool, lines: &[&str], options: &ReduceOptions) -> String {
    let budget = if is_new {
        options.max_new_file_lines
    } else {
        options.max_diff_lines
    };

    if lines.len() <= budget {
        return lines.join("\n");
    }

    let mut priority: Vec<&str> = Vec::new();
    let mut other: Vec<&str> = Vec::new();
    for line in lines {
        if options.is_priority(line) {
            priority.push(line);
        } else if is_new {
            // For new files only added content is worth keeping; the +++
            // header is excluded along with context noise.
            if line.starts_with('+') && !line.starts_with("++") {
                other.push(line);
            }
        } else {
            other.push(line);
        }
    }

    // Priority lines are never dropped; the remaining quota never goes
    // negative even when they alone exceed the budget.
    let quota = budget.saturating_sub(priority.len());
    let mut kept = priority;
    kept.extend(other.into_iter().take(quota));

    let truncated = lines.len() - kept.len();
    let kind = if is_new { "new file" } else { "modified file" };
    let mut text = kept.join("\n");
    text.push_str(&format!("\n... (truncated {truncated} lines, {kind})"));
    text
}
