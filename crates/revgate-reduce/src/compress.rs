//! Stage 3: lexical compression.
//!
//! Shrinks character count without discarding structural markers: blank
//! lines go, trailing comments go, import statements lose their internal
//! whitespace, and runs of short lines merge into semicolon-joined lines.
//! Deliberately lossy; the output is a denser textual hint, not valid code.

/// A line shorter than this is a candidate for merging into its predecessor.
const SHORT_LINE_LEN: usize = 20;

/// Merged lines never grow past this length.
const MERGED_LINE_LEN: usize = 80;

/// Compress text for token count. Returns the input unchanged when
/// `enabled` is false or the input is empty. Total for any input; never
/// fails.
///
/// # Examples
///
/// ```
/// use revgate_reduce::compress::compress;
///
/// let out = compress("import  os\n\nx = 1  # trailing\n", true);
/// assert!(out.contains("importos"));
/// assert!(!out.contains("trailing"));
/// ```
pub fn compress(text: &str, enabled: bool) -> String {
    if !enabled || text.is_empty() {
        return text.to_string();
    }

    let mut simplified: Vec<String> = Vec::new();
    for raw in text.split('\n') {
        if raw.trim().is_empty() {
            continue;
        }

        let line: String = if raw.starts_with("import ") || raw.starts_with("from ") {
            raw.chars().filter(|c| !c.is_whitespace()).collect()
        } else {
            raw.to_string()
        };

        let line = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line.as_str(),
        };
        let line = line.trim_end();

        // Comment-only lines vanish entirely once stripped.
        if line.is_empty() {
            continue;
        }
        simplified.push(line.to_string());
    }

    merge_short_lines(simplified).join("\n")
}

fn merge_short_lines(lines: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in lines {
        if line.len() < SHORT_LINE_LEN && current.len() + line.len() < MERGED_LINE_LEN {
            if current.is_empty() {
                current = line;
            } else {
                current.push_str("; ");
                current.push_str(&line);
            }
        } else {
            if !current.is_empty() {
                merged.push(std::mem::take(&mut current));
            }
            current = line;
        }
    }
    if !current.is_empty() {
        merged.push(current);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_returns_input_unchanged() {
        let text = "a\n\nb  # comment\n";
        assert_eq!(compress(text, false), text);
    }

    #[test]
    fn empty_input_unchanged() {
        assert_eq!(compress("", true), "");
    }

    #[test]
    fn blank_lines_removed() {
        let out = compress("first line of content here\n\n   \nsecond line of content here\n", true);
        assert_eq!(
            out,
            "first line of content here\nsecond line of content here"
        );
    }

    #[test]
    fn import_lines_lose_internal_whitespace() {
        let out = compress("import  os . path  # stdlib\n", true);
        assert_eq!(out, "importos.path");
    }

    #[test]
    fn from_import_also_simplified() {
        let out = compress("from typing import Tuple, Optional\n", true);
        assert_eq!(out, "fromtypingimportTuple,Optional");
    }

    #[test]
    fn trailing_comments_stripped() {
        let out = compress("some_variable = compute_value(1, 2)  # explain why\n", true);
        assert_eq!(out, "some_variable = compute_value(1, 2)");
    }

    #[test]
    fn comment_only_line_removed_entirely() {
        let out = compress(
            "# just a comment\nthe_first_real_line = 111\nthe_second_real_line = 222\n",
            true,
        );
        assert_eq!(out, "the_first_real_line = 111\nthe_second_real_line = 222");
    }

    #[test]
    fn short_lines_merge_with_semicolons() {
        let out = compress("a = 1\nb = 2\nc = 3\n", true);
        assert_eq!(out, "a = 1; b = 2; c = 3");
    }

    #[test]
    fn long_line_flushes_accumulator() {
        let long = "x".repeat(30);
        let input = format!("a = 1\nb = 2\n{long}\nc = 3\n");
        let out = compress(&input, true);
        // The 30-char line is not a merge candidate, but the trailing short
        // line can still join it while under the total threshold.
        assert_eq!(out, format!("a = 1; b = 2\n{long}; c = 3"));
    }

    #[test]
    fn merge_stops_at_total_threshold() {
        let chunk = "y".repeat(19); // short enough to merge
        let input = format!("{chunk}\n{chunk}\n{chunk}\n{chunk}\n{chunk}\n");
        let out = compress(&input, true);
        // 19 + 19 + 19 = 57 with separators fits; a fourth would need
        // current.len() 57+ and 57+19 < 80 still holds at 76... the exact
        // split depends on separator overhead, but no output line may exceed
        // the threshold by more than one candidate.
        for line in out.lines() {
            assert!(line.len() < MERGED_LINE_LEN + SHORT_LINE_LEN);
        }
        // All content survives merging.
        assert_eq!(out.matches(&chunk).count(), 5);
    }

    #[test]
    fn already_dense_text_unchanged() {
        let a = "a".repeat(80);
        let b = "b".repeat(80);
        let input = format!("{a}\n{b}");
        assert_eq!(compress(&input, true), input);
    }

    #[test]
    fn all_rules_combined() {
        // import line simplified, blank removed, comment-only removed,
        // trailing comment stripped, remaining short lines merged.
        let input = "import  os\n\n# comment only\nfoo = 1  # trailing\n";
        let out = compress(input, true);
        assert_eq!(out, "importos; foo = 1");
    }

    #[test]
    fn totality_over_arbitrary_bytes() {
        let weird = "\u{0}\t\r\n##\n###x\n@@ -1,2 +3,4 @@\n";
        let out = compress(weird, true);
        // Never panics; hunk markers survive (no '#' in them).
        assert!(out.contains("@@ -1,2 +3,4 @@"));
    }
}
