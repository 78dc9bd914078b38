use std::fmt;

/// One file's change in a unified diff: a maximal run of lines starting at a
/// `diff --git` header and ending before the next one.
///
/// # Examples
///
/// ```
/// use revgate_reduce::block::split_blocks;
///
/// let diff = "diff --git a/hello.py b/hello.py\n\
///             --- a/hello.py\n\
///             +++ b/hello.py\n\
///             @@ -1 +1,2 @@\n \
///             print('hi')\n\
///             +print('bye')\n";
/// let split = split_blocks(diff);
/// assert_eq!(split.blocks.len(), 1);
/// assert_eq!(split.blocks[0].target_path.as_deref(), Some("hello.py"));
/// assert!(!split.blocks[0].is_new_file);
/// ```
#[derive(Debug, Clone)]
pub struct DiffBlock {
    /// Path from the `+++ b/` line, prefix stripped. `None` until that line
    /// is seen (binary-file notices never set it).
    pub target_path: Option<String>,
    /// Whether a `+++ b/` line appeared before any `--- a/` line. An
    /// ordering heuristic for newly-added files; some diff generators order
    /// headers differently, so it is best-effort.
    pub is_new_file: bool,
    /// Raw lines, header included, in input order.
    pub lines: Vec<String>,
}

impl DiffBlock {
    fn start(header: &str) -> Self {
        Self {
            target_path: None,
            is_new_file: false,
            lines: vec![header.to_string()],
        }
    }

    fn push(&mut self, line: &str) {
        if let Some(path) = line.strip_prefix("+++ b/") {
            if !self.lines.iter().any(|l| l.starts_with("--- a/")) {
                self.is_new_file = true;
            }
            self.target_path = Some(path.to_string());
        }
        self.lines.push(line.to_string());
    }

    /// Returns `true` if the target path ends with any of the given suffixes.
    /// A block whose `+++ b/` line was never seen matches nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use revgate_reduce::block::split_blocks;
    ///
    /// let diff = "diff --git a/x.py b/x.py\n+++ b/x.py\n";
    /// let split = split_blocks(diff);
    /// assert!(split.blocks[0].matches_suffix(&[".py".into()]));
    /// assert!(!split.blocks[0].matches_suffix(&[".rs".into()]));
    /// ```
    pub fn matches_suffix(&self, suffixes: &[String]) -> bool {
        match &self.target_path {
            Some(path) => suffixes.iter().any(|s| path.ends_with(s.as_str())),
            None => false,
        }
    }
}

impl fmt::Display for DiffBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} lines)",
            self.target_path.as_deref().unwrap_or("<unknown>"),
            self.lines.len()
        )
    }
}

/// An exhaustive, non-overlapping partition of a diff into preamble lines
/// (anything before the first `diff --git` header) and [`DiffBlock`]s.
#[derive(Debug, Clone, Default)]
pub struct DiffSplit {
    /// Lines preceding the first block header.
    pub preamble: Vec<String>,
    /// Blocks in input order.
    pub blocks: Vec<DiffBlock>,
}

/// Partition diff text into preamble and per-file blocks.
///
/// Splits on `\n` (not [`str::lines`]) so that rejoining with `\n` is
/// byte-faithful, including a trailing newline in the input.
///
/// # Examples
///
/// ```
/// use revgate_reduce::block::split_blocks;
///
/// let split = split_blocks("not a diff at all");
/// assert!(split.blocks.is_empty());
/// assert_eq!(split.preamble, vec!["not a diff at all"]);
/// ```
pub fn split_blocks(input: &str) -> DiffSplit {
    let mut split = DiffSplit::default();
    for line in input.split('\n') {
        if line.starts_with("diff --git") {
            split.blocks.push(DiffBlock::start(line));
        } else if let Some(block) = split.blocks.last_mut() {
            block.push(line);
        } else {
            split.preamble.push(line.to_string());
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FILES: &str = "\
diff --git a/src/app.py b/src/app.py
index abc1234..def5678 100644
--- a/src/app.py
+++ b/src/app.py
@@ -1,3 +1,4 @@
 def main():
+    run()
     pass
diff --git a/README.md b/README.md
--- a/README.md
+++ b/README.md
@@ -1 +1,2 @@
 # readme
+more
";

    #[test]
    fn empty_input_has_one_empty_preamble_line() {
        let split = split_blocks("");
        assert!(split.blocks.is_empty());
        assert_eq!(split.preamble, vec![""]);
    }

    #[test]
    fn two_blocks_partitioned_in_order() {
        let split = split_blocks(TWO_FILES);
        assert!(split.preamble.is_empty());
        assert_eq!(split.blocks.len(), 2);
        assert_eq!(split.blocks[0].target_path.as_deref(), Some("src/app.py"));
        assert_eq!(split.blocks[1].target_path.as_deref(), Some("README.md"));
    }

    #[test]
    fn rejoining_blocks_is_byte_faithful() {
        let split = split_blocks(TWO_FILES);
        let mut lines: Vec<&str> = Vec::new();
        for block in &split.blocks {
            lines.extend(block.lines.iter().map(String::as_str));
        }
        assert_eq!(lines.join("\n"), TWO_FILES);
    }

    #[test]
    fn new_file_detected_from_header_order() {
        let diff = "\
diff --git a/new.py b/new.py
new file mode 100644
+++ b/new.py
@@ -0,0 +1,2 @@
+a = 1
+b = 2
";
        let split = split_blocks(diff);
        assert!(split.blocks[0].is_new_file);
    }

    #[test]
    fn modified_file_not_marked_new() {
        let split = split_blocks(TWO_FILES);
        assert!(!split.blocks[0].is_new_file);
        assert!(!split.blocks[1].is_new_file);
    }

    #[test]
    fn dev_null_old_side_still_counts_as_seen() {
        // "--- /dev/null" does not match "--- a/", so the ordering heuristic
        // classifies this as a new file.
        let diff = "\
diff --git a/new.py b/new.py
--- /dev/null
+++ b/new.py
@@ -0,0 +1 @@
+x = 1
";
        let split = split_blocks(diff);
        assert!(split.blocks[0].is_new_file);
    }

    #[test]
    fn block_without_target_path_matches_nothing() {
        let diff = "\
diff --git a/image.png b/image.png
Binary files a/image.png and b/image.png differ
";
        let split = split_blocks(diff);
        assert!(split.blocks[0].target_path.is_none());
        assert!(!split.blocks[0].matches_suffix(&[".png".into()]));
    }

    #[test]
    fn preamble_collected_before_first_header() {
        let diff = "commit message noise\ndiff --git a/x.py b/x.py\n+++ b/x.py\n";
        let split = split_blocks(diff);
        assert_eq!(split.preamble, vec!["commit message noise"]);
        assert_eq!(split.blocks.len(), 1);
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        let diff = "diff --git a/x.PY b/x.PY\n+++ b/x.PY\n";
        let split = split_blocks(diff);
        assert!(!split.blocks[0].matches_suffix(&[".py".into()]));
        assert!(split.blocks[0].matches_suffix(&[".PY".into()]));
    }
}
