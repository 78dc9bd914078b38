//! Git diff acquisition for the review gate.
//!
//! Shells out to the `git` CLI rather than linking a git library; the gate
//! only ever needs `rev-parse` and `diff`, and the system git honors the
//! user's full configuration (diff drivers, textconv, etc.).

use std::fmt;
use std::path::Path;
use std::process::Command;

use revgate_core::{Result, RevgateError};

/// What to diff against.
///
/// # Examples
///
/// ```
/// use revgate_git::DiffSource;
///
/// let source = DiffSource::Branch("main".into());
/// assert_eq!(source.to_string(), "branch main");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    /// Uncommitted working-tree changes (`git diff`).
    WorkingTree,
    /// Staged changes (`git diff --cached`).
    Staged,
    /// Difference against a named branch (`git diff <branch>`).
    Branch(String),
    /// Changes of a named revision (`git diff <commit>`).
    Commit(String),
}

impl fmt::Display for DiffSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffSource::WorkingTree => write!(f, "working tree"),
            DiffSource::Staged => write!(f, "staged"),
            DiffSource::Branch(name) => write!(f, "branch {name}"),
            DiffSource::Commit(rev) => write!(f, "commit {rev}"),
        }
    }
}

/// Returns `true` if `dir` is inside a git work tree.
///
/// # Examples
///
/// ```
/// use revgate_git::is_inside_work_tree;
/// use std::path::Path;
///
/// // /proc is never a git repository
/// assert!(!is_inside_work_tree(Path::new("/proc")));
/// ```
pub fn is_inside_work_tree(dir: &Path) -> bool {
    Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run `git diff` for the given source and return its raw output.
///
/// # Errors
///
/// Returns [`RevgateError::Git`] when `dir` is not a git repository (with
/// guidance to supply diff content directly) or when the git invocation
/// fails, carrying git's stderr.
pub fn collect_diff(
    dir: &Path,
    source: &DiffSource,
    context_lines: u32,
) -> Result<String> {
    if !is_inside_work_tree(dir) {
        return Err(RevgateError::Git(format!(
            "not a git repository: {}; provide diff content with --diff or --diff-file",
            dir.display()
        )));
    }

    let mut cmd = Command::new("git");
    cmd.arg("-C")
        .arg(dir)
        .arg("diff")
        .arg(format!("-U{context_lines}"));
    match source {
        DiffSource::WorkingTree => {}
        DiffSource::Staged => {
            cmd.arg("--cached");
        }
        DiffSource::Branch(name) => {
            cmd.arg(name);
        }
        DiffSource::Commit(rev) => {
            cmd.arg(rev);
        }
    }

    let output = cmd.output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RevgateError::Git(format!(
            "git diff failed: {}",
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
