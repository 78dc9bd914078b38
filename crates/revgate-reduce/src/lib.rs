//! Diff reduction pipeline: extension filtering, structural truncation, and
//! lexical compression.
//!
//! Prepares raw `git diff` output for a token-budgeted LLM prompt. Three
//! pure text-to-text stages compose strictly forward:
//!
//! 1. [`filter::filter_extensions`]: drop whole per-file blocks outside the
//!    extension allow-list
//! 2. [`optimize::optimize`]: truncate over-budget blocks, protecting
//!    priority-pattern lines
//! 3. [`compress::compress`]: blank-line removal, comment stripping, and
//!    short-line merging
//!
//! Every stage is total over arbitrary text, holds no state, and performs no
//! I/O; malformed input degrades to pass-through or empty output rather than
//! failing.

use std::fmt;

use regex::Regex;
use revgate_core::{ReduceConfig, Result, RevgateError};

pub mod block;
pub mod compress;
pub mod filter;
pub mod optimize;

/// Compiled reduction options shared by all three stages.
///
/// Built from a [`ReduceConfig`] with the priority patterns compiled once.
///
/// # Examples
///
/// ```
/// use revgate_core::ReduceConfig;
/// use revgate_reduce::ReduceOptions;
///
/// let options = ReduceOptions::from_config(&ReduceConfig::default()).unwrap();
/// assert!(options.is_priority("    def handler(request):"));
/// assert!(!options.is_priority("    x = 1"));
/// ```
#[derive(Debug, Clone)]
pub struct ReduceOptions {
    /// Allow-listed file-name suffixes; empty keeps everything.
    pub extensions: Vec<String>,
    /// Line budget for newly-added files.
    pub max_new_file_lines: usize,
    /// Line budget for modified files.
    pub max_diff_lines: usize,
    /// Compiled priority patterns.
    pub priority_patterns: Vec<Regex>,
    /// Whether the compression stage runs.
    pub compression: bool,
}

impl ReduceOptions {
    /// Compile options from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RevgateError::Config`] if any priority pattern is not a
    /// valid regular expression.
    pub fn from_config(config: &ReduceConfig) -> Result<Self> {
        let mut priority_patterns = Vec::with_capacity(config.priority_patterns.len());
        for pattern in &config.priority_patterns {
            let re = Regex::new(pattern).map_err(|e| {
                RevgateError::Config(format!("invalid priority pattern {pattern:?}: {e}"))
            })?;
            priority_patterns.push(re);
        }
        Ok(Self {
            extensions: config.file_extensions.clone(),
            max_new_file_lines: config.max_new_file_lines,
            max_diff_lines: config.max_diff_lines,
            priority_patterns,
            compression: config.enable_compression,
        })
    }

    /// Returns `true` if the line matches any priority pattern.
    pub fn is_priority(&self, line: &str) -> bool {
        self.priority_patterns.iter().any(|re| re.is_match(line))
    }
}

impl Default for ReduceOptions {
    fn default() -> Self {
        // The built-in patterns are static and known-valid.
        Self::from_config(&ReduceConfig::default()).expect("default patterns compile")
    }
}

/// Pipeline stage identifier, passed to the diagnostic observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Extension filtering.
    Filter,
    /// Structural truncation.
    Optimize,
    /// Lexical compression.
    Compress,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Filter => write!(f, "filter"),
            Stage::Optimize => write!(f, "optimize"),
            Stage::Compress => write!(f, "compress"),
        }
    }
}

/// Observer invoked with each stage's output, for diagnostics.
pub type StageObserver<'a> = dyn Fn(Stage, &str) + 'a;

/// Run the full reduction pipeline: filter → optimize → compress.
///
/// # Examples
///
/// ```
/// use revgate_reduce::{reduce, ReduceOptions};
///
/// let out = reduce("", &ReduceOptions::default());
/// assert!(out.is_empty());
/// ```
pub fn reduce(diff: &str, options: &ReduceOptions) -> String {
    reduce_with_observer(diff, options, None)
}

/// Like [`reduce`], invoking `observer` with each intermediate result.
///
/// The observer is a side channel for the surrounding system (the CLI hooks
/// one up under `--verbose`); the pipeline itself stays pure.
pub fn reduce_with_observer(
    diff: &str,
    options: &ReduceOptions,
    observer: Option<&StageObserver>,
) -> String {
    let filtered = filter::filter_extensions(diff, &options.extensions);
    if let Some(observe) = observer {
        observe(Stage::Filter, &filtered);
    }

    let optimized = optimize::optimize(&filtered, options);
    if let Some(observe) = observer {
        observe(Stage::Optimize, &optimized);
    }

    let compressed = compress::compress(&optimized, options.compression);
    if let Some(observe) = observer {
        observe(Stage::Compress, &compressed);
    }

    compressed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_compile() {
        let options = ReduceOptions::default();
        assert_eq!(options.priority_patterns.len(), 3);
        assert!(options.compression);
        assert!(options.extensions.is_empty());
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let config = ReduceConfig {
            priority_patterns: vec!["[unclosed".into()],
            ..ReduceConfig::default()
        };
        let err = ReduceOptions::from_config(&config).unwrap_err();
        assert!(matches!(err, RevgateError::Config(_)));
        assert!(err.to_string().contains("[unclosed"));
    }

    #[test]
    fn priority_matches_defaults() {
        let options = ReduceOptions::default();
        assert!(options.is_priority("def handler(request):"));
        assert!(options.is_priority("  class Widget:"));
        assert!(options.is_priority("@staticmethod"));
        assert!(!options.is_priority("@@ -1,2 +3,4 @@"));
        assert!(!options.is_priority("x = 1"));
    }

    #[test]
    fn observer_sees_all_three_stages_in_order() {
        use std::cell::RefCell;

        let seen = RefCell::new(Vec::new());
        let observer = |stage: Stage, _out: &str| {
            seen.borrow_mut().push(stage);
        };
        reduce_with_observer("x = 1\n", &ReduceOptions::default(), Some(&observer));
        assert_eq!(
            *seen.borrow(),
            vec![Stage::Filter, Stage::Optimize, Stage::Compress]
        );
    }

    #[test]
    fn stage_display_names() {
        assert_eq!(Stage::Filter.to_string(), "filter");
        assert_eq!(Stage::Optimize.to_string(), "optimize");
        assert_eq!(Stage::Compress.to_string(), "compress");
    }

    #[test]
    fn compression_can_be_disabled() {
        let config = ReduceConfig {
            enable_compression: false,
            ..ReduceConfig::default()
        };
        let options = ReduceOptions::from_config(&config).unwrap();
        let text = "short\n\nlines\n";
        // Filter (no extensions) and optimize (under budget) pass through;
        // with compression off the blank line survives.
        assert_eq!(reduce(text, &options), text);
    }
}
