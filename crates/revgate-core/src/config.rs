use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RevgateError;
use crate::Result;

/// Top-level configuration loaded from `.revgate.toml`.
///
/// Supports layered resolution: CLI flags > config file > environment
/// (API key only) > built-in defaults.
///
/// # Examples
///
/// ```
/// use revgate_core::RevgateConfig;
///
/// let config = RevgateConfig::default();
/// assert_eq!(config.reduce.max_diff_lines, 500);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevgateConfig {
    /// LLM endpoint settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Diff reduction settings.
    #[serde(default)]
    pub reduce: ReduceConfig,
    /// Git invocation settings.
    #[serde(default)]
    pub git: GitConfig,
    /// Miscellaneous behavior settings.
    #[serde(default)]
    pub settings: Settings,
}

impl RevgateConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RevgateError::FileNotFound`] if `path` does not exist,
    /// [`RevgateError::Io`] if it cannot be read, or [`RevgateError::Toml`]
    /// if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use revgate_core::RevgateConfig;
    /// use std::path::Path;
    ///
    /// let config = RevgateConfig::from_file(Path::new(".revgate.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RevgateError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`RevgateError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use revgate_core::RevgateConfig;
    ///
    /// let toml = r#"
    /// [reduce]
    /// max_diff_lines = 300
    /// "#;
    /// let config = RevgateConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.reduce.max_diff_lines, 300);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// LLM endpoint configuration.
///
/// The `api_url` holds the full chat-completions URL, so any
/// OpenAI-compatible endpoint can be pointed at directly.
///
/// # Examples
///
/// ```
/// use revgate_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert_eq!(config.model, "gpt-4o-mini");
/// assert_eq!(config.max_tokens, 1000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the endpoint.
    pub api_key: Option<String>,
    /// Full chat-completions URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens to generate per request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f64 {
    0.1
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Diff reduction configuration consumed by all three pipeline stages.
///
/// # Examples
///
/// ```
/// use revgate_core::ReduceConfig;
///
/// let config = ReduceConfig::default();
/// assert!(config.file_extensions.is_empty());
/// assert_eq!(config.max_new_file_lines, 200);
/// assert_eq!(config.priority_patterns.len(), 3);
/// assert!(config.enable_compression);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReduceConfig {
    /// File-name suffixes to keep (e.g. `.py`, `.rs`); empty keeps everything.
    #[serde(default)]
    pub file_extensions: Vec<String>,
    /// Maximum lines a newly-added file's block may keep (default: 200).
    #[serde(default = "default_max_new_file_lines")]
    pub max_new_file_lines: usize,
    /// Maximum lines a modified file's block may keep (default: 500).
    #[serde(default = "default_max_diff_lines")]
    pub max_diff_lines: usize,
    /// Regex patterns whose matching lines are never truncated.
    #[serde(default = "default_priority_patterns")]
    pub priority_patterns: Vec<String>,
    /// Enable the lexical compression stage (default: true).
    #[serde(default = "default_enable_compression")]
    pub enable_compression: bool,
}

fn default_max_new_file_lines() -> usize {
    200
}

fn default_max_diff_lines() -> usize {
    500
}

fn default_priority_patterns() -> Vec<String> {
    vec![
        // function definitions
        r"^\s*def\s+\w+\(".into(),
        // class definitions
        r"^\s*class\s+\w+".into(),
        // decorators
        r"^\s*@\w+".into(),
    ]
}

fn default_enable_compression() -> bool {
    true
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            file_extensions: Vec::new(),
            max_new_file_lines: default_max_new_file_lines(),
            max_diff_lines: default_max_diff_lines(),
            priority_patterns: default_priority_patterns(),
            enable_compression: default_enable_compression(),
        }
    }
}

/// Git invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Context lines passed to `git diff -U<n>` (default: 10).
    #[serde(default = "default_context_lines")]
    pub context_lines: u32,
}

fn default_context_lines() -> u32 {
    10
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
        }
    }
}

/// Miscellaneous behavior settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Print per-stage diagnostics to stderr.
    #[serde(default)]
    pub verbose: bool,
}
