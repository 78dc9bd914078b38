use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The pass/fail decision extracted from a review response.
///
/// # Examples
///
/// ```
/// use revgate_core::Verdict;
///
/// let v: Verdict = serde_json::from_str("\"pass\"").unwrap();
/// assert_eq!(v, Verdict::Pass);
/// assert!(v.is_pass());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The change may be committed.
    Pass,
    /// The change was rejected or the verdict could not be determined.
    Fail,
}

impl Verdict {
    /// Returns `true` for [`Verdict::Pass`].
    pub fn is_pass(self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pass" => Ok(Verdict::Pass),
            "fail" => Ok(Verdict::Fail),
            other => Err(format!("unknown verdict: {other}")),
        }
    }
}

/// A completed review: the verdict plus the reviewer's full report text.
///
/// # Examples
///
/// ```
/// use revgate_core::{ReviewOutcome, Verdict};
///
/// let outcome = ReviewOutcome {
///     verdict: Verdict::Fail,
///     report: "### Verdict [fail]\nhardcoded credentials".into(),
/// };
/// assert!(!outcome.verdict.is_pass());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    /// Pass/fail decision.
    pub verdict: Verdict,
    /// Full report text, suitable for printing to the operator.
    pub report: String,
}
