//! Verdict-marker parsing.

use revgate_core::{ReviewOutcome, Verdict};

/// Marker the model must emit to approve the change.
pub const PASS_MARKER: &str = "### Verdict [pass]";

/// Marker the model must emit to reject the change.
pub const FAIL_MARKER: &str = "### Verdict [fail]";

/// Annotation appended when no marker could be found.
const MANUAL_REVIEW_NOTE: &str =
    "warning: no explicit verdict found in the response, requires manual review";

/// Extract the pass/fail verdict from a review response.
///
/// An ambiguous or missing marker is never treated as approval: the outcome
/// is [`Verdict::Fail`] with a manual-review annotation appended to the
/// report, so a human intervenes instead of the gate silently passing.
///
/// # Examples
///
/// ```
/// use revgate_core::Verdict;
/// use revgate_review::verdict::parse_verdict;
///
/// let outcome = parse_verdict("### Verdict [pass]\n### Details\nlooks fine");
/// assert_eq!(outcome.verdict, Verdict::Pass);
///
/// let outcome = parse_verdict("I am not sure about this one.");
/// assert_eq!(outcome.verdict, Verdict::Fail);
/// assert!(outcome.report.contains("manual review"));
/// ```
pub fn parse_verdict(response: &str) -> ReviewOutcome {
    let report = response.trim().to_string();

    if report.contains(PASS_MARKER) {
        ReviewOutcome {
            verdict: Verdict::Pass,
            report,
        }
    } else if report.contains(FAIL_MARKER) {
        ReviewOutcome {
            verdict: Verdict::Fail,
            report,
        }
    } else {
        ReviewOutcome {
            verdict: Verdict::Fail,
            report: format!("{report}\n{MANUAL_REVIEW_NOTE}"),
        }
    }
}
