//! The gate: decide whether a change may be committed.

use revgate_core::{Result, ReviewOutcome, Verdict};

use crate::llm::{ChatMessage, LlmClient, Role};
use crate::prompt;
use crate::verdict;

/// Commit-message token that bypasses the review entirely.
///
/// The escape hatch for when the operator has already reviewed the change
/// and the hook would only get in the way.
pub const CONFIRM_TOKEN: &str = "confirm commit";

/// Run a review of `diff` and return the outcome.
///
/// Two short circuits never reach the network:
/// - an empty diff passes automatically (nothing to judge);
/// - a commit message containing [`CONFIRM_TOKEN`] (case-insensitive)
///   passes automatically.
///
/// # Errors
///
/// Returns [`revgate_core::RevgateError::Llm`] if the chat request fails; ambiguous
/// response *content* is not an error (it becomes a failing verdict, see
/// [`verdict::parse_verdict`]).
///
/// # Examples
///
/// ```no_run
/// use revgate_core::{LlmConfig, Verdict};
/// use revgate_review::gate::run_review;
/// use revgate_review::llm::LlmClient;
///
/// #[tokio::main]
/// async fn main() {
///     let client = LlmClient::new(&LlmConfig::default()).unwrap();
///     let outcome = run_review(&client, "", None).await.unwrap();
///     assert_eq!(outcome.verdict, Verdict::Pass);
/// }
/// ```
pub async fn run_review(
    client: &LlmClient,
    diff: &str,
    commit_msg: Option<&str>,
) -> Result<ReviewOutcome> {
    if diff.is_empty() {
        return Ok(ReviewOutcome {
            verdict: Verdict::Pass,
            report: "no code changes after reduction; review passed automatically".into(),
        });
    }

    if let Some(msg) = commit_msg {
        if msg.to_lowercase().contains(CONFIRM_TOKEN) {
            return Ok(ReviewOutcome {
                verdict: Verdict::Pass,
                report: "confirm-commit token detected; review passed automatically".into(),
            });
        }
    }

    let messages = vec![
        ChatMessage {
            role: Role::System,
            content: prompt::build_system_prompt(),
        },
        ChatMessage {
            role: Role::User,
            content: prompt::build_review_prompt(diff, commit_msg),
        },
    ];

    let response = client.chat(messages).await?;
    Ok(verdict::parse_verdict(&response))
}
