//! LLM review orchestration for the commit gate.
//!
//! Provides the chat client, the fixed review prompt, verdict-marker
//! parsing, and the gate logic with its auto-pass short circuits.

pub mod gate;
pub mod llm;
pub mod prompt;
pub mod verdict;
