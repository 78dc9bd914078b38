//! Core types, configuration, and error handling for revgate.
//!
//! This crate provides the shared foundation used by the other revgate crates:
//! - [`RevgateError`]: unified error type using `thiserror`
//! - [`RevgateConfig`]: configuration loaded from `.revgate.toml`
//! - Shared types: [`Verdict`], [`ReviewOutcome`]

mod config;
mod error;
mod types;

pub use config::{GitConfig, LlmConfig, ReduceConfig, RevgateConfig, Settings};
pub use error::RevgateError;
pub use types::{ReviewOutcome, Verdict};

/// A convenience `Result` type for revgate operations.
pub type Result<T> = std::result::Result<T, RevgateError>;
