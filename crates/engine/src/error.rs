//! The module contains the errors the engine can return.
//!
//! The engine never fails on remote data anomalies (dangling categories,
//! zero goal targets); errors only arise when building values from raw input:
//!
//! - [`InvalidAmount`] for amounts that are not a finite, cent-precise number.
//! - [`InvalidDraft`] for drafts rejected before they reach the server.
//! - [`InvalidValue`] for unparsable enum-like input (kinds, sort keys).
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDraft`]: EngineError::InvalidDraft
//!  [`InvalidValue`]: EngineError::InvalidValue
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid draft: {0}")]
    InvalidDraft(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
