// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::doc_markdown)]
//! Error types for the logweave merge engines
//!
//! This module defines the root [`MergeError`] type. Engine failures
//! (`InvalidFrontier`, `EmptyQueue`) live next to the failures reported by the
//! external collaborators (sources and sinks), so a single `Result` type flows
//! through a whole merge.
//!
//! # Examples
//!
//! ```
//! use logweave_core::{MergeError, Result};
//!
//! fn read_next() -> Result<Option<u64>> {
//!     Err(MergeError::source_failed("connection reset"))
//! }
//!
//! assert!(read_next().is_err());
//! ```

/// Root error type for all merge operations
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The bootstrap pulls did not produce one candidate per source that
    /// yielded a record.
    ///
    /// Fatal: the merge aborts before any record is emitted.
    #[error("Invalid frontier: expected {expected} candidates, found {actual}")]
    InvalidFrontier {
        /// Number of sources that yielded an initial record
        expected: usize,
        /// Number of candidates actually in the queue
        actual: usize,
    },

    /// `peek_min` or `extract_min` was called on an empty frontier queue
    ///
    /// The drain loop never does this, so seeing it means an engine bug.
    #[error("Frontier queue is empty")]
    EmptyQueue,

    /// A source failed to produce its next record
    #[error("Source failed: {context}")]
    SourceFailed {
        /// What went wrong while pulling
        context: String,
    },

    /// A sink rejected an emitted record or the completion signal
    #[error("Sink failed: {context}")]
    SinkFailed {
        /// What went wrong while emitting
        context: String,
    },

    /// A sink observed a call sequence that breaks the emission contract
    /// (out-of-order record, emission after completion, double completion)
    #[error("Sink contract violated: {message}")]
    SinkContract {
        /// Description of the violation
        message: String,
    },

    /// Custom error from a source or sink implementation
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl MergeError {
    /// Create an invalid frontier error
    #[must_use]
    pub const fn invalid_frontier(expected: usize, actual: usize) -> Self {
        Self::InvalidFrontier { expected, actual }
    }

    /// Create a source failure with the given context
    pub fn source_failed(context: impl Into<String>) -> Self {
        Self::SourceFailed {
            context: context.into(),
        }
    }

    /// Create a sink failure with the given context
    pub fn sink_failed(context: impl Into<String>) -> Self {
        Self::SinkFailed {
            context: context.into(),
        }
    }

    /// Create a sink contract violation with the given message
    pub fn sink_contract(message: impl Into<String>) -> Self {
        Self::SinkContract {
            message: message.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this error points at a bug in the merge engine itself
    /// rather than at one of its collaborators.
    #[must_use]
    pub const fn is_engine_bug(&self) -> bool {
        matches!(self, Self::EmptyQueue)
    }

    /// Check if this error indicates a permanent failure
    ///
    /// The engine never retries, so every error aborts the merge; this
    /// classifier tells callers whether retrying with fresh sources could
    /// possibly help.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::InvalidFrontier { .. } | Self::EmptyQueue | Self::SinkContract { .. }
        )
    }
}

/// Specialized Result type for merge operations
///
/// # Examples
///
/// ```
/// use logweave_core::Result;
///
/// fn pull() -> Result<Option<u64>> {
///     Ok(Some(42))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MergeError>;

/// Extension trait for converting foreign errors into `MergeError`
pub trait IntoMergeError {
    /// Convert this error into a source failure, prefixed with `context`
    fn into_source_error(self, context: &str) -> MergeError;

    /// Convert this error into a sink failure, prefixed with `context`
    fn into_sink_error(self, context: &str) -> MergeError;

    /// Convert this error into a `MergeError` without additional context
    fn into_merge_error(self) -> MergeError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoMergeError for E {
    fn into_source_error(self, context: &str) -> MergeError {
        MergeError::source_failed(format!("{context}: {self}"))
    }

    fn into_sink_error(self, context: &str) -> MergeError {
        MergeError::sink_failed(format!("{context}: {self}"))
    }

    fn into_merge_error(self) -> MergeError {
        MergeError::user_error(self)
    }
}
