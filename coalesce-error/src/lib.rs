// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the coalesce library
//!
//! Every failure a coalescer can report is a variant of [`CoalesceError`]. The
//! variants fall in three groups:
//!
//! - **configuration** errors, raised by builders and constructors and never at call time
//! - **timer facility** errors, fatal to the coalescer instance that hit them
//! - **callback** errors, reporting a panicking callable on the asynchronous timer path
//!
//! # Examples
//!
//! ```
//! use coalesce_error::{CoalesceError, Result};
//!
//! fn validate(leading: bool, trailing: bool) -> Result<()> {
//!     if !leading && !trailing {
//!         return Err(CoalesceError::NoEdgeEnabled);
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate(false, false).unwrap_err().is_configuration());
//! ```

use std::any::Any;
use std::time::Duration;

/// Root error type for all coalescer operations
#[derive(Debug, thiserror::Error)]
pub enum CoalesceError {
    /// Neither the leading nor the trailing edge is enabled
    ///
    /// Such a coalescer could never invoke its callable, so construction is refused.
    #[error("Invalid configuration: at least one of leading or trailing must be enabled")]
    NoEdgeEnabled,

    /// `max_wait` is shorter than the quiet window
    #[error("Invalid configuration: max_wait {max_wait:?} is shorter than wait {wait:?}")]
    MaxWaitBelowWait {
        /// The configured quiet window
        wait: Duration,
        /// The configured upper bound
        max_wait: Duration,
    },

    /// The underlying timer facility could not schedule an expiry
    ///
    /// Typically there is no async runtime reachable from the calling thread.
    #[error("Timer facility unavailable: {reason}")]
    TimerUnavailable {
        /// Why the timer could not be armed
        reason: String,
    },

    /// The coalescer previously lost its timer facility and refuses further calls
    #[error("Coalescer is faulted after a timer failure")]
    Faulted,

    /// The wrapped callable panicked during a timer-driven invocation
    #[error("Callable panicked: {context}")]
    CallbackPanic {
        /// Panic message, when one could be recovered
        context: String,
    },
}

impl CoalesceError {
    /// Create a timer-unavailable error with the given reason
    pub fn timer_unavailable(reason: impl Into<String>) -> Self {
        Self::TimerUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a callback panic error with the given context
    pub fn callback_panic(context: impl Into<String>) -> Self {
        Self::CallbackPanic {
            context: context.into(),
        }
    }

    /// Build a [`CoalesceError::CallbackPanic`] from a payload caught by `catch_unwind`
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let context = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::CallbackPanic { context }
    }

    /// Check if this error was raised while validating a configuration
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::NoEdgeEnabled | Self::MaxWaitBelowWait { .. })
    }

    /// Check if this error leaves the coalescer unusable
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::TimerUnavailable { .. } | Self::Faulted)
    }
}

/// Specialized Result type for coalescer operations
///
/// # Examples
///
/// ```
/// use coalesce_error::Result;
///
/// fn arm() -> Result<u64> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, CoalesceError>;
