// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Coalescer configuration.
//!
//! Both option structs default to trailing-only with a zero window. With the
//! `serde` feature they deserialize with every field optional:
//!
//! ```rust,ignore
//! let options: DebounceOptions =
//!     serde_json::from_str(r#"{ "wait": { "secs": 0, "nanos": 300000000 } }"#)?;
//! ```

use crate::edge::EdgePolicy;
use coalesce_error::{CoalesceError, Result};
use core::time::Duration;

/// Options for a [`Debouncer`](crate::Debouncer).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DebounceOptions {
    /// Quiet window that must pass without calls before the trailing edge fires.
    pub wait: Duration,
    pub leading: bool,
    pub trailing: bool,
    /// Upper bound on the delay since the first call of a burst.
    pub max_wait: Option<Duration>,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            wait: Duration::ZERO,
            leading: false,
            trailing: true,
            max_wait: None,
        }
    }
}

impl DebounceOptions {
    /// Checks the options and returns the enabled edges.
    ///
    /// # Errors
    ///
    /// - [`CoalesceError::NoEdgeEnabled`] if neither edge is enabled
    /// - [`CoalesceError::MaxWaitBelowWait`] if `max_wait` is shorter than `wait`
    pub fn validate(&self) -> Result<EdgePolicy> {
        let edges = EdgePolicy::from_flags(self.leading, self.trailing)?;
        match self.max_wait {
            Some(max_wait) if max_wait < self.wait => Err(CoalesceError::MaxWaitBelowWait {
                wait: self.wait,
                max_wait,
            }),
            _ => Ok(edges),
        }
    }
}

/// Options for a [`Throttler`](crate::Throttler).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ThrottleOptions {
    /// Length of the window during which at most one invocation happens.
    pub wait: Duration,
    pub leading: bool,
    pub trailing: bool,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            wait: Duration::ZERO,
            leading: false,
            trailing: true,
        }
    }
}

impl ThrottleOptions {
    /// Checks the options and returns the enabled edges.
    ///
    /// # Errors
    ///
    /// Returns [`CoalesceError::NoEdgeEnabled`] if neither edge is enabled.
    pub fn validate(&self) -> Result<EdgePolicy> {
        EdgePolicy::from_flags(self.leading, self.trailing)
    }
}
