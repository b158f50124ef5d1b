// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Invocation coalescers: debounce and throttle for closely-spaced calls.
//!
//! A coalescer wraps one callable and reduces a stream of "call it with these
//! arguments" requests to fewer actual invocations:
//!
//! - **`Debouncer`** - invokes after calls stop arriving for a quiet window,
//!   optionally on the leading edge and bounded by a max wait
//! - **`Throttler`** - invokes at most once per window, on the leading and/or
//!   trailing edge
//!
//! Only the latest arguments are ever invoked; earlier ones are dropped.
//! `call`, `cancel` and `flush` never block. Scheduled invocations run later on
//! the async runtime selected by feature:
//! - `runtime-tokio` (default) - `TokioTimer`
//! - `runtime-smol` - `SmolTimer`
//!
//! # Example
//!
//! ```rust,no_run
//! use coalesce::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> coalesce::Result<()> {
//! let save = Debouncer::builder(|draft: String| draft.len())
//!     .wait(Duration::from_millis(500))
//!     .max_wait(Duration::from_secs(2))
//!     .build()?;
//!
//! for draft in ["h", "he", "hel", "hell", "hello"] {
//!     save.call(draft.to_string())?;
//! }
//!
//! // Force the pending save instead of waiting for the quiet window.
//! assert_eq!(save.flush(), Some(5));
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod logging;

mod debounce;
mod edge;
mod invoker;
mod options;
mod shared;
mod slot;
mod throttle;

pub mod prelude;

pub use coalesce_error::{CoalesceError, Result};
pub use coalesce_runtime::{DefaultTimer, Timer};
pub use debounce::{Debouncer, DebouncerBuilder};
pub use edge::EdgePolicy;
pub use options::{DebounceOptions, ThrottleOptions};
pub use shared::{CoalescerStats, ErrorHook};
pub use slot::PendingCall;
pub use throttle::{Throttler, ThrottlerBuilder};

#[cfg(feature = "runtime-tokio")]
pub use coalesce_runtime::TokioTimer;

#[cfg(feature = "runtime-smol")]
pub use coalesce_runtime::SmolTimer;
