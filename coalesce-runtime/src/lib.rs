// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime seam for the coalesce library.
//!
//! - **`Timer` trait** - sleep, monotonic clock and detached spawning for one async runtime
//! - **`TimerHandle`** - an owned, cancelable single-shot alarm built on a `Timer`
//! - **`CancellationToken`** - runtime-agnostic cancellation signal used by `TimerHandle`
//!
//! Enable the runtime in your `Cargo.toml`:
//! - `runtime-tokio` (default) - `TokioTimer`
//! - `runtime-smol` - `SmolTimer`

pub mod cancellation_token;
pub mod impls;
pub mod timer;
pub mod timer_handle;

pub use cancellation_token::CancellationToken;
pub use timer::{Timer, FAR_FUTURE};
pub use timer_handle::{Epoch, TimerHandle};

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::TokioTimer;

#[cfg(feature = "runtime-smol")]
pub use impls::smol::SmolTimer;

/// Timer used when a coalescer is built without an explicit one.
#[cfg(feature = "runtime-tokio")]
pub type DefaultTimer = TokioTimer;

/// Timer used when a coalescer is built without an explicit one.
#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultTimer = SmolTimer;
