// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the coalesce library.
//!
//! Designed for development and testing only, not for production code.
//!
//! - [`Recorder`] - a callable factory that remembers every invocation with its arguments
//!   and the (paused) tokio instant it ran at
//! - [`helpers`] - clock helpers for driving timers under `tokio::time::pause`
//! - [`test_data`] - keystroke fixtures
//!
//! ```rust
//! use coalesce_test_utils::Recorder;
//!
//! let recorder = Recorder::new();
//! let mut callable = recorder.callable();
//!
//! assert_eq!(callable("abc"), "abc");
//! assert_eq!(recorder.args(), vec!["abc"]);
//! ```

pub mod helpers;
pub mod recorder;
pub mod test_data;

pub use helpers::{advance_and_settle, settle};
pub use recorder::Recorder;
