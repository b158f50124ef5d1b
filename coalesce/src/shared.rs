// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_error::CoalesceError;
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Receives failures raised on the asynchronous timer-expiry path.
pub type ErrorHook = Arc<dyn Fn(CoalesceError) + Send + Sync>;

/// Point-in-time view of a coalescer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoalescerStats {
    /// How many times the callable has run.
    pub invocations: u64,
    /// Whether arguments are waiting for a trailing invocation.
    pub pending: bool,
    /// Whether a quiet-window or rate-window timer is live.
    pub armed: bool,
    /// Whether a timer failure has disabled the coalescer.
    pub faulted: bool,
}

/// State shared between a coalescer handle and the timers it arms.
///
/// Every transition takes the one lock, so a call racing a timer expiry never
/// observes half-updated state.
pub(crate) struct Shared<S> {
    pub(crate) state: Mutex<S>,
    on_error: Option<ErrorHook>,
}

impl<S> Shared<S> {
    pub(crate) fn new(state: S, on_error: Option<ErrorHook>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            on_error,
        })
    }

    /// Runs a timer-expiry transition under the lock.
    ///
    /// Nobody is waiting on a timer task, so a panicking callable is caught here
    /// and routed to the error hook instead of being lost with the task.
    pub(crate) fn expire(&self, transition: impl FnOnce(&mut S)) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut state = self.state.lock();
            transition(&mut *state);
        }));

        if let Err(payload) = outcome {
            let err = CoalesceError::from_panic(payload);
            error!("coalescer callable panicked on timer expiry: {}", err);
            if let Some(on_error) = &self.on_error {
                on_error(err);
            }
        }
    }
}
