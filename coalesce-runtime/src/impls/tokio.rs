// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
use core::future::Future;

#[cfg(feature = "runtime-tokio")]
use coalesce_error::{CoalesceError, Result};

#[cfg(feature = "runtime-tokio")]
use crate::timer::{Timer, FAR_FUTURE};

#[cfg(feature = "runtime-tokio")]
use core::time::Duration;

/// Timer backed by the tokio time driver.
///
/// Instants are `tokio::time::Instant`, so a paused test clock
/// (`tokio::time::pause`) drives every coalescer built on this timer.
#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Debug, Default)]
pub struct TokioTimer;

#[cfg(feature = "runtime-tokio")]
impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;

    type Instant = tokio::time::Instant;

    fn sleep_until(&self, deadline: Self::Instant) -> Self::Sleep {
        tokio::time::sleep_until(deadline)
    }

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn deadline(&self, after: Duration) -> Self::Instant {
        let now = self.now();
        now.checked_add(after).unwrap_or(now + FAR_FUTURE)
    }

    fn spawn<F>(&self, future: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|err| CoalesceError::timer_unavailable(err.to_string()))?;
        drop(handle.spawn(future));
        Ok(())
    }
}
