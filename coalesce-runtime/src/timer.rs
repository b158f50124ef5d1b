// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_error::Result;
use core::fmt::Debug;
use core::future::Future;
use core::ops::Sub;
use core::time::Duration;

/// Stand-in delay for deadlines that do not fit in an `Instant`, about 30 years.
pub const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

pub trait Timer: Clone + Send + Sync + Debug + Default + 'static {
    type Sleep: Future<Output = ()> + Send;

    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + Sub<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Creates a future that completes once `deadline` has been reached.
    fn sleep_until(&self, deadline: Self::Instant) -> Self::Sleep;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// The instant `after` from now, clamped to [`FAR_FUTURE`] when the sum
    /// overflows the clock.
    fn deadline(&self, after: Duration) -> Self::Instant;

    /// Detaches `future` on the runtime backing this timer.
    ///
    /// # Errors
    ///
    /// Returns `CoalesceError::TimerUnavailable` when the runtime cannot be reached.
    fn spawn<F>(&self, future: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static;
}
