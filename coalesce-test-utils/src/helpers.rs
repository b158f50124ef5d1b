// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::task::yield_now;
use tokio::time::advance;

const SETTLE_YIELDS: usize = 8;

/// Yields enough times for woken timer tasks to run to completion.
pub async fn settle() {
    for _ in 0..SETTLE_YIELDS {
        yield_now().await;
    }
}

/// Advances the paused clock by `millis` and lets expired timers fire.
///
/// Requires `tokio::time::pause()` to have been called.
pub async fn advance_and_settle(millis: u64) {
    advance(Duration::from_millis(millis)).await;
    settle().await;
}
