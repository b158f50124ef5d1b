// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Owned, cancelable single-shot alarm.
//!
//! A [`TimerHandle`] is held by exactly one coalescer. Every `arm` spawns one
//! task that races a sleep against a [`CancellationToken`]; at most one arm is
//! live at a time, so re-arming cancels the previous one first.
//!
//! Cancellation is cooperative. An expiry that has already been dispatched on
//! another worker thread can still reach its callback after `cancel()`, which
//! is why every arm carries an [`Epoch`]: the owner re-checks it with
//! [`TimerHandle::expire`] under its own lock and ignores stale firings.

use crate::cancellation_token::CancellationToken;
use crate::timer::Timer;
use coalesce_error::Result;
use core::time::Duration;
use futures::future::{select, Either};
use futures::pin_mut;

/// Identifies one arm of a [`TimerHandle`].
pub type Epoch = u64;

#[derive(Debug)]
pub struct TimerHandle<TM: Timer> {
    timer: TM,
    epoch: Epoch,
    live: Option<CancellationToken>,
}

impl<TM: Timer> TimerHandle<TM> {
    pub fn new(timer: TM) -> Self {
        Self {
            timer,
            epoch: 0,
            live: None,
        }
    }

    /// Schedules `on_expire` to run once after `duration`, replacing any live arm.
    ///
    /// The deadline is computed now, not when the spawned task is first polled.
    /// `on_expire` receives the epoch of this arm.
    ///
    /// # Errors
    ///
    /// Returns `CoalesceError::TimerUnavailable` if the runtime refused the task.
    /// The handle is left disarmed in that case.
    pub fn arm<F>(&mut self, duration: Duration, on_expire: F) -> Result<Epoch>
    where
        F: FnOnce(Epoch) + Send + 'static,
    {
        self.cancel();
        self.epoch = self.epoch.wrapping_add(1);

        let epoch = self.epoch;
        let deadline = self.timer.deadline(duration);
        let token = CancellationToken::new();
        let cancel = token.clone();
        let timer = self.timer.clone();

        self.timer.spawn(async move {
            let sleep = timer.sleep_until(deadline);
            let cancelled = cancel.cancelled();
            pin_mut!(sleep, cancelled);

            if let Either::Left(_) = select(sleep, cancelled).await {
                if !cancel.is_cancelled() {
                    on_expire(epoch);
                }
            }
        })?;

        self.live = Some(token);
        Ok(epoch)
    }

    /// Cancels the live arm, if any. Safe to call at any time.
    pub fn cancel(&mut self) {
        if let Some(token) = self.live.take() {
            token.cancel();
        }
    }

    /// Consumes the expiry of `epoch`.
    ///
    /// Returns `true` and disarms the handle only when `epoch` is the live arm.
    /// Cancelled or superseded arms return `false`.
    pub fn expire(&mut self, epoch: Epoch) -> bool {
        if self.live.is_some() && self.epoch == epoch {
            self.live = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.live.is_some()
    }

    /// Epoch of the most recent arm, live or not.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
}

impl<TM: Timer> Drop for TimerHandle<TM> {
    fn drop(&mut self) {
        self.cancel();
    }
}
