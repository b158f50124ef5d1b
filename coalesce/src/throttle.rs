// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Throttle coalescer.
//!
//! A [`Throttler`] invokes its callable at most once per window:
//! - **leading**: the call that opens a window is invoked immediately
//! - **trailing** (default): when the window closes, the latest call made
//!   during it is invoked
//!
//! A window opens on the first call while none is live and closes when its
//! timer expires; no new window opens until the next call.

use crate::edge::EdgePolicy;
use crate::invoker::{Callable, Invoker};
use crate::options::ThrottleOptions;
use crate::shared::{CoalescerStats, ErrorHook, Shared};
use crate::slot::PendingCall;
use coalesce_error::{CoalesceError, Result};
use coalesce_runtime::{DefaultTimer, Epoch, Timer, TimerHandle};
use core::time::Duration;
use std::sync::{Arc, Weak};

/// Throttled wrapper around a callable.
///
/// Cloning yields another handle to the same coalescer. Dropping the last
/// handle cancels the live window; nothing fires afterwards.
///
/// # Example
///
/// ```rust,no_run
/// use coalesce::Throttler;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> coalesce::Result<()> {
/// let scroll = Throttler::builder(|offset: u32| offset)
///     .wait(Duration::from_secs(1))
///     .leading(true)
///     .build()?;
///
/// assert_eq!(scroll.call(0)?, Some(0)); // leading edge
/// assert_eq!(scroll.call(200)?, Some(0)); // coalesced
/// assert_eq!(scroll.call(900)?, Some(0)); // coalesced, latest wins
///
/// tokio::time::sleep(Duration::from_millis(1_050)).await;
/// assert_eq!(scroll.last_result(), Some(900)); // trailing edge
/// # Ok(())
/// # }
/// ```
pub struct Throttler<A, R, TM: Timer = DefaultTimer> {
    shared: Arc<Shared<ThrottleState<A, R, TM>>>,
}

struct ThrottleState<A, R, TM: Timer> {
    edges: EdgePolicy,
    wait: Duration,
    timer: TM,
    invoker: Invoker<A, R, TM::Instant>,
    pending: PendingCall<A, TM::Instant>,
    window: TimerHandle<TM>,
    /// Calls coalesced into the live window.
    skipped: usize,
    faulted: bool,
}

impl<A, R> Throttler<A, R, DefaultTimer>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    /// Starts configuring a throttler for `callable` on the default runtime timer.
    pub fn builder<F>(callable: F) -> ThrottlerBuilder<A, R, DefaultTimer>
    where
        F: FnMut(A) -> R + Send + 'static,
    {
        ThrottlerBuilder {
            callable: Box::new(callable),
            options: ThrottleOptions::default(),
            timer: DefaultTimer::default(),
            on_error: None,
        }
    }

    /// Builds a throttler from ready-made options.
    ///
    /// # Errors
    ///
    /// Returns [`CoalesceError::NoEdgeEnabled`] if neither edge is enabled.
    pub fn new<F>(callable: F, options: ThrottleOptions) -> Result<Self>
    where
        F: FnMut(A) -> R + Send + 'static,
    {
        Self::builder(callable).options(options).build()
    }
}

impl<A, R, TM> Throttler<A, R, TM>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    TM: Timer,
{
    /// Submits a call.
    ///
    /// Returns the result of the most recent invocation, which is the result of
    /// this call only if it opened a window on the leading edge.
    ///
    /// # Errors
    ///
    /// - [`CoalesceError::TimerUnavailable`] if the window timer could not be
    ///   armed; the coalescer is faulted from then on
    /// - [`CoalesceError::Faulted`] on every call after such a failure
    ///
    /// # Panics
    ///
    /// A panic raised by the callable during a leading invocation propagates.
    pub fn call(&self, args: A) -> Result<Option<R>> {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;

        if state.faulted {
            warn!("throttle: call rejected, coalescer is faulted");
            return Err(CoalesceError::Faulted);
        }

        let now = state.timer.now();
        state.pending.store(args, now);

        if state.window.is_armed() {
            state.skipped += 1;
            return Ok(state.invoker.last_result().cloned());
        }

        state.skipped = 0;
        let (window, leading) = match state.invoker.cooldown(now, state.wait) {
            // A trailing invocation ran less than one window ago: hold the
            // leading edge back and let this call trail the shortened window.
            Some(remaining) if state.edges == EdgePolicy::Both => {
                trace!("throttle: leading edge deferred by {:?}", remaining);
                state.skipped = 1;
                (remaining, false)
            }
            _ => (state.wait, state.edges.leading()),
        };

        // The window is live before a leading invocation runs.
        let shared = Arc::downgrade(&self.shared);
        if let Err(err) = state
            .window
            .arm(window, move |epoch| window_expired(&shared, epoch))
        {
            return Err(state.fault(err));
        }

        if leading {
            if let Some(args) = state.pending.take() {
                trace!("throttle: leading invocation");
                state.invoker.invoke(args, now);
            }
        }

        Ok(state.invoker.last_result().cloned())
    }

    /// Discards the pending invocation and closes the window without firing.
    pub fn cancel(&self) {
        self.shared.state.lock().reset();
    }

    /// Runs an eligible trailing invocation now, as if the window had just
    /// closed, then returns the most recent result.
    pub fn flush(&self) -> Option<R> {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;

        if state.window.is_armed() && !state.pending.is_empty() {
            debug!("throttle: flushing pending invocation");
            state.window.cancel();
            state.window_end();
        }

        state.invoker.last_result().cloned()
    }

    /// Result of the most recent invocation, if the callable ever ran.
    pub fn last_result(&self) -> Option<R> {
        self.shared.state.lock().invoker.last_result().cloned()
    }

    /// Whether arguments are waiting for the trailing edge.
    pub fn is_pending(&self) -> bool {
        !self.shared.state.lock().pending.is_empty()
    }

    pub fn stats(&self) -> CoalescerStats {
        let state = self.shared.state.lock();
        CoalescerStats {
            invocations: state.invoker.invocations(),
            pending: !state.pending.is_empty(),
            armed: state.window.is_armed(),
            faulted: state.faulted,
        }
    }
}

impl<A, R, TM: Timer> Clone for Throttler<A, R, TM> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<A, R, TM: Timer> ThrottleState<A, R, TM> {
    /// Window expiry. With the leading edge enabled, the trailing edge only
    /// fires for calls coalesced after the one that opened the window.
    fn window_end(&mut self) {
        let args = self.pending.take();
        let eligible = self.edges.trailing() && (self.skipped > 0 || !self.edges.leading());
        self.skipped = 0;

        if let Some(args) = args.filter(|_| eligible) {
            trace!("throttle: trailing invocation");
            let now = self.timer.now();
            self.invoker.invoke(args, now);
        }
    }

    fn reset(&mut self) {
        self.window.cancel();
        self.pending.clear();
        self.skipped = 0;
        self.invoker.reset_clock();
    }

    fn fault(&mut self, err: CoalesceError) -> CoalesceError {
        error!("throttle: timer facility failed, coalescer disabled: {}", err);
        self.reset();
        self.faulted = true;
        err
    }
}

fn window_expired<A, R, TM: Timer>(
    shared: &Weak<Shared<ThrottleState<A, R, TM>>>,
    epoch: Epoch,
) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    shared.expire(|state| {
        if state.window.expire(epoch) {
            state.window_end();
        }
    });
}

/// Builder for [`Throttler`].
pub struct ThrottlerBuilder<A, R, TM: Timer = DefaultTimer> {
    callable: Callable<A, R>,
    options: ThrottleOptions,
    timer: TM,
    on_error: Option<ErrorHook>,
}

impl<A, R, TM> ThrottlerBuilder<A, R, TM>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    TM: Timer,
{
    /// Window length. Zero means "until the next timer tick".
    #[must_use]
    pub fn wait(mut self, wait: Duration) -> Self {
        self.options.wait = wait;
        self
    }

    #[must_use]
    pub fn leading(mut self, leading: bool) -> Self {
        self.options.leading = leading;
        self
    }

    #[must_use]
    pub fn trailing(mut self, trailing: bool) -> Self {
        self.options.trailing = trailing;
        self
    }

    /// Replaces every option at once.
    #[must_use]
    pub fn options(mut self, options: ThrottleOptions) -> Self {
        self.options = options;
        self
    }

    /// Receives panics raised by the callable on timer expiry.
    #[must_use]
    pub fn on_error<H>(mut self, on_error: H) -> Self
    where
        H: Fn(CoalesceError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(on_error));
        self
    }

    /// Runs the coalescer on another timer implementation.
    pub fn timer<T2: Timer>(self, timer: T2) -> ThrottlerBuilder<A, R, T2> {
        ThrottlerBuilder {
            callable: self.callable,
            options: self.options,
            timer,
            on_error: self.on_error,
        }
    }

    /// # Errors
    ///
    /// Returns [`CoalesceError::NoEdgeEnabled`] if neither edge is enabled.
    pub fn build(self) -> Result<Throttler<A, R, TM>> {
        let edges = self.options.validate()?;
        debug!(
            "throttle: built with wait={:?} edges={:?}",
            self.options.wait, edges
        );

        let state = ThrottleState {
            edges,
            wait: self.options.wait,
            invoker: Invoker::new(self.callable),
            pending: PendingCall::new(),
            window: TimerHandle::new(self.timer.clone()),
            timer: self.timer,
            skipped: 0,
            faulted: false,
        };

        Ok(Throttler {
            shared: Shared::new(state, self.on_error),
        })
    }
}
