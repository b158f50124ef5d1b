// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounce coalescer.
//!
//! A [`Debouncer`] delays invocations of its callable until calls stop arriving
//! for a quiet window:
//! - **trailing** (default): after the quiet window, invoke with the latest arguments
//! - **leading**: invoke immediately on the first call of a burst
//! - **max wait**: invoke at the latest `max_wait` after the burst started, even if
//!   calls keep arriving
//!
//! Every call pushes the quiet-window deadline out. The max-wait deadline is set
//! once per burst and never refreshed.

use crate::edge::EdgePolicy;
use crate::invoker::{Callable, Invoker};
use crate::options::DebounceOptions;
use crate::shared::{CoalescerStats, ErrorHook, Shared};
use crate::slot::PendingCall;
use coalesce_error::{CoalesceError, Result};
use coalesce_runtime::{DefaultTimer, Epoch, Timer, TimerHandle};
use core::time::Duration;
use std::sync::{Arc, Weak};

/// Debounced wrapper around a callable.
///
/// Cloning yields another handle to the same coalescer. Dropping the last
/// handle cancels live timers; nothing fires afterwards.
///
/// # Example
///
/// ```rust,no_run
/// use coalesce::Debouncer;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> coalesce::Result<()> {
/// let search = Debouncer::builder(|query: String| query.len())
///     .wait(Duration::from_millis(300))
///     .build()?;
///
/// search.call("a".to_string())?;
/// search.call("ab".to_string())?;
/// search.call("abc".to_string())?;
///
/// // 300ms after the last call the callable runs once, with "abc".
/// tokio::time::sleep(Duration::from_millis(350)).await;
/// assert_eq!(search.last_result(), Some(3));
/// # Ok(())
/// # }
/// ```
pub struct Debouncer<A, R, TM: Timer = DefaultTimer> {
    shared: Arc<Shared<DebounceState<A, R, TM>>>,
}

struct DebounceState<A, R, TM: Timer> {
    edges: EdgePolicy,
    wait: Duration,
    max_wait: Option<Duration>,
    timer: TM,
    invoker: Invoker<A, R, TM::Instant>,
    pending: PendingCall<A, TM::Instant>,
    burst_start: Option<TM::Instant>,
    quiet: TimerHandle<TM>,
    deadline: TimerHandle<TM>,
    faulted: bool,
}

impl<A, R> Debouncer<A, R, DefaultTimer>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    /// Starts configuring a debouncer for `callable` on the default runtime timer.
    pub fn builder<F>(callable: F) -> DebouncerBuilder<A, R, DefaultTimer>
    where
        F: FnMut(A) -> R + Send + 'static,
    {
        DebouncerBuilder {
            callable: Box::new(callable),
            options: DebounceOptions::default(),
            timer: DefaultTimer::default(),
            on_error: None,
        }
    }

    /// Builds a debouncer from ready-made options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `options` do not validate.
    pub fn new<F>(callable: F, options: DebounceOptions) -> Result<Self>
    where
        F: FnMut(A) -> R + Send + 'static,
    {
        Self::builder(callable).options(options).build()
    }
}

impl<A, R, TM> Debouncer<A, R, TM>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    TM: Timer,
{
    /// Submits a call.
    ///
    /// Returns the result of the most recent invocation, which is the result of
    /// this call only if it fired on the leading edge.
    ///
    /// # Errors
    ///
    /// - [`CoalesceError::TimerUnavailable`] if a timer could not be armed; the
    ///   coalescer is faulted from then on
    /// - [`CoalesceError::Faulted`] on every call after such a failure
    ///
    /// # Panics
    ///
    /// A panic raised by the callable during a leading invocation propagates.
    pub fn call(&self, args: A) -> Result<Option<R>> {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;

        if state.faulted {
            warn!("debounce: call rejected, coalescer is faulted");
            return Err(CoalesceError::Faulted);
        }

        let now = state.timer.now();
        state.pending.store(args, now);
        let burst_start = *state.burst_start.get_or_insert(now);
        let leading = state.edges.leading() && !state.quiet.is_armed();

        // Both timers are live before a leading invocation runs.
        let quiet = Arc::downgrade(&self.shared);
        if let Err(err) = state
            .quiet
            .arm(state.wait, move |epoch| quiet_window_expired(&quiet, epoch))
        {
            return Err(state.fault(err));
        }

        if let Some(max_wait) = state.max_wait {
            if !state.deadline.is_armed() {
                let elapsed = if now > burst_start {
                    now - burst_start
                } else {
                    Duration::ZERO
                };
                let deadline = Arc::downgrade(&self.shared);
                if let Err(err) = state.deadline.arm(
                    max_wait.saturating_sub(elapsed),
                    move |epoch| max_wait_expired(&deadline, epoch),
                ) {
                    return Err(state.fault(err));
                }
            }
        }

        if leading {
            if let Some(args) = state.pending.take() {
                trace!("debounce: leading invocation");
                state.invoker.invoke(args, now);
            }
        }

        Ok(state.invoker.last_result().cloned())
    }

    /// Discards the pending invocation and both timers. Nothing fires as a result.
    pub fn cancel(&self) {
        self.shared.state.lock().reset();
    }

    /// Runs a pending trailing invocation now, as if the quiet window had just
    /// ended, then returns the most recent result.
    ///
    /// Without a live quiet window and pending arguments this only returns the
    /// retained result.
    pub fn flush(&self) -> Option<R> {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;

        if state.quiet.is_armed() && !state.pending.is_empty() {
            debug!("debounce: flushing pending invocation");
            state.quiet.cancel();
            state.quiet_window_end();
        }

        state.invoker.last_result().cloned()
    }

    /// Result of the most recent invocation, if the callable ever ran.
    pub fn last_result(&self) -> Option<R> {
        self.shared.state.lock().invoker.last_result().cloned()
    }

    /// Whether arguments are waiting for a trailing or max-wait invocation.
    pub fn is_pending(&self) -> bool {
        !self.shared.state.lock().pending.is_empty()
    }

    pub fn stats(&self) -> CoalescerStats {
        let state = self.shared.state.lock();
        CoalescerStats {
            invocations: state.invoker.invocations(),
            pending: !state.pending.is_empty(),
            armed: state.quiet.is_armed() || state.deadline.is_armed(),
            faulted: state.faulted,
        }
    }
}

impl<A, R, TM: Timer> Clone for Debouncer<A, R, TM> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<A, R, TM: Timer> DebounceState<A, R, TM> {
    /// Quiet-window expiry. Ends the burst whether or not the trailing edge fires.
    fn quiet_window_end(&mut self) {
        let args = self.pending.take();
        self.end_burst();

        if self.edges.trailing() {
            if let Some(args) = args {
                trace!("debounce: trailing invocation");
                let now = self.timer.now();
                self.invoker.invoke(args, now);
            }
        }
    }

    fn max_wait_end(&mut self) {
        let args = self.pending.take();
        self.quiet.cancel();
        self.end_burst();

        if let Some(args) = args {
            trace!("debounce: max-wait invocation");
            let now = self.timer.now();
            self.invoker.invoke(args, now);
        }
    }

    fn end_burst(&mut self) {
        self.pending.clear();
        self.deadline.cancel();
        self.burst_start = None;
    }

    fn reset(&mut self) {
        self.quiet.cancel();
        self.end_burst();
        self.invoker.reset_clock();
    }

    fn fault(&mut self, err: CoalesceError) -> CoalesceError {
        error!("debounce: timer facility failed, coalescer disabled: {}", err);
        self.reset();
        self.faulted = true;
        err
    }
}

fn quiet_window_expired<A, R, TM: Timer>(
    shared: &Weak<Shared<DebounceState<A, R, TM>>>,
    epoch: Epoch,
) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    shared.expire(|state| {
        if state.quiet.expire(epoch) {
            state.quiet_window_end();
        }
    });
}

fn max_wait_expired<A, R, TM: Timer>(
    shared: &Weak<Shared<DebounceState<A, R, TM>>>,
    epoch: Epoch,
) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    shared.expire(|state| {
        if state.deadline.expire(epoch) {
            state.max_wait_end();
        }
    });
}

/// Builder for [`Debouncer`].
pub struct DebouncerBuilder<A, R, TM: Timer = DefaultTimer> {
    callable: Callable<A, R>,
    options: DebounceOptions,
    timer: TM,
    on_error: Option<ErrorHook>,
}

impl<A, R, TM> DebouncerBuilder<A, R, TM>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    TM: Timer,
{
    /// Quiet window. Zero means "on the next timer tick".
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

    #[must_use]
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.options.max_wait = Some(max_wait);
        self
    }

    /// Replaces every option at once.
    #[must_use]
    pub fn options(mut self, options: DebounceOptions) -> Self {
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
    pub fn timer<T2: Timer>(self, timer: T2) -> DebouncerBuilder<A, R, T2> {
        DebouncerBuilder {
            callable: self.callable,
            options: self.options,
            timer,
            on_error: self.on_error,
        }
    }

    /// # Errors
    ///
    /// - [`CoalesceError::NoEdgeEnabled`] if neither edge is enabled
    /// - [`CoalesceError::MaxWaitBelowWait`] if `max_wait` is shorter than `wait`
    pub fn build(self) -> Result<Debouncer<A, R, TM>> {
        let edges = self.options.validate()?;
        debug!(
            "debounce: built with wait={:?} edges={:?} max_wait={:?}",
            self.options.wait, edges, self.options.max_wait
        );

        let state = DebounceState {
            edges,
            wait: self.options.wait,
            max_wait: self.options.max_wait,
            invoker: Invoker::new(self.callable),
            pending: PendingCall::new(),
            burst_start: None,
            quiet: TimerHandle::new(self.timer.clone()),
            deadline: TimerHandle::new(self.timer.clone()),
            timer: self.timer,
            faulted: false,
        };

        Ok(Debouncer {
            shared: Shared::new(state, self.on_error),
        })
    }
}
