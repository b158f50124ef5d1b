// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::ops::Sub;
use core::time::Duration;

pub(crate) type Callable<A, R> = Box<dyn FnMut(A) -> R + Send>;

/// The bound callable plus what the coalescers remember about its invocations.
pub(crate) struct Invoker<A, R, I> {
    callable: Callable<A, R>,
    last_result: Option<R>,
    last_invoke: Option<I>,
    invocations: u64,
}

impl<A, R, I> Invoker<A, R, I>
where
    I: Copy + Ord + Sub<I, Output = Duration>,
{
    pub(crate) fn new(callable: Callable<A, R>) -> Self {
        Self {
            callable,
            last_result: None,
            last_invoke: None,
            invocations: 0,
        }
    }

    /// Runs the callable. Bookkeeping is updated first so a panicking callable
    /// still counts as an invocation.
    pub(crate) fn invoke(&mut self, args: A, now: I) {
        self.last_invoke = Some(now);
        self.invocations += 1;
        let result = (self.callable)(args);
        self.last_result = Some(result);
    }

    pub(crate) fn last_result(&self) -> Option<&R> {
        self.last_result.as_ref()
    }

    pub(crate) fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Time left until `wait` has elapsed since the last invocation, if any is left.
    pub(crate) fn cooldown(&self, now: I, wait: Duration) -> Option<Duration> {
        let last = self.last_invoke?;
        let elapsed = if now > last { now - last } else { Duration::ZERO };
        (elapsed < wait).then(|| wait - elapsed)
    }

    /// Forgets when the callable last ran. The retained result is kept.
    pub(crate) fn reset_clock(&mut self) {
        self.last_invoke = None;
    }
}
