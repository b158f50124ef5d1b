// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Holds the arguments of the most recent call that has not been invoked yet.
///
/// Storing replaces whatever was there: only the latest arguments ever reach
/// the callable, earlier ones are dropped rather than queued.
#[derive(Debug)]
pub struct PendingCall<A, I> {
    args: Option<A>,
    stored_at: Option<I>,
}

impl<A, I: Copy> PendingCall<A, I> {
    pub const fn new() -> Self {
        Self {
            args: None,
            stored_at: None,
        }
    }

    /// Replaces the pending arguments, returning the ones that were superseded.
    pub fn store(&mut self, args: A, now: I) -> Option<A> {
        self.stored_at = Some(now);
        self.args.replace(args)
    }

    /// Empties the slot, handing the arguments to the caller.
    pub fn take(&mut self) -> Option<A> {
        self.stored_at = None;
        self.args.take()
    }

    pub fn clear(&mut self) {
        self.take();
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_none()
    }

    /// When the pending arguments were stored, if any are pending.
    pub fn stored_at(&self) -> Option<I> {
        self.stored_at
    }
}

impl<A, I: Copy> Default for PendingCall<A, I> {
    fn default() -> Self {
        Self::new()
    }
}
