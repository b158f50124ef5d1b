// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone, Debug)]
struct Invocation<A> {
    args: A,
    at: Instant,
}

/// Records every invocation of the callables it hands out.
///
/// Clones share the same log. The clock origin is captured at construction, so
/// create the recorder after `tokio::time::pause()`.
#[derive(Clone, Debug)]
pub struct Recorder<A> {
    log: Arc<Mutex<Vec<Invocation<A>>>>,
    origin: Instant,
}

impl<A> Recorder<A>
where
    A: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            origin: Instant::now(),
        }
    }

    /// A callable that records its arguments and echoes them back as the result.
    pub fn callable(&self) -> impl FnMut(A) -> A + Send + 'static {
        let log = self.log.clone();
        move |args: A| {
            log.lock().push(Invocation {
                args: args.clone(),
                at: Instant::now(),
            });
            args
        }
    }

    /// A callable that records its arguments, then panics with `message`.
    pub fn panicking(&self, message: &'static str) -> impl FnMut(A) -> A + Send + 'static {
        let mut record = self.callable();
        move |args: A| -> A {
            record(args);
            panic!("{}", message);
        }
    }

    /// A callable that records its arguments, then panics with `message` when
    /// they equal `failing` and echoes them back otherwise.
    pub fn panicking_on(
        &self,
        failing: A,
        message: &'static str,
    ) -> impl FnMut(A) -> A + Send + 'static
    where
        A: PartialEq,
    {
        let mut record = self.callable();
        move |args: A| -> A {
            let fails = args == failing;
            let echoed = record(args);
            if fails {
                panic!("{}", message);
            }
            echoed
        }
    }

    pub fn args(&self) -> Vec<A> {
        self.log.lock().iter().map(|call| call.args.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.log.lock().len()
    }

    /// Offsets from the recorder's creation at which each invocation ran.
    pub fn offsets(&self) -> Vec<Duration> {
        self.log
            .lock()
            .iter()
            .map(|call| call.at.duration_since(self.origin))
            .collect()
    }
}

impl<A> Default for Recorder<A>
where
    A: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
