// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-smol")]
use coalesce_error::Result;

#[cfg(feature = "runtime-smol")]
use crate::timer::{Timer, FAR_FUTURE};

#[cfg(feature = "runtime-smol")]
use core::time::Duration;

#[cfg(feature = "runtime-smol")]
#[derive(Clone, Debug, Default)]
pub struct SmolTimer;

#[cfg(feature = "runtime-smol")]
pub struct SmolSleep {
    timer: async_io::Timer,
}

#[cfg(feature = "runtime-smol")]
impl SmolSleep {
    fn new(deadline: std::time::Instant) -> Self {
        Self {
            timer: async_io::Timer::at(deadline),
        }
    }
}

#[cfg(feature = "runtime-smol")]
impl core::future::Future for SmolSleep {
    type Output = ();

    fn poll(
        mut self: core::pin::Pin<&mut Self>,
        cx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Self::Output> {
        core::pin::Pin::new(&mut self.timer).poll(cx).map(|_| ())
    }
}

#[cfg(feature = "runtime-smol")]
impl Timer for SmolTimer {
    type Sleep = SmolSleep;

    type Instant = std::time::Instant;

    fn sleep_until(&self, deadline: Self::Instant) -> Self::Sleep {
        SmolSleep::new(deadline)
    }

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn deadline(&self, after: Duration) -> Self::Instant {
        let now = self.now();
        now.checked_add(after).unwrap_or(now + FAR_FUTURE)
    }

    // smol's global executor starts lazily, so spawning cannot fail.
    fn spawn<F>(&self, future: F) -> Result<()>
    where
        F: core::future::Future<Output = ()> + Send + 'static,
    {
        smol::spawn(future).detach();
        Ok(())
    }
}
