// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce::Throttler;
use coalesce_test_utils::Recorder;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_throttle_concurrent_callers_get_one_leading_invocation() -> anyhow::Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let throttler = Throttler::builder(recorder.callable())
        .wait(Duration::from_millis(500))
        .leading(true)
        .trailing(false)
        .build()?;

    // Act
    let mut callers = Vec::new();
    for worker in 0..4u32 {
        let throttler = throttler.clone();
        callers.push(tokio::spawn(async move {
            for step in 0..100u32 {
                throttler.call(worker * 1_000 + step)?;
            }
            Ok::<_, coalesce::CoalesceError>(())
        }));
    }
    for caller in callers {
        caller.await??;
    }

    // Assert
    sleep(Duration::from_millis(100)).await;
    assert_eq!(recorder.count(), 1);
    assert_eq!(throttler.last_result(), recorder.args().first().copied());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_throttle_trailing_fires_once_across_threads() -> anyhow::Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let throttler = Throttler::builder(recorder.callable())
        .wait(Duration::from_millis(200))
        .build()?;

    // Act
    let mut callers = Vec::new();
    for worker in 0..2u32 {
        let throttler = throttler.clone();
        callers.push(tokio::spawn(async move {
            for step in 0..50u32 {
                throttler.call(worker * 1_000 + step)?;
            }
            Ok::<_, coalesce::CoalesceError>(())
        }));
    }
    for caller in callers {
        caller.await??;
    }

    // Assert
    sleep(Duration::from_millis(500)).await;
    assert_eq!(recorder.count(), 1);
    assert_eq!(recorder.args()[0] % 1_000, 49);

    Ok(())
}
