// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce::Debouncer;
use coalesce_test_utils::Recorder;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_debounce_concurrent_callers_share_one_burst() -> anyhow::Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let debouncer = Debouncer::builder(recorder.callable())
        .wait(Duration::from_millis(200))
        .build()?;

    // Act
    let mut callers = Vec::new();
    for worker in 0..4u32 {
        let debouncer = debouncer.clone();
        callers.push(tokio::spawn(async move {
            for step in 0..250u32 {
                debouncer.call(worker * 1_000 + step)?;
            }
            Ok::<_, coalesce::CoalesceError>(())
        }));
    }
    for caller in callers {
        caller.await??;
    }

    // Assert
    sleep(Duration::from_millis(600)).await;
    assert_eq!(recorder.count(), 1);
    assert!(!debouncer.is_pending());

    let fired = recorder.args()[0];
    assert_eq!(fired % 1_000, 249);
    assert_eq!(debouncer.last_result(), Some(fired));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_debounce_cancel_from_another_task() -> anyhow::Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let debouncer = Debouncer::builder(recorder.callable())
        .wait(Duration::from_millis(200))
        .build()?;
    debouncer.call("pending")?;

    // Act
    let remote = debouncer.clone();
    tokio::spawn(async move { remote.cancel() }).await?;

    // Assert
    sleep(Duration::from_millis(400)).await;
    assert_eq!(recorder.count(), 0);

    Ok(())
}
