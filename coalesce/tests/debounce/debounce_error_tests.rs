// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce::{CoalesceError, DebounceOptions, Debouncer};
use coalesce_test_utils::{advance_and_settle, Recorder};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::pause;

#[test]
fn test_debounce_rejects_configuration_without_edges() {
    let recorder = Recorder::<u32>::new();

    let result = Debouncer::builder(recorder.callable())
        .leading(false)
        .trailing(false)
        .build();

    assert!(matches!(result, Err(CoalesceError::NoEdgeEnabled)));
}

#[test]
fn test_debounce_rejects_max_wait_shorter_than_wait() {
    let recorder = Recorder::<u32>::new();
    let options = DebounceOptions {
        wait: Duration::from_millis(500),
        max_wait: Some(Duration::from_millis(100)),
        ..DebounceOptions::default()
    };

    let result = Debouncer::new(recorder.callable(), options);

    match result {
        Err(err @ CoalesceError::MaxWaitBelowWait { .. }) => {
            assert!(err.is_configuration());
            assert!(err.to_string().contains("max_wait"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("configuration should have been rejected"),
    }
}

#[test]
fn test_debounce_without_runtime_faults_on_first_call() -> anyhow::Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let debouncer = Debouncer::builder(recorder.callable())
        .wait(Duration::from_millis(100))
        .build()?;

    // Act
    let first = debouncer.call(1);
    let second = debouncer.call(2);

    // Assert
    assert!(matches!(first, Err(CoalesceError::TimerUnavailable { .. })));
    assert!(matches!(second, Err(CoalesceError::Faulted)));

    let stats = debouncer.stats();
    assert!(stats.faulted);
    assert!(!stats.pending);
    assert!(!stats.armed);
    assert_eq!(recorder.count(), 0);

    debouncer.cancel();
    assert!(matches!(debouncer.call(3), Err(CoalesceError::Faulted)));

    Ok(())
}

#[tokio::test]
async fn test_debounce_expiry_panic_reaches_error_hook() -> anyhow::Result<()> {
    // Arrange
    pause();
    let reported = Arc::new(Mutex::new(Vec::new()));
    let sink = reported.clone();
    let debouncer = Debouncer::builder(|value: u32| {
        if value == 0 {
            panic!("lookup failed");
        }
        value
    })
    .wait(Duration::from_millis(100))
    .on_error(move |err| sink.lock().push(err))
    .build()?;

    // Act
    debouncer.call(0)?;
    advance_and_settle(101).await;

    // Assert
    {
        let reported = reported.lock();
        assert_eq!(reported.len(), 1);
        match &reported[0] {
            CoalesceError::CallbackPanic { context } => assert_eq!(context, "lookup failed"),
            other => panic!("unexpected error: {other}"),
        }
    }
    assert!(!debouncer.is_pending());
    assert!(!debouncer.stats().faulted);

    debouncer.call(7)?;
    advance_and_settle(101).await;
    assert_eq!(debouncer.last_result(), Some(7));
    assert_eq!(reported.lock().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_debounce_expiry_panic_without_hook_keeps_coalescer_usable() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let debouncer = Debouncer::builder(recorder.panicking("always"))
        .wait(Duration::from_millis(50))
        .build()?;

    // Act
    debouncer.call("first")?;
    advance_and_settle(51).await;
    debouncer.call("second")?;
    advance_and_settle(51).await;

    // Assert
    assert_eq!(recorder.args(), vec!["first", "second"]);
    assert_eq!(debouncer.last_result(), None);
    assert_eq!(debouncer.stats().invocations, 2);

    Ok(())
}

#[tokio::test]
async fn test_debounce_leading_panic_still_opens_burst() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let debouncer = Debouncer::builder(recorder.panicking_on(0, "rejected"))
        .wait(Duration::from_millis(100))
        .leading(true)
        .trailing(false)
        .build()?;

    // Act
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| debouncer.call(0)));
    advance_and_settle(10).await;
    let inside_burst = debouncer.call(1)?;

    // Assert
    assert!(outcome.is_err());
    assert_eq!(inside_burst, None);
    assert_eq!(recorder.args(), vec![0]);
    assert_eq!(debouncer.stats().invocations, 1);
    assert!(debouncer.stats().armed);

    advance_and_settle(101).await;
    assert_eq!(recorder.args(), vec![0]);
    assert!(!debouncer.stats().armed);

    assert_eq!(debouncer.call(2)?, Some(2));
    assert_eq!(recorder.args(), vec![0, 2]);

    Ok(())
}

#[tokio::test]
async fn test_debounce_leading_panic_with_max_wait_ends_burst_on_quiet() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let debouncer = Debouncer::builder(recorder.panicking_on(0, "rejected"))
        .wait(Duration::from_millis(100))
        .max_wait(Duration::from_millis(200))
        .leading(true)
        .trailing(false)
        .build()?;

    // Act
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| debouncer.call(0)));
    advance_and_settle(1_000).await;
    let leading = debouncer.call(1)?;
    advance_and_settle(2).await;
    let coalesced = debouncer.call(2)?;

    // Assert
    assert!(outcome.is_err());
    assert_eq!(leading, Some(1));
    assert_eq!(coalesced, Some(1));
    assert_eq!(recorder.args(), vec![0, 1]);

    advance_and_settle(300).await;
    assert_eq!(recorder.args(), vec![0, 1]);
    assert!(!debouncer.stats().armed);

    Ok(())
}
