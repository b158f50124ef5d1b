// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce::{SmolTimer, Throttler};
use coalesce_test_utils::Recorder;
use std::time::Duration;

#[test]
fn test_throttle_smol_leading_and_trailing() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let recorder = Recorder::new();
        let throttler = Throttler::builder(recorder.callable())
            .wait(Duration::from_millis(100))
            .leading(true)
            .timer(SmolTimer)
            .build()?;

        // Act
        assert_eq!(throttler.call('x')?, Some('x'));
        assert_eq!(throttler.call('y')?, Some('x'));
        assert_eq!(throttler.call('z')?, Some('x'));

        // Assert
        smol::Timer::after(Duration::from_millis(300)).await;
        assert_eq!(recorder.args(), vec!['x', 'z']);

        Ok::<(), anyhow::Error>(())
    })
}
