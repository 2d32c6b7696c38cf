// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use tagflux_core::{RawReading, TagSubject, TagfluxError};

#[tokio::test]
async fn test_subject_broadcasts_to_all_subscribers() -> anyhow::Result<()> {
    // Arrange
    let subject = TagSubject::<RawReading>::new();
    let mut first = subject.subscribe()?;
    let mut second = subject.subscribe()?;
    let reading = RawReading::raw().with_humidity(40.0);

    // Act
    subject.send(reading)?;

    // Assert
    assert_eq!(first.next().await, Some(reading));
    assert_eq!(second.next().await, Some(reading));
    assert_eq!(subject.subscriber_count(), 2);

    Ok(())
}

#[tokio::test]
async fn test_late_subscriber_misses_past_items() -> anyhow::Result<()> {
    // Arrange
    let subject = TagSubject::<i32>::new();
    let mut early = subject.subscribe()?;
    subject.send(1)?;

    // Act
    let mut late = subject.subscribe()?;
    subject.send(2)?;
    subject.close();

    // Assert
    assert_eq!(early.next().await, Some(1));
    assert_eq!(early.next().await, Some(2));
    assert_eq!(late.next().await, Some(2));
    assert_eq!(late.next().await, None);

    Ok(())
}

#[tokio::test]
async fn test_dropped_subscriber_is_pruned_on_send() -> anyhow::Result<()> {
    let subject = TagSubject::<i32>::new();
    let kept = subject.subscribe()?;
    let dropped = subject.subscribe()?;
    drop(dropped);

    subject.send(7)?;

    assert_eq!(subject.subscriber_count(), 1);
    drop(kept);
    Ok(())
}

#[test]
fn test_closed_subject_refuses_send_and_subscribe() {
    let subject = TagSubject::<i32>::new();
    subject.close();
    subject.close();

    assert!(subject.is_closed());
    assert!(matches!(subject.send(1), Err(TagfluxError::Closed { .. })));
    assert!(matches!(
        subject.subscribe(),
        Err(TagfluxError::Closed { .. })
    ));
}
