// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tagflux_core::{Discovery, SourceId, TagfluxError};
use tagflux_stream::{SourceRegistry, SourceSnapshot};
use tagflux_test_utils::{
    assert_no_element_emitted, assert_stream_ended, fixtures, unwrap_stream, MockDiscovery,
};

fn ids(snapshot: &SourceSnapshot) -> Vec<SourceId> {
    snapshot.iter().map(|source| source.id.clone()).collect()
}

#[tokio::test]
async fn test_idle_registry_replays_empty_snapshot_only() -> anyhow::Result<()> {
    // Arrange
    let registry = SourceRegistry::idle();

    // Act
    let mut snapshots = registry.subscribe()?;

    // Assert
    assert!(unwrap_stream(&mut snapshots, 500).await.is_empty());
    assert_no_element_emitted(&mut snapshots, 100).await;
    assert!(registry.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_registry_accumulates_sources_in_discovery_order() -> anyhow::Result<()> {
    // Arrange
    let (discovery, handle) = MockDiscovery::new();
    let registry = SourceRegistry::spawn(discovery.listen()?);
    let mut snapshots = registry.subscribe()?;
    assert!(unwrap_stream(&mut snapshots, 500).await.is_empty());

    // Act
    let _galley = handle.found(fixtures::galley_id());
    let first = unwrap_stream(&mut snapshots, 500).await;
    let _cockpit = handle.found(fixtures::cockpit_id());
    let second = unwrap_stream(&mut snapshots, 500).await;

    // Assert
    assert_eq!(ids(&first), vec![fixtures::galley_id()]);
    assert_eq!(
        ids(&second),
        vec![fixtures::galley_id(), fixtures::cockpit_id()]
    );
    assert_eq!(registry.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_repeated_discovery_is_ignored() -> anyhow::Result<()> {
    // Arrange
    let (discovery, handle) = MockDiscovery::new();
    let registry = SourceRegistry::spawn(discovery.listen()?);
    let mut snapshots = registry.subscribe()?;
    let _ = unwrap_stream(&mut snapshots, 500).await;
    let _galley = handle.found(fixtures::galley_id());
    let _ = unwrap_stream(&mut snapshots, 500).await;

    // Act
    let _again = handle.found(fixtures::galley_id());

    // Assert
    assert_no_element_emitted(&mut snapshots, 100).await;
    assert_eq!(ids(&registry.snapshot()), vec![fixtures::galley_id()]);

    Ok(())
}

#[tokio::test]
async fn test_late_subscriber_starts_from_current_snapshot() -> anyhow::Result<()> {
    // Arrange
    let (discovery, handle) = MockDiscovery::new();
    let registry = SourceRegistry::spawn(discovery.listen()?);
    let mut early = registry.subscribe()?;
    let _ = unwrap_stream(&mut early, 500).await;
    let _galley = handle.found(fixtures::galley_id());
    let _ = unwrap_stream(&mut early, 500).await;

    // Act
    let mut late = registry.subscribe()?;

    // Assert
    assert_eq!(
        ids(&unwrap_stream(&mut late, 500).await),
        vec![fixtures::galley_id()]
    );

    let _mast = handle.found(fixtures::mast_id());
    assert_eq!(unwrap_stream(&mut late, 500).await.len(), 2);
    assert_eq!(unwrap_stream(&mut early, 500).await.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_registry_outlives_ended_discovery_feed() -> anyhow::Result<()> {
    // Arrange
    let (discovery, handle) = MockDiscovery::new();
    let registry = SourceRegistry::spawn(discovery.listen()?);
    let mut snapshots = registry.subscribe()?;
    let _ = unwrap_stream(&mut snapshots, 500).await;
    let _galley = handle.found(fixtures::galley_id());
    let _ = unwrap_stream(&mut snapshots, 500).await;

    // Act
    drop(handle);

    // Assert
    assert_no_element_emitted(&mut snapshots, 100).await;
    assert_eq!(registry.len(), 1);
    let mut fresh = registry.subscribe()?;
    assert_eq!(unwrap_stream(&mut fresh, 500).await.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_close_ends_subscriptions_and_refuses_new_ones() -> anyhow::Result<()> {
    // Arrange
    let (discovery, handle) = MockDiscovery::new();
    let registry = SourceRegistry::spawn(discovery.listen()?);
    let mut snapshots = registry.subscribe()?;
    let _ = unwrap_stream(&mut snapshots, 500).await;
    let _galley = handle.found(fixtures::galley_id());
    let snapshot = unwrap_stream(&mut snapshots, 500).await;

    // Act
    registry.close();
    registry.close();

    // Assert
    assert_stream_ended(&mut snapshots, 500).await;
    assert!(registry.is_closed());
    assert!(snapshot[0].feed.is_closed());
    assert!(matches!(
        registry.subscribe(),
        Err(TagfluxError::Closed { .. })
    ));

    Ok(())
}
