use config::{EnvSnapshot, MigrationTarget};
use std::time::Duration;
use storage::{ConnectionProbeResult, MongoConnector, probe_connection};
use testing::{FIXTURE_DATABASE, mongo};

fn snapshot_with(uri: &str) -> EnvSnapshot {
    EnvSnapshot::from_pairs([("MONGODB_ATLAS_URI", uri)])
}

#[tokio::test]
async fn test_probe_reachable_mongodb() {
    let Some(fixture) = mongo().await else {
        eprintln!("Skipping MongoDB test: Docker not available");
        return;
    };

    let connector = MongoConnector::new().with_server_selection_timeout(Duration::from_secs(10));
    let result = probe_connection(
        &snapshot_with(&fixture.url()),
        &MigrationTarget::default(),
        &connector
    )
    .await;

    match result {
        ConnectionProbeResult::Success {
            database_name,
            host
        } => {
            assert_eq!(database_name, FIXTURE_DATABASE);
            assert!(host.contains(&fixture.port().to_string()));
        }
        other => panic!("expected success, got {other:?}")
    }
}

#[tokio::test]
async fn test_probe_defaults_database_name_when_uri_has_none() {
    let Some(fixture) = mongo().await else {
        eprintln!("Skipping MongoDB test: Docker not available");
        return;
    };

    let uri = format!("mongodb://localhost:{}/?directConnection=true", fixture.port());
    let result = probe_connection(
        &snapshot_with(&uri),
        &MigrationTarget::default(),
        &MongoConnector::new()
    )
    .await;

    assert_eq!(
        result,
        ConnectionProbeResult::Success {
            database_name: "test".to_string(),
            host: format!("localhost:{}", fixture.port())
        }
    );
}

#[tokio::test]
async fn test_repeated_probes_are_independent() {
    let Some(fixture) = mongo().await else {
        eprintln!("Skipping MongoDB test: Docker not available");
        return;
    };

    let snapshot = snapshot_with(&fixture.url());
    let connector = MongoConnector::new();
    for _ in 0..3 {
        let result = probe_connection(&snapshot, &MigrationTarget::default(), &connector).await;
        assert!(result.is_success(), "probe failed: {result:?}");
    }
}

#[tokio::test]
async fn test_probe_invalid_uri_does_not_raise() {
    let result = probe_connection(
        &snapshot_with("http://not-mongo"),
        &MigrationTarget::default(),
        &MongoConnector::new()
    )
    .await;

    match result {
        ConnectionProbeResult::Failure { message } => assert!(!message.is_empty()),
        other => panic!("expected failure, got {other:?}")
    }
}
