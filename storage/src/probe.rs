use async_trait::async_trait;
use config::{EnvSnapshot, MigrationTarget};
use errors::ProbeError;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of a single connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ConnectionProbeResult {
    /// The target connection string is unset; nothing was attempted.
    NotConfigured,
    Success { database_name: String, host: String },
    Failure { message: String }
}

impl ConnectionProbeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Opens connections to a data store.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Backend name used in logs and error messages.
    fn backend(&self) -> &'static str;

    /// Open one connection and confirm the server answers.
    async fn connect(&self, uri: &str) -> Result<Box<dyn Connection>, ProbeError>;
}

/// An open connection acquired by a [`Connector`].
#[async_trait]
pub trait Connection: Send {
    fn database_name(&self) -> &str;

    fn host(&self) -> &str;

    /// Release the connection. Called exactly once by the prober.
    async fn close(&mut self);
}

/// Probe the migration target once.
///
/// Returns [`ConnectionProbeResult::NotConfigured`] without touching the
/// connector when `target.uri_variable` is unset. An acquired connection is
/// always closed before returning. Errors are folded into
/// [`ConnectionProbeResult::Failure`]; nothing is retried.
pub async fn probe_connection(
    snapshot: &EnvSnapshot,
    target: &MigrationTarget,
    connector: &dyn Connector
) -> ConnectionProbeResult {
    let Some(uri) = snapshot.get(&target.uri_variable) else {
        info!(
            variable = %target.uri_variable,
            "Connection string not configured, skipping probe"
        );
        return ConnectionProbeResult::NotConfigured;
    };

    info!(backend = connector.backend(), "Probing connection");

    match connector.connect(uri).await {
        Ok(mut conn) => {
            let database_name = conn.database_name().to_string();
            let host = conn.host().to_string();
            conn.close().await;

            info!(
                backend = connector.backend(),
                database = %database_name,
                host = %host,
                "Connection probe succeeded"
            );
            ConnectionProbeResult::Success {
                database_name,
                host
            }
        }
        Err(e) => {
            warn!(backend = connector.backend(), error = %e, "Connection probe failed");
            ConnectionProbeResult::Failure {
                message: e.to_string()
            }
        }
    }
}
