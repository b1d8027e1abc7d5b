use crate::probe::{Connection, Connector};
use async_trait::async_trait;
use errors::ProbeError;
use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::debug;

const BACKEND: &str = "MongoDB";

/// Database the driver falls back to when the URI names none.
pub const DEFAULT_DATABASE: &str = "test";

/// Application name reported to the server in the handshake.
const APP_NAME: &str = "atlas-check";

/// Opens single MongoDB connections for probing.
///
/// Uses the driver's default options; only the server-selection timeout can
/// be tightened.
#[derive(Debug, Clone, Default)]
pub struct MongoConnector {
    server_selection_timeout: Option<Duration>
}

impl MongoConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl Connector for MongoConnector {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn connect(&self, uri: &str) -> Result<Box<dyn Connection>, ProbeError> {
        let mut options =
            ClientOptions::parse(uri)
                .await
                .map_err(|e| ProbeError::InvalidConnectionString {
                    reason: e.to_string()
                })?;

        if let Some(timeout) = self.server_selection_timeout {
            options.server_selection_timeout = Some(timeout);
        }
        options.app_name = Some(APP_NAME.to_string());

        let database = options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let host = options
            .hosts
            .first()
            .map(|h| h.to_string())
            .unwrap_or_default();

        let client =
            Client::with_options(options).map_err(|e| ProbeError::connection(BACKEND, e))?;

        // The driver connects lazily; the ping forces server selection.
        if let Err(e) = client
            .database(&database)
            .run_command(doc! { "ping": 1 })
            .await
        {
            client.shutdown().await;
            return Err(ProbeError::connection(BACKEND, e));
        }

        debug!(database = %database, host = %host, "MongoDB ping acknowledged");

        Ok(Box::new(MongoConnection {
            client: Some(client),
            database,
            host
        }))
    }
}

/// A MongoDB client held open for the duration of a probe.
pub struct MongoConnection {
    client: Option<Client>,
    database: String,
    host: String
}

#[async_trait]
impl Connection for MongoConnection {
    fn database_name(&self) -> &str {
        &self.database
    }

    fn host(&self) -> &str {
        &self.host
    }

    async fn close(&mut self) {
        if let Some(client) = self.client.take() {
            client.shutdown().await;
            debug!(host = %self.host, "MongoDB client shut down");
        }
    }
}
