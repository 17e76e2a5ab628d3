//! MongoDB driver implementation

use async_trait::async_trait;
use mongodb::{bson::doc, options::ClientOptions, Client};
use std::time::Instant;

use crate::db::connector::{ConnectionConfig, ConnectionInfo, Connector};
use crate::db::error::{ConnectionError, Result};

#[derive(Debug)]
pub struct MongoConnector {
    config: ConnectionConfig,
}

impl MongoConnector {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let uri = &config.uri;
        if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
            return Err(ConnectionError::InvalidConnectionString(
                "MongoDB connection string must start with mongodb:// or mongodb+srv://".into(),
            ));
        }
        Ok(Self { config })
    }
}

#[async_trait]
impl Connector for MongoConnector {
    async fn connect(&self) -> Result<ConnectionInfo> {
        let start = Instant::now();

        // Parse connection string. Timeouts stay whatever the driver
        // defaults to (or whatever the URI itself carries).
        let mut client_options = ClientOptions::parse(&self.config.uri)
            .await
            .map_err(|e| ConnectionError::InvalidConnectionString(e.to_string()))?;
        client_options.default_database = Some(self.config.database.clone());

        // Create client
        let client = Client::with_options(client_options)
            .map_err(|e| ConnectionError::Failed(e.to_string()))?;

        // Ping the configured database; this is the actual connection attempt.
        let db = client.database(&self.config.database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectionError::Failed(e.to_string()))?;

        // The connection is established at this point; a failed version probe
        // must not turn it into a reported failure.
        let server_version = db
            .run_command(doc! { "buildInfo": 1 })
            .await
            .ok()
            .and_then(|info| {
                info.get_str("version")
                    .ok()
                    .map(|v| format!("MongoDB {}", v))
            });

        let latency_ms = start.elapsed().as_millis() as u64;

        Ok(ConnectionInfo {
            server_version,
            latency_ms,
        })
    }
}
