//! Status ping client

use async_minecraft_ping::{ConnectionConfig, ServerError, StatusResponse};
use log::debug;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{timeout, Instant};

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("server is unreachable")]
    Unreachable,
    #[error("status query timed out")]
    Timeout,
    #[error("status query failed: {0}")]
    Protocol(#[source] ServerError),
}

impl From<ServerError> for StatusError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::FailedToConnect => Self::Unreachable,
            other => Self::Protocol(other),
        }
    }
}

/// Pings `host:port` and returns the server's status document
///
/// The whole query, connect included, is bounded by `limit`. The library's
/// own per-packet timeout is set above it so a silent server reads as
/// [`StatusError::Timeout`].
pub async fn query_status(
    host: &str,
    port: u16,
    limit: Duration,
) -> Result<StatusResponse, StatusError> {
    let started = Instant::now();

    let query = async {
        let connection = ConnectionConfig::build(host)
            .with_port(port)
            .with_timeout(limit.saturating_mul(2))
            .connect()
            .await?;
        Ok::<_, ServerError>(connection.status().await?.status)
    };

    let status = match timeout(limit, query).await {
        Ok(result) => result?,
        Err(_) => return Err(StatusError::Timeout),
    };

    debug!(
        "Status from {}:{} in {}ms: {} ({}/{} players)",
        host,
        port,
        started.elapsed().as_millis(),
        status.version.name,
        status.players.online,
        status.players.max
    );
    Ok(status)
}
