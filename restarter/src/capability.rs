//! The two outside services a restart depends on
//!
//! The orchestrator only sees these traits. Production wiring uses the
//! `remote` clients; tests substitute scripted fakes.

use crate::config::Config;
use remote::{ConsoleError, RconSession, StatusError, StatusResponse};
use std::time::Duration;

/// An authenticated remote console session
#[allow(async_fn_in_trait)]
pub trait Console {
    async fn command(&mut self, command: &str) -> Result<String, ConsoleError>;
}

/// Opens authenticated console sessions
#[allow(async_fn_in_trait)]
pub trait ConsoleConnector {
    type Session: Console;

    /// Connects and logs in; a session is only returned once authenticated
    async fn open(&self) -> Result<Self::Session, ConsoleError>;
}

#[allow(async_fn_in_trait)]
pub trait StatusSource {
    async fn status(&self) -> Result<StatusResponse, StatusError>;
}

impl Console for RconSession {
    async fn command(&mut self, command: &str) -> Result<String, ConsoleError> {
        RconSession::command(self, command).await
    }
}

pub struct RconConnector {
    host: String,
    port: u16,
    password: String,
    io_timeout: Duration,
}

impl RconConnector {
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.server_host.clone(),
            port: config.server_rcon_port,
            password: config.server_rcon_password.clone(),
            io_timeout: config.timings.rcon_timeout(),
        }
    }
}

impl ConsoleConnector for RconConnector {
    type Session = RconSession;

    async fn open(&self) -> Result<RconSession, ConsoleError> {
        RconSession::open(&self.host, self.port, &self.password, self.io_timeout).await
    }
}

pub struct ServerPinger {
    host: String,
    port: u16,
    timeout: Duration,
}

impl ServerPinger {
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.server_host.clone(),
            port: config.server_port,
            timeout: config.timings.status_timeout(),
        }
    }
}

impl StatusSource for ServerPinger {
    async fn status(&self) -> Result<StatusResponse, StatusError> {
        remote::query_status(&self.host, self.port, self.timeout).await
    }
}
