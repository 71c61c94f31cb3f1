//! Remote console session over the `rcon` crate

use async_std::net::TcpStream;
use log::debug;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("could not connect to remote console: {0}")]
    Connect(#[source] io::Error),
    #[error("remote console rejected the password")]
    AuthRejected,
    #[error("remote console did not answer in time")]
    Timeout,
    #[error("command is too long for the remote console")]
    CommandTooLong,
    #[error("remote console connection failed: {0}")]
    Io(#[from] io::Error),
}

impl From<rcon::Error> for ConsoleError {
    fn from(err: rcon::Error) -> Self {
        match err {
            rcon::Error::Auth => Self::AuthRejected,
            rcon::Error::CommandTooLong => Self::CommandTooLong,
            rcon::Error::Io(e) => Self::Io(e),
        }
    }
}

impl ConsoleError {
    /// The server answered but refused the credentials
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRejected)
    }

    /// Nothing is listening, or it stopped answering
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Timeout)
    }
}

/// Authenticated remote console session
///
/// Only [`open`](Self::open) hands one out, so a session always has a
/// successful login behind it.
pub struct RconSession {
    conn: rcon::Connection,
    io_timeout: Duration,
}

impl RconSession {
    /// Connects to `host:port` and logs in with `password`
    ///
    /// Connecting and logging in are each bounded by `io_timeout`.
    pub async fn open(
        host: &str,
        port: u16,
        password: &str,
        io_timeout: Duration,
    ) -> Result<Self, ConsoleError> {
        let stream = match timeout(io_timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(ConsoleError::Connect(e)),
            Err(_) => return Err(ConsoleError::Timeout),
        };
        if let Err(e) = stream.set_nodelay(true) {
            debug!("Could not set TCP_NODELAY on console socket: {}", e);
        }
        debug!("Connected to remote console at {}:{}", host, port);

        let login = rcon::Connection::builder()
            .enable_minecraft_quirks(true)
            .connect_stream(stream, password);
        let conn = match timeout(io_timeout, login).await {
            Ok(result) => result?,
            Err(_) => return Err(ConsoleError::Timeout),
        };

        Ok(Self { conn, io_timeout })
    }

    /// Runs a console command and returns the server's reply text
    pub async fn command(&mut self, command: &str) -> Result<String, ConsoleError> {
        match timeout(self.io_timeout, self.conn.cmd(command)).await {
            Ok(reply) => Ok(reply?),
            Err(_) => Err(ConsoleError::Timeout),
        }
    }
}
