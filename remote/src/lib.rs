//! # Remote Server Clients
//!
//! Thin async adapters over the two services a game server exposes to
//! operators outside the process: the remote console and the status ping.
//! The wire protocols themselves come from the `rcon` and
//! `async-minecraft-ping` crates; this crate adds timeouts and error types
//! the restart logic can act on.
//!
//! ## Module Organization
//!
//! ### Console Module (`console`)
//! An authenticated command channel:
//! - Connect and login bounded by one I/O timeout
//! - A distinct error for a rejected password
//! - Every command bounded by the same timeout
//!
//! ### Status Module (`status`)
//! An unauthenticated liveness check:
//! - One status query over a fresh connection, bounded as a whole
//! - Distinct errors for an unreachable server, a silent one and a garbled
//!   reply
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use remote::{query_status, RconSession};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let status = query_status("127.0.0.1", 25565, Duration::from_secs(3)).await?;
//!     println!("{} players online", status.players.online);
//!
//!     let mut rcon = RconSession::open("127.0.0.1", 25575, "secret", Duration::from_secs(10)).await?;
//!     rcon.command("say hello").await?;
//!     Ok(())
//! }
//! ```

pub mod console;
pub mod status;

pub use async_minecraft_ping::{
    ServerDescription, ServerPlayer, ServerPlayers, ServerVersion, StatusResponse,
};
pub use console::{ConsoleError, RconSession};
pub use status::{query_status, StatusError};
