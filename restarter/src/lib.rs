//! # Scheduled Restart Orchestrator
//!
//! This library drives a graceful restart of one Minecraft server. It warns
//! players ahead of time, stops the server through its remote console, waits
//! for the external process manager to start it again and then reopens it.
//!
//! ## Sequence
//!
//! ### Preflight
//! The server is pinged over the status protocol. A server that does not
//! answer is left alone, as is one with more players than the configured
//! threshold unless the override is set.
//!
//! ### Countdown
//! Reminders are broadcast once a minute. In the final seconds the whitelist
//! is switched on so nobody new joins, and a per-second countdown follows.
//!
//! ### Shutdown
//! Players are kicked, the world is saved and `stop` is issued. Bringing the
//! process back is not this tool's job.
//!
//! ### Recovery
//! After a fixed wait the server is pinged until it answers, a new console
//! session is opened and the whitelist is switched off again.
//!
//! ## Failure Model
//!
//! Every way a restart can end maps onto one process exit code, see
//! [`exit_code`]. The operator can cancel through [`cancel`] up to the point
//! the whitelist closes, and again while waiting for the server to come back.
//!
//! ## Usage
//!
//! ```no_run
//! use restarter::capability::{RconConnector, ServerPinger};
//! use restarter::cancel::CancelToken;
//! use restarter::config::Config;
//! use restarter::Restarter;
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(Path::new("config.yaml"))?;
//! let restarter = Restarter::new(
//!     &config,
//!     RconConnector::from_config(&config),
//!     ServerPinger::from_config(&config),
//!     CancelToken::never(),
//! );
//! restarter.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod capability;
pub mod config;
pub mod exit_code;
pub mod logging;
pub mod orchestrator;
pub mod utils;

pub use orchestrator::{RestartError, Restarter};
