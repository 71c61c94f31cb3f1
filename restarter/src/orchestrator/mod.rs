//! The restart sequence
//!
//! One forward pipeline, each step a method on [`Restarter`]:
//!
//! 1. [`preflight`](Restarter::preflight): ping the server, refuse if it is
//!    down or too busy
//! 2. [`acquire_console`](Restarter::acquire_console): log in, retrying until
//!    it works
//! 3. [`countdown`](Restarter::countdown): broadcast reminders, close the
//!    whitelist, count the last seconds
//! 4. [`shutdown`](Restarter::shutdown): kick, save, stop
//! 5. [`await_recovery`](Restarter::await_recovery): wait for the process
//!    manager to bring it back, log in again, open the whitelist
//!
//! The console session from step 2 is dropped after step 4. The server
//! closes it when it stops, so step 5 always opens a fresh one.
//!
//! Cancellation ends the run cleanly up to the moment the whitelist closes.
//! After that the sequence runs through `stop`, and a cancel during step 5
//! makes one attempt to reopen the whitelist before giving up.

mod countdown;
mod preflight;
mod recovery;
mod session;
mod shutdown;

#[cfg(test)]
mod mock;

use crate::cancel::CancelToken;
use crate::capability::{Console, ConsoleConnector, StatusSource};
use crate::config::Config;
use crate::exit_code;
use crate::utils::natural_time;
use log::{debug, info};
use remote::{ConsoleError, StatusError};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, Instant};

#[derive(Debug, Error)]
pub enum RestartError {
    #[error("cannot get server status, not restarting: {0}")]
    Unreachable(#[source] StatusError),
    #[error("{online} players online is over the limit of {threshold}, not restarting")]
    TooManyPlayers { online: u32, threshold: u32 },
    #[error("lost the remote console while {step}: {source}")]
    ConsoleLost {
        step: &'static str,
        #[source]
        source: ConsoleError,
    },
    #[error("cancelled by operator")]
    Cancelled,
}

impl RestartError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Unreachable(_) => exit_code::UNREACHABLE,
            Self::TooManyPlayers { .. } => exit_code::PLAYERS_ONLINE,
            Self::ConsoleLost { .. } => exit_code::CONSOLE_LOST,
            Self::Cancelled => exit_code::CANCELLED,
        }
    }
}

/// Drives one restart of one server
pub struct Restarter<'a, C, S> {
    config: &'a Config,
    console: C,
    status: S,
    cancel: CancelToken,
}

impl<'a, C, S> Restarter<'a, C, S>
where
    C: ConsoleConnector,
    S: StatusSource,
{
    pub fn new(config: &'a Config, console: C, status: S, cancel: CancelToken) -> Self {
        Self {
            config,
            console,
            status,
            cancel,
        }
    }

    /// Runs the whole sequence, from preflight to reopening the server
    pub async fn run(&self) -> Result<(), RestartError> {
        info!(
            "Starting restart of {}:{}",
            self.config.server_host, self.config.server_port
        );

        self.preflight().await?;

        let mut session = self.acquire_console().await?;

        let target = Instant::now() + self.config.lead_time();
        info!(
            "Restarting {}",
            natural_time(target.saturating_duration_since(Instant::now()))
        );
        self.countdown(&mut session, target).await?;
        self.shutdown(&mut session).await?;
        drop(session);

        // the whitelist is on from here, so a cancel must still try to lift it
        if let Err(e) = self.await_recovery().await {
            if matches!(e, RestartError::Cancelled) {
                self.reopen_after_cancel().await;
            }
            return Err(e);
        }

        info!("Restart complete");
        Ok(())
    }

    /// Sleeps, unless the operator cancels first
    async fn pause(&self, duration: Duration) -> Result<(), RestartError> {
        tokio::select! {
            _ = sleep(duration) => Ok(()),
            _ = self.cancel.cancelled() => {
                info!("Cancellation requested, giving up");
                Err(RestartError::Cancelled)
            }
        }
    }
}

/// Sends one command; the reply is logged but not interpreted
async fn send<T: Console>(
    session: &mut T,
    step: &'static str,
    command: &str,
) -> Result<(), RestartError> {
    match session.command(command).await {
        Ok(reply) => {
            if !reply.is_empty() {
                debug!("{} -> {}", command, reply.trim_end());
            }
            Ok(())
        }
        Err(source) => Err(RestartError::ConsoleLost { step, source }),
    }
}
