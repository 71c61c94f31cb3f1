use super::{send, RestartError, Restarter};
use crate::capability::{ConsoleConnector, StatusSource};
use log::{error, info, warn};

const STEP: &str = "reopening the server";

impl<'a, C, S> Restarter<'a, C, S>
where
    C: ConsoleConnector,
    S: StatusSource,
{
    /// Waits for the restarted server, then lifts the join restriction
    ///
    /// The process manager gets a fixed head start, after which the server is
    /// pinged until it answers. Both waits run until cancelled.
    pub async fn await_recovery(&self) -> Result<(), RestartError> {
        let timings = &self.config.timings;

        info!(
            "Waiting for server to restart ({}s+)",
            timings.restart_wait().as_secs()
        );
        self.pause(timings.restart_wait()).await?;

        loop {
            match self.status.status().await {
                Ok(status) => {
                    info!(
                        "Server is back online with {} players on",
                        status.players.online
                    );
                    break;
                }
                Err(e) => info!("Server not alive yet ({}), waiting..", e),
            }
            self.pause(timings.status_poll()).await?;
        }

        let mut session = self.acquire_console().await?;
        info!("Disabling whitelist");
        send(&mut session, STEP, &self.config.commands.whitelist_off).await
    }

    /// One attempt to lift the whitelist after the operator gave up waiting
    ///
    /// Ignores cancellation. If the console is not reachable the server is
    /// left whitelisted and the operator is told how to fix it.
    pub async fn reopen_after_cancel(&self) {
        let whitelist_off = &self.config.commands.whitelist_off;

        let result = match self.console.open().await {
            Ok(mut session) => send(&mut session, STEP, whitelist_off).await,
            Err(source) => Err(RestartError::ConsoleLost { step: STEP, source }),
        };

        match result {
            Ok(()) => warn!("Restart cancelled after shutdown, whitelist lifted"),
            Err(e) => error!(
                "Server is still whitelisted ({}); run `{}` on its console once it is back",
                e, whitelist_off
            ),
        }
    }
}
