use super::{RestartError, Restarter};
use crate::capability::{ConsoleConnector, StatusSource};
use log::{info, warn};

impl<'a, C, S> Restarter<'a, C, S>
where
    C: ConsoleConnector,
    S: StatusSource,
{
    /// Logs in to the remote console, retrying on a fixed interval
    ///
    /// Every failure is retried the same way: the server may still be
    /// starting, or the console may be busy. There is no attempt limit; only
    /// cancellation ends the loop early.
    pub async fn acquire_console(&self) -> Result<C::Session, RestartError> {
        let retry = self.config.timings.login_retry();
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);
            info!("Trying to log in to the remote console (attempt {})", attempt);

            match self.console.open().await {
                Ok(session) => {
                    info!("Got remote console session");
                    return Ok(session);
                }
                Err(e) if e.is_auth() => {
                    warn!(
                        "Remote console rejected the password, trying again in {}s",
                        retry.as_secs()
                    );
                }
                Err(e) if e.is_unreachable() => {
                    info!(
                        "Remote console not reachable yet ({}), trying again in {}s",
                        e,
                        retry.as_secs()
                    );
                }
                Err(e) => {
                    warn!(
                        "Failed to log in to the server ({}), trying again in {}s",
                        e,
                        retry.as_secs()
                    );
                }
            }

            self.pause(retry).await?;
        }
    }
}
