use super::{send, RestartError, Restarter};
use crate::capability::{Console, ConsoleConnector, StatusSource};
use log::{info, warn};
use tokio::time::sleep;

const STEP: &str = "shutting down";

impl<'a, C, S> Restarter<'a, C, S>
where
    C: ConsoleConnector,
    S: StatusSource,
{
    /// Kicks everyone, saves the world and stops the server
    ///
    /// A failure before `stop` aborts the restart with the server still up.
    /// A failure on `stop` itself is expected: the server may close the
    /// console before it answers.
    pub async fn shutdown<T: Console>(&self, session: &mut T) -> Result<(), RestartError> {
        let commands = &self.config.commands;
        let save_wait = self.config.timings.save_wait();

        info!("Restart in progress");
        send(session, STEP, &commands.broadcast("Restarting now...")).await?;
        send(session, STEP, &commands.kick_all).await?;
        send(session, STEP, &commands.save).await?;

        info!("Waiting {}s for server to save world", save_wait.as_secs());
        sleep(save_wait).await;

        info!("Stopping server");
        if let Err(e) = send(session, STEP, &commands.stop).await {
            warn!("No reply to stop command ({}), assuming the server is going down", e);
        }

        Ok(())
    }
}
