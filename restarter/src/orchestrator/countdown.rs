use super::{send, RestartError, Restarter};
use crate::capability::{Console, ConsoleConnector, StatusSource};
use crate::utils::natural_time;
use log::{info, warn};
use std::time::Duration;
use tokio::time::{sleep, Instant};

const STEP: &str = "counting down";
const TICK: Duration = Duration::from_secs(1);
const CALLED_OFF: &str = "Restart cancelled";

fn remaining(target: Instant) -> Duration {
    target.saturating_duration_since(Instant::now())
}

impl<'a, C, S> Restarter<'a, C, S>
where
    C: ConsoleConnector,
    S: StatusSource,
{
    /// Warns players until `target`, then closes the server to new joins
    ///
    /// Reminders go out once a minute while at least a minute is left, timed
    /// from the previous reminder rather than from `target`. Inside the last
    /// minute nothing is sent until the final per-second countdown.
    ///
    /// Cancellation is honored until the whitelist closes: players are told
    /// the restart is off and nothing else is sent. From `whitelist on`
    /// onwards the countdown runs to the end.
    pub async fn countdown<T: Console>(
        &self,
        session: &mut T,
        target: Instant,
    ) -> Result<(), RestartError> {
        let commands = &self.config.commands;
        let interval = self.config.timings.reminder_interval();
        let final_countdown = self.config.timings.final_countdown();

        if self.cancel.is_cancelled() {
            info!("Cancelled before the countdown started, nothing sent");
            return Err(RestartError::Cancelled);
        }

        let mut last_reminder = Instant::now();
        let message = format!("Restarting {}", natural_time(remaining(target)));
        send(session, STEP, &commands.broadcast(&message)).await?;

        while remaining(target) >= final_countdown {
            if self.cancel.is_cancelled() {
                info!("Cancelled during countdown, calling off the restart");
                if let Err(e) = send(session, STEP, &commands.broadcast(CALLED_OFF)).await {
                    warn!("Could not tell players the restart is off ({})", e);
                }
                return Err(RestartError::Cancelled);
            }

            let left = remaining(target);
            if left >= interval && last_reminder.elapsed() >= interval {
                let phrase = natural_time(left);
                info!("Sending reminder to server ({})", phrase);
                let message = format!("Restarting {}", phrase);
                send(session, STEP, &commands.broadcast(&message)).await?;
                last_reminder = Instant::now();
            }
            sleep(TICK).await;
        }

        info!(
            "Under {}s remaining till shutdown, stopping reminders and enabling whitelist",
            final_countdown.as_secs()
        );
        send(session, STEP, &commands.whitelist_on).await?;

        for n in (1..=final_countdown.as_secs()).rev() {
            let message = format!("Restarting in {}s", n);
            send(session, STEP, &commands.broadcast(&message)).await?;
            sleep(TICK).await;
        }

        Ok(())
    }
}
