use super::{RestartError, Restarter};
use crate::capability::{ConsoleConnector, StatusSource};
use log::{info, warn};
use remote::StatusResponse;

impl<'a, C, S> Restarter<'a, C, S>
where
    C: ConsoleConnector,
    S: StatusSource,
{
    /// Checks the server is up and not too busy to restart
    ///
    /// A failed ping here is final: an offline server has nothing to restart,
    /// unlike during recovery where offline means still booting.
    pub async fn preflight(&self) -> Result<StatusResponse, RestartError> {
        let status = self
            .status
            .status()
            .await
            .map_err(RestartError::Unreachable)?;

        let online = status.players.online;
        info!(
            "Server currently online with {} players on ({})",
            online, status.version.name
        );

        let threshold = self.config.player_threshold;
        if online > threshold {
            info!("Server has more than {} players connected", threshold);
            if !self.config.dont_restart_if_players {
                info!("Cancelling restart");
                return Err(RestartError::TooManyPlayers { online, threshold });
            }
            warn!("Restarting anyway, occupancy override is set");
        }

        Ok(status)
    }
}
