//! Restart configuration, read once from a YAML file at startup
//!
//! The top-level keys match the files operators already have:
//!
//! ```yaml
//! server_host: play.example.net
//! server_port: 25565
//! server_rcon_port: 25575
//! server_rcon_password: secret
//! restart_reminder_time: 10
//! dont_restart_if_players: false
//! ```
//!
//! `player_threshold`, `commands` and `timings` are optional and default to
//! the values the tool has always used.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub server_host: String,
    /// Game port, used for the status ping
    pub server_port: u16,
    pub server_rcon_port: u16,
    pub server_rcon_password: String,
    /// Minutes of warning before the final countdown
    pub restart_reminder_time: u64,
    /// When set, restart even if more than `player_threshold` players are on
    #[serde(default)]
    pub dont_restart_if_players: bool,
    #[serde(default = "default_player_threshold")]
    pub player_threshold: u32,
    #[serde(default)]
    pub commands: Commands,
    #[serde(default)]
    pub timings: Timings,
}

/// Longest accepted warning period, one day
pub const MAX_REMINDER_MINUTES: u64 = 24 * 60;
/// Upper bound on every entry in `timings`
pub const MAX_TIMING_SECS: u64 = 24 * 60 * 60;
pub const MAX_LEAD_TIME: Duration =
    Duration::from_secs(MAX_REMINDER_MINUTES * 60 + MAX_TIMING_SECS);

fn default_player_threshold() -> u32 {
    20
}

/// Console commands issued during a restart
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Commands {
    /// Prepended to every broadcast message
    pub broadcast_prefix: String,
    pub kick_all: String,
    pub save: String,
    pub stop: String,
    pub whitelist_on: String,
    pub whitelist_off: String,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            broadcast_prefix: "ebc &a (!) ".to_string(),
            kick_all: "ekickall".to_string(),
            save: "save-all".to_string(),
            stop: "stop".to_string(),
            whitelist_on: "whitelist on".to_string(),
            whitelist_off: "whitelist off".to_string(),
        }
    }
}

impl Commands {
    pub fn broadcast(&self, message: &str) -> String {
        format!("{}{}", self.broadcast_prefix, message)
    }
}

/// Fixed waits and timeouts, all in seconds
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub login_retry_secs: u64,
    pub status_poll_secs: u64,
    pub save_wait_secs: u64,
    /// Time given to the process manager to bring the server back
    pub restart_wait_secs: u64,
    /// Added on top of the reminder time when fixing the restart instant
    pub grace_secs: u64,
    pub reminder_interval_secs: u64,
    pub final_countdown_secs: u64,
    pub rcon_timeout_secs: u64,
    pub status_timeout_secs: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            login_retry_secs: 5,
            status_poll_secs: 5,
            save_wait_secs: 5,
            restart_wait_secs: 180,
            grace_secs: 5,
            reminder_interval_secs: 60,
            final_countdown_secs: 10,
            rcon_timeout_secs: 10,
            status_timeout_secs: 3,
        }
    }
}

impl Timings {
    pub fn login_retry(&self) -> Duration {
        Duration::from_secs(self.login_retry_secs)
    }

    pub fn status_poll(&self) -> Duration {
        Duration::from_secs(self.status_poll_secs)
    }

    pub fn save_wait(&self) -> Duration {
        Duration::from_secs(self.save_wait_secs)
    }

    pub fn restart_wait(&self) -> Duration {
        Duration::from_secs(self.restart_wait_secs)
    }

    pub fn grace(&self) -> Duration {
        Duration::from_secs(self.grace_secs)
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_secs)
    }

    pub fn final_countdown(&self) -> Duration {
        Duration::from_secs(self.final_countdown_secs)
    }

    pub fn rcon_timeout(&self) -> Duration {
        Duration::from_secs(self.rcon_timeout_secs)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }

    fn named(&self) -> [(&'static str, u64); 9] {
        [
            ("login_retry_secs", self.login_retry_secs),
            ("status_poll_secs", self.status_poll_secs),
            ("save_wait_secs", self.save_wait_secs),
            ("restart_wait_secs", self.restart_wait_secs),
            ("grace_secs", self.grace_secs),
            ("reminder_interval_secs", self.reminder_interval_secs),
            ("final_countdown_secs", self.final_countdown_secs),
            ("rcon_timeout_secs", self.rcon_timeout_secs),
            ("status_timeout_secs", self.status_timeout_secs),
        ]
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Lead time between the restart decision and the restart itself
    ///
    /// Never exceeds [`MAX_LEAD_TIME`], even for a config that skipped
    /// validation.
    pub fn lead_time(&self) -> Duration {
        Duration::from_secs(self.restart_reminder_time.saturating_mul(60))
            .saturating_add(self.timings.grace())
            .min(MAX_LEAD_TIME)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server_host.trim().is_empty() {
            return Err(ConfigError::Invalid("server_host is empty".to_string()));
        }
        if self.server_port == 0 {
            return Err(ConfigError::Invalid("server_port must be non-zero".to_string()));
        }
        if self.server_rcon_port == 0 {
            return Err(ConfigError::Invalid(
                "server_rcon_port must be non-zero".to_string(),
            ));
        }
        if self.server_rcon_password.is_empty() {
            return Err(ConfigError::Invalid(
                "server_rcon_password is empty".to_string(),
            ));
        }
        if self.timings.final_countdown_secs == 0 {
            return Err(ConfigError::Invalid(
                "timings.final_countdown_secs must be at least 1".to_string(),
            ));
        }
        if self.timings.reminder_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "timings.reminder_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.restart_reminder_time > MAX_REMINDER_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "restart_reminder_time must be at most {} minutes",
                MAX_REMINDER_MINUTES
            )));
        }
        for (name, secs) in self.timings.named() {
            if secs > MAX_TIMING_SECS {
                return Err(ConfigError::Invalid(format!(
                    "timings.{} must be at most {} seconds",
                    name, MAX_TIMING_SECS
                )));
            }
        }
        Ok(())
    }
}
