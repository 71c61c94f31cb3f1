//! Process exit codes
//!
//! Each way a restart can end has its own code so that whatever schedules the
//! tool (cron, a systemd timer) can tell them apart without reading the log.

/// Restart completed and the server is open again
pub const SUCCESS: u8 = 0;
/// Status ping failed before anything was done; there is nothing to restart
pub const UNREACHABLE: u8 = 1;
/// Too many players online and the override is not set
pub const PLAYERS_ONLINE: u8 = 2;
/// The console connection failed partway through the sequence
pub const CONSOLE_LOST: u8 = 3;
/// Interrupted by Ctrl+C or by the operator deadline
pub const CANCELLED: u8 = 4;
/// Bad configuration, or the log file could not be opened
pub const SETUP_ERROR: u8 = 5;

pub const fn description(code: u8) -> &'static str {
    match code {
        SUCCESS => "success",
        UNREACHABLE => "server unreachable",
        PLAYERS_ONLINE => "too many players online",
        CONSOLE_LOST => "remote console lost",
        CANCELLED => "cancelled",
        SETUP_ERROR => "setup error",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            SUCCESS,
            UNREACHABLE,
            PLAYERS_ONLINE,
            CONSOLE_LOST,
            CANCELLED,
            SETUP_ERROR,
        ];
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_only_success_is_zero() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(description(SUCCESS), "success");
        assert_eq!(description(PLAYERS_ONLINE), "too many players online");
        assert_eq!(description(99), "unknown");
    }
}
