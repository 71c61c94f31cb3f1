use std::time::Duration;

/// Describes a time in the future relative to now ("in 10 minutes")
///
/// Units are truncated, not rounded: 10m 5s reads as "in 10 minutes".
pub fn natural_time(remaining: Duration) -> String {
    let secs = remaining.as_secs();

    let (count, unit) = match secs {
        0 => return "now".to_string(),
        1..=59 => (secs, "second"),
        60..=3599 => (secs / 60, "minute"),
        3600..=86399 => (secs / 3600, "hour"),
        _ => (secs / 86400, "day"),
    };

    match (count, unit) {
        (1, "hour") => "in an hour".to_string(),
        (1, unit) => format!("in a {}", unit),
        (n, unit) => format!("in {} {}s", n, unit),
    }
}
