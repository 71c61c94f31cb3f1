use clap::Parser;
use log::{error, info, warn};
use restarter::cancel::cancellation;
use restarter::capability::{RconConnector, ServerPinger};
use restarter::config::Config;
use restarter::{exit_code, logging, Restarter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Restarts a Minecraft server gracefully, warning players beforehand.
/// Meant to be run by cron or a systemd timer; the exit code says how it went.
#[tokio::main]
async fn main() -> ExitCode {
    // Command line arguments
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// YAML file with the server address and console password
        #[clap(short, long, default_value = "config.yaml")]
        config: PathBuf,
        /// File every log line is appended to, next to stdout
        #[clap(short, long, default_value = "debug.log")]
        log_file: PathBuf,
        /// Cancel the restart if it has not finished after this many minutes
        #[clap(long, value_name = "MINUTES", value_parser = clap::value_parser!(u64).range(1..=10_080))]
        give_up_after: Option<u64>,
    }

    let args = Args::parse();

    if let Err(e) = logging::init(&args.log_file) {
        eprintln!(
            "Failed to open log file {}: {}",
            args.log_file.display(),
            e
        );
        return ExitCode::from(exit_code::SETUP_ERROR);
    }

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(exit_code::SETUP_ERROR);
        }
    };

    let (handle, token) = cancellation();

    // Ctrl+C cancels the open-ended waits
    {
        let handle = handle.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling restart");
                handle.cancel();
            }
        });
    }

    if let Some(minutes) = args.give_up_after {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(minutes.saturating_mul(60))).await;
            warn!("Still not done after {} minutes, giving up", minutes);
            handle.cancel();
        });
    }

    let restarter = Restarter::new(
        &config,
        RconConnector::from_config(&config),
        ServerPinger::from_config(&config),
        token,
    );

    match restarter.run().await {
        Ok(()) => ExitCode::from(exit_code::SUCCESS),
        Err(e) => {
            let code = e.exit_code();
            error!("{}", e);
            info!("Exiting with code {} ({})", code, exit_code::description(code));
            ExitCode::from(code)
        }
    }
}
