use anyhow::{bail, Context, Result};
use clap::Parser;
use siri_remote_trigger::domain::models::DeviceIdentity;
use siri_remote_trigger::domain::settings::{Settings, SettingsService};
use siri_remote_trigger::infrastructure::logging::init_logger;
use std::path::PathBuf;
use tracing::{debug, info};

/// Send the Siri Remote magic packet and dump the notifications it unlocks.
///
/// Works only if the remote is already paired.
#[derive(Debug, Parser)]
#[command(name = "siri_remote_trigger", version)]
struct Cli {
    /// Device name, e.g. DJ7XXXXXXXXM
    device_name: Option<String>,

    /// Device MAC, e.g. FF:FF:FF:FF:FF:FF
    device_mac: Option<String>,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level or filter directive; `RUST_LOG` takes precedence
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => SettingsService::from_path(path.clone()),
        None => SettingsService::new(),
    };
    let _logging = init_logger(&settings.get().log_settings, cli.log_level.as_deref())?;
    debug!("Settings path: {:?}", settings.path());

    let identity = resolve_identity(&cli, settings.get())?;
    info!(
        "Target device {:?} at {} ({:#X})",
        identity.name, identity.mac, identity.address_value
    );

    run(identity).await
}

/// Command line arguments win; otherwise the configured device is used.
fn resolve_identity(cli: &Cli, settings: &Settings) -> Result<DeviceIdentity> {
    let (name, mac) = match (&cli.device_name, &cli.device_mac, &settings.device) {
        (Some(name), Some(mac), _) => (name.as_str(), mac.as_str()),
        (None, None, Some(device)) => (device.name.as_str(), device.mac.as_str()),
        _ => bail!(
            "Usage: siri_remote_trigger <DEVICENAME> <DEVICEMAC>\n\
             E.g. siri_remote_trigger DJ7XXXXXXXXM FF:FF:FF:FF:FF:FF"
        ),
    };
    DeviceIdentity::parse(name, mac).context("Invalid device identity")
}

#[cfg(windows)]
async fn run(identity: DeviceIdentity) -> Result<()> {
    use siri_remote_trigger::infrastructure::bluetooth::connection::WinRtTransport;
    use siri_remote_trigger::infrastructure::bluetooth::{TriggerOutcome, TriggerService};
    use std::time::Duration;
    use tracing::warn;

    let mut service = TriggerService::new(WinRtTransport::new());

    match service.send_magic_packet(&identity).await {
        TriggerOutcome::DeviceMismatch { reported_name } => {
            warn!(
                "Resolved device {:?} is not {:?}; nothing was sent",
                reported_name, identity.name
            );
        }
        TriggerOutcome::Completed(report) => debug!("Trigger report: {:?}", report),
    }

    info!("Waiting for notifications. Press Enter or Ctrl-C to exit.");
    wait_for_exit().await;

    match tokio::time::timeout(Duration::from_secs(1), service.shutdown()).await {
        Ok(count) => info!("Decoded {} notifications", count),
        Err(_) => debug!("Notification handlers still registered at exit"),
    }
    Ok(())
}

#[cfg(not(windows))]
async fn run(_identity: DeviceIdentity) -> Result<()> {
    Err(siri_remote_trigger::domain::errors::TransportError::Unavailable)
        .context("The WinRT Bluetooth transport is only available on Windows")
}

/// Mirrors a console `ReadLine`: any line on stdin, or Ctrl-C.
#[cfg(windows)]
async fn wait_for_exit() {
    use tokio::io::AsyncBufReadExt;

    let mut line = String::new();
    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
    tokio::select! {
        _ = stdin.read_line(&mut line) => {}
        _ = tokio::signal::ctrl_c() => {}
    }
}
