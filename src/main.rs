use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ilmopilot::cdp::CdpBrowser;
use ilmopilot::cli::CliArgs;
use ilmopilot::pilot::{HoldOutcome, Pilot, RunRequest};
use ilmopilot::SignupProfile;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&args.log_level);
    info!("starting ilmopilot v{}", env!("CARGO_PKG_VERSION"));

    let profile = match &args.profile {
        Some(path) => load_profile(path)?,
        None => SignupProfile::default(),
    };
    let config = args.pilot_config();
    let request = RunRequest {
        event_name: args.event.clone(),
        quota_index: args.quota,
        signup_deadline: Duration::from_secs(args.signup_countdown),
        profile,
    };

    let browser = CdpBrowser::launch(config.headless)
        .await
        .context("launching browser session")?;

    let outcome = Pilot::new(&browser, &config).run(&request).await;
    browser.close().await;

    match outcome {
        Ok(report) => {
            info!(
                event = %report.event_name,
                filled_fields = report.filled_fields,
                "registration attempt finished"
            );
            if report.hold == HoldOutcome::Expired {
                warn!("hold expired without detecting completion");
            }
            Ok(())
        }
        Err(err) => {
            error!(stage = %err.stage, "registration run failed: {}", err.source);
            Err(err.into())
        }
    }
}

fn init_logging(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_profile(path: &Path) -> Result<SignupProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading profile file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing profile file {}", path.display()))
}
