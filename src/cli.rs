//! Command line surface.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::config::PilotConfig;
use crate::port::Selector;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deadline-driven sign-up pilot for time-gated event registrations")]
pub struct CliArgs {
    /// Seconds until the sign-up opens; bounds the wait for the quota
    /// action to become clickable.
    #[arg(long = "signup-countdown", value_name = "SECS", default_value_t = 300)]
    pub signup_countdown: u64,

    /// Event name exactly as shown on the open events listing.
    #[arg(long, value_name = "NAME")]
    pub event: String,

    /// Zero-based index of the quota sign-up link, top to bottom.
    #[arg(long, default_value_t = 0)]
    pub quota: u32,

    /// Homepage that lists the open events.
    #[arg(long, value_name = "URL", default_value = crate::config::DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// JSON file with sign-up field values keyed by input id
    /// (e.g. {"firstName": "Ada", "email": "a@x.com"}).
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Seconds to hold the session open for manual completion.
    #[arg(long, value_name = "SECS", default_value_t = 200)]
    pub hold: u64,

    /// Selector of the element that marks the sign-up as completed,
    /// ending the hold early.
    #[arg(long, value_name = "SELECTOR")]
    pub completion_marker: Option<String>,

    /// Run the browser headless.
    #[arg(long)]
    pub headless: bool,

    /// Log level filter when RUST_LOG is unset.
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

impl CliArgs {
    pub fn pilot_config(&self) -> PilotConfig {
        PilotConfig {
            base_url: self.base_url.clone(),
            hold_timeout: Duration::from_secs(self.hold),
            completion_marker: self
                .completion_marker
                .as_deref()
                .map(Selector::css)
                .unwrap_or_else(|| PilotConfig::default().completion_marker),
            headless: self.headless,
            ..PilotConfig::default()
        }
    }
}
