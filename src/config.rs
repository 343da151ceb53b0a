//! Run configuration.
//!
//! Every wait in the pipeline takes its bound from here explicitly;
//! there is no ambient session-wide implicit wait, so the generous
//! catalog and form bounds cannot leak into the time-critical quota
//! wait.

use std::time::Duration;

use url::Url;

use crate::port::Selector;

pub const DEFAULT_BASE_URL: &str = "https://ilmo.prodeko.org/en";

/// Bound on the open-events container becoming visible.
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(20);

/// Bound on the sign-up form becoming visible after the click.
pub const DEFAULT_FORM_TIMEOUT: Duration = Duration::from_secs(10);

/// Window held open for manual completion of event-specific fields.
pub const DEFAULT_HOLD_TIMEOUT: Duration = Duration::from_secs(200);

#[derive(Clone, Debug)]
pub struct PilotConfig {
    /// Homepage listing the open events; relative registration hrefs are
    /// joined against it.
    pub base_url: Url,
    pub catalog_timeout: Duration,
    pub form_timeout: Duration,
    pub hold_timeout: Duration,
    /// Marker element whose appearance ends the hold phase early.
    pub completion_marker: Selector,
    pub headless: bool,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            catalog_timeout: DEFAULT_CATALOG_TIMEOUT,
            form_timeout: DEFAULT_FORM_TIMEOUT,
            hold_timeout: DEFAULT_HOLD_TIMEOUT,
            completion_marker: Selector::css("#registration-complete"),
            headless: false,
        }
    }
}
