//! Quota action resolution — the time-critical wait of the run.
//!
//! The caller's countdown bounds one clickable wait on the index-th
//! quota link. A timeout here is terminal: the capacity window has
//! either not opened in time or already closed, and retrying cannot win
//! it back. Clicking the returned handle stays with the orchestrator.

use std::time::Duration;

use tracing::info;

use crate::errors::PilotError;
use crate::locator::{Locator, LocatorError};
use crate::port::{BrowserPort, Handle, Readiness};
use crate::site;

/// Zero-based ordinal of a quota's sign-up link, top to bottom. No upper
/// bound is validated; an out-of-range index times out like a link that
/// never opened.
pub type QuotaIndex = u32;

/// Wait until the index-th quota's sign-up action is clickable (present,
/// visible and enabled), bounded by `deadline`.
pub async fn find_quota_action(
    port: &dyn BrowserPort,
    index: QuotaIndex,
    deadline: Duration,
) -> Result<Handle, PilotError> {
    let selector = site::quota_signup_link(index);
    info!(%selector, ?deadline, "waiting for quota sign-up action");
    Locator::new(port)
        .wait(&selector, Readiness::Clickable, deadline)
        .await
        .map_err(|err| match err {
            LocatorError::Timeout { .. } => PilotError::QuotaActionNotReady { index, deadline },
            LocatorError::Driver(source) => source.into(),
        })
}
