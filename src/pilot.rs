//! Registration orchestrator.
//!
//! A linear state machine with no back-edges: resolve the catalog,
//! navigate, wait out the countdown on the quota action, click, prefill,
//! then hold the session open for manual completion. Every failure up to
//! and including the prefill is fatal and tagged with the stage it
//! occurred in; only the hold phase is allowed to expire quietly.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::resolve_catalog;
use crate::config::PilotConfig;
use crate::errors::PilotError;
use crate::form::{prefill, SignupProfile};
use crate::locator::Locator;
use crate::port::{BrowserPort, Readiness};
use crate::quota::{find_quota_action, QuotaIndex};

/// How far a run has progressed. Surfaced verbatim on failure so the
/// operator sees exactly where the pipeline stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Start,
    CatalogResolved,
    Navigated,
    QuotaActionReady,
    Clicked,
    FormFilled,
    HoldingForManualCompletion,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Start => "start",
            Stage::CatalogResolved => "catalog-resolved",
            Stage::Navigated => "navigated",
            Stage::QuotaActionReady => "quota-action-ready",
            Stage::Clicked => "clicked",
            Stage::FormFilled => "form-filled",
            Stage::HoldingForManualCompletion => "holding-for-manual-completion",
            Stage::Done => "done",
        };
        f.write_str(label)
    }
}

/// Caller-supplied parameters of one registration attempt.
#[derive(Clone, Debug)]
pub struct RunRequest {
    /// Event name exactly as displayed on the open events listing.
    pub event_name: String,
    pub quota_index: QuotaIndex,
    /// Countdown to the moment the quota opens; bounds the clickable
    /// wait on the sign-up action.
    pub signup_deadline: Duration,
    pub profile: SignupProfile,
}

/// Exit condition of the hold phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldOutcome {
    /// The completion marker appeared before the hold expired.
    Completed,
    /// The hold expired without detecting completion. Non-fatal: the
    /// registration attempt has already been made.
    Expired,
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub event_name: String,
    pub filled_fields: usize,
    pub hold: HoldOutcome,
}

#[derive(Debug, Error)]
#[error("registration run failed during {stage}: {source}")]
pub struct RunError {
    pub stage: Stage,
    #[source]
    pub source: PilotError,
}

pub struct Pilot<'a> {
    port: &'a dyn BrowserPort,
    config: &'a PilotConfig,
}

impl<'a> Pilot<'a> {
    pub fn new(port: &'a dyn BrowserPort, config: &'a PilotConfig) -> Self {
        Self { port, config }
    }

    /// Drive one registration attempt end to end.
    pub async fn run(&self, request: &RunRequest) -> Result<RunReport, RunError> {
        let fail = |stage: Stage| move |source: PilotError| RunError { stage, source };

        info!(event = %request.event_name, "loading open events listing");
        self.port
            .navigate(self.config.base_url.as_str())
            .await
            .map_err(PilotError::from)
            .map_err(fail(Stage::Start))?;

        let catalog = resolve_catalog(self.port, self.config.catalog_timeout)
            .await
            .map_err(fail(Stage::Start))?;
        let target = catalog
            .resolve(&request.event_name)
            .map_err(fail(Stage::Start))?;
        info!(stage = %Stage::CatalogResolved, href = target.href(), "event resolved");

        let url = target
            .to_url(&self.config.base_url)
            .map_err(fail(Stage::CatalogResolved))?;
        self.port
            .navigate(url.as_str())
            .await
            .map_err(PilotError::from)
            .map_err(fail(Stage::CatalogResolved))?;
        info!(stage = %Stage::Navigated, %url, "event page loaded");

        let action = find_quota_action(self.port, request.quota_index, request.signup_deadline)
            .await
            .map_err(fail(Stage::Navigated))?;
        info!(stage = %Stage::QuotaActionReady, quota = request.quota_index, "sign-up action clickable");

        self.port
            .click(&action)
            .await
            .map_err(PilotError::from)
            .map_err(fail(Stage::QuotaActionReady))?;
        info!(stage = %Stage::Clicked, "sign-up action clicked");

        // The form wait below doubles as confirmation that the click
        // actually navigated.
        let filled_fields = prefill(self.port, &request.profile, self.config.form_timeout)
            .await
            .map_err(fail(Stage::Clicked))?;
        info!(stage = %Stage::FormFilled, filled_fields, "known fields prefilled");

        let hold = self.hold_for_manual_completion().await;
        info!(stage = %Stage::Done, ?hold, "run finished");
        Ok(RunReport {
            event_name: request.event_name.clone(),
            filled_fields,
            hold,
        })
    }

    async fn hold_for_manual_completion(&self) -> HoldOutcome {
        info!(
            stage = %Stage::HoldingForManualCompletion,
            timeout = ?self.config.hold_timeout,
            "holding session open for manual completion"
        );
        let wait = Locator::new(self.port)
            .wait(
                &self.config.completion_marker,
                Readiness::Present,
                self.config.hold_timeout,
            )
            .await;
        match wait {
            Ok(_) => HoldOutcome::Completed,
            Err(err) => {
                // The attempt already happened; a dead session here is
                // no worse than an expired hold.
                warn!(%err, "hold expired without detecting completion");
                HoldOutcome::Expired
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_display_in_pipeline_order() {
        let order = [
            Stage::Start,
            Stage::CatalogResolved,
            Stage::Navigated,
            Stage::QuotaActionReady,
            Stage::Clicked,
            Stage::FormFilled,
            Stage::HoldingForManualCompletion,
            Stage::Done,
        ];
        let labels: Vec<String> = order.iter().map(Stage::to_string).collect();
        assert_eq!(labels[0], "start");
        assert_eq!(labels[3], "quota-action-ready");
        assert_eq!(labels[7], "done");
    }

    #[test]
    fn run_error_names_the_stage() {
        let err = RunError {
            stage: Stage::Navigated,
            source: PilotError::QuotaActionNotReady {
                index: 2,
                deadline: Duration::from_secs(5),
            },
        };
        let rendered = err.to_string();
        assert!(rendered.contains("navigated"));
        assert!(rendered.contains("quota 2"));
    }
}
