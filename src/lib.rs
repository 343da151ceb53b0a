//! Timed navigation and form-discovery pipeline for competing on
//! capacity-limited event sign-ups.
//!
//! The pipeline is a single linear flow: resolve the open-events
//! catalog, navigate to the chosen event, wait out the countdown until
//! its quota's sign-up action is clickable, click, prefill the known
//! form fields, then hold the session open while a human finishes the
//! event-specific rest.

pub mod catalog;
pub mod cdp;
pub mod cli;
pub mod config;
pub mod errors;
pub mod form;
pub mod locator;
pub mod pilot;
pub mod port;
pub mod quota;
pub mod site;

pub use catalog::{resolve_catalog, EventCatalog, RegistrationTarget};
pub use config::PilotConfig;
pub use errors::PilotError;
pub use form::{prefill, SignupProfile};
pub use locator::{Locator, LocatorError};
pub use pilot::{HoldOutcome, Pilot, RunError, RunReport, RunRequest, Stage};
pub use port::{BrowserPort, ElementState, Handle, PortError, Readiness, Selector};
pub use quota::{find_quota_action, QuotaIndex};
