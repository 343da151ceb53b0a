//! Error taxonomy of the registration pipeline.
//!
//! Locator timeouts are wrapped into their stage-specific meaning at
//! each call site; anything the driver itself reports surfaces as
//! [`PilotError::Driver`]. Nothing here is retried: a missed timing
//! window cannot be won back.

use std::time::Duration;

use thiserror::Error;

use crate::port::PortError;

#[derive(Debug, Error)]
pub enum PilotError {
    #[error("open events listing did not appear within {timeout:?}")]
    CatalogUnavailable { timeout: Duration },

    #[error("event {0:?} is not in the open events listing")]
    EventNotFound(String),

    #[error("quota {index} sign-up action did not become clickable within {deadline:?}")]
    QuotaActionNotReady { index: u32, deadline: Duration },

    #[error("no sign-up form appeared within {timeout:?}")]
    FormUnavailable { timeout: Duration },

    #[error("registration link {href:?} is unusable: {reason}")]
    InvalidTarget { href: String, reason: String },

    #[error("browser driver failure: {0}")]
    Driver(#[from] PortError),
}
