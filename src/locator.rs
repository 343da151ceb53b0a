//! Wait-until-condition primitive over a selector and a readiness
//! predicate.
//!
//! Polling lives in the driver; this layer only composes selector,
//! readiness and an explicit per-call timeout, and normalizes the
//! failure into [`LocatorError::Timeout`] with the elapsed wait.

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

use crate::port::{BrowserPort, Handle, PortError, Readiness, Selector};

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("{selector} did not become {readiness} within {elapsed:?}")]
    Timeout {
        selector: Selector,
        readiness: Readiness,
        elapsed: Duration,
    },
    #[error(transparent)]
    Driver(#[from] PortError),
}

impl LocatorError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, LocatorError::Timeout { .. })
    }
}

pub struct Locator<'a> {
    port: &'a dyn BrowserPort,
}

impl<'a> Locator<'a> {
    pub fn new(port: &'a dyn BrowserPort) -> Self {
        Self { port }
    }

    /// Block until an element matching `selector` satisfies `readiness`,
    /// or `timeout` elapses.
    pub async fn wait(
        &self,
        selector: &Selector,
        readiness: Readiness,
        timeout: Duration,
    ) -> Result<Handle, LocatorError> {
        let started = Instant::now();
        debug!(%selector, %readiness, ?timeout, "waiting for element");
        match self.port.wait_until(selector, readiness, timeout).await {
            Ok(handle) => {
                debug!(%selector, elapsed = ?started.elapsed(), "element ready");
                Ok(handle)
            }
            Err(PortError::WaitTimeout { .. }) => Err(LocatorError::Timeout {
                selector: selector.clone(),
                readiness,
                elapsed: started.elapsed(),
            }),
            Err(other) => Err(LocatorError::Driver(other)),
        }
    }
}
