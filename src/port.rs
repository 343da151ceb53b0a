//! Browser capability boundary.
//!
//! Everything the pipeline knows about the browser goes through
//! [`BrowserPort`]: navigate, bounded condition waits, selector queries
//! and element interaction. The real session lives in [`crate::cdp`];
//! tests script the port in memory.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// A structural/attribute query identifying elements on the current page.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector(String);

impl Selector {
    pub fn css(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Readiness predicate a wait resolves against.
///
/// `Clickable` is the strong form: present, visible and enabled, not
/// merely rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    Present,
    Visible,
    Clickable,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Readiness::Present => "present",
            Readiness::Visible => "visible",
            Readiness::Clickable => "clickable",
        };
        f.write_str(label)
    }
}

/// Snapshot of one element's interactability, as probed by the driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ElementState {
    pub present: bool,
    pub visible: bool,
    pub enabled: bool,
}

impl ElementState {
    pub fn satisfies(&self, readiness: Readiness) -> bool {
        match readiness {
            Readiness::Present => self.present,
            Readiness::Visible => self.present && self.visible,
            Readiness::Clickable => self.present && self.visible && self.enabled,
        }
    }
}

/// Opaque reference to one located element, minted by the driver.
///
/// Handles are only valid against the page they were located on; after a
/// navigation the driver reports them as stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Handle(String);

impl Handle {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum PortError {
    #[error("wait for {selector} to become {readiness} timed out after {elapsed:?}")]
    WaitTimeout {
        selector: Selector,
        readiness: Readiness,
        elapsed: Duration,
    },
    #[error("element handle {0} is no longer attached")]
    StaleHandle(String),
    #[error("browser session failure: {0}")]
    Session(String),
}

/// The driver capability the pipeline runs against.
///
/// `wait_until` owns the polling; callers only compose selector,
/// readiness and a per-call timeout. `type_text` must dispatch real key
/// events so client-side validation fires as it would for a human.
#[async_trait]
pub trait BrowserPort: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), PortError>;

    async fn wait_until(
        &self,
        selector: &Selector,
        readiness: Readiness,
        timeout: Duration,
    ) -> Result<Handle, PortError>;

    async fn query(&self, selector: &Selector) -> Result<Vec<Handle>, PortError>;

    async fn text(&self, handle: &Handle) -> Result<String, PortError>;

    async fn attribute(&self, handle: &Handle, name: &str) -> Result<Option<String>, PortError>;

    async fn click(&self, handle: &Handle) -> Result<(), PortError>;

    async fn type_text(&self, handle: &Handle, text: &str) -> Result<(), PortError>;
}
