//! Event catalog resolution.
//!
//! One bounded wait for the open-events container, one enumeration of
//! its links, one lookup. The catalog is a per-invocation snapshot of
//! the homepage and is never rebuilt after navigating away.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::errors::PilotError;
use crate::locator::{Locator, LocatorError};
use crate::port::{BrowserPort, Readiness};
use crate::site;

/// Snapshot mapping event display names to registration hrefs.
///
/// Duplicate names collide last-write-wins; the site keeps names unique
/// in practice and the collision is accepted rather than deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventCatalog {
    entries: BTreeMap<String, String>,
}

impl EventCatalog {
    pub fn insert(&mut self, name: impl Into<String>, href: impl Into<String>) {
        self.entries.insert(name.into(), href.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an event name to its registration target. Exact string
    /// match only; no trimming is applied to the caller's name.
    pub fn resolve(&self, name: &str) -> Result<RegistrationTarget, PilotError> {
        self.entries
            .get(name)
            .map(|href| RegistrationTarget(href.clone()))
            .ok_or_else(|| PilotError::EventNotFound(name.to_string()))
    }
}

/// The one resolved registration link of a run. Immutable once computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationTarget(String);

impl RegistrationTarget {
    pub fn href(&self) -> &str {
        &self.0
    }

    /// Absolute navigation URL; relative hrefs are joined against the
    /// catalog homepage, absolute ones pass through unchanged.
    pub fn to_url(&self, base: &Url) -> Result<Url, PilotError> {
        base.join(&self.0).map_err(|err| PilotError::InvalidTarget {
            href: self.0.clone(),
            reason: err.to_string(),
        })
    }
}

/// Enumerate the currently open events into a name→link catalog.
///
/// Fails with [`PilotError::CatalogUnavailable`] if the container never
/// becomes visible; a partially built catalog is never returned.
pub async fn resolve_catalog(
    port: &dyn BrowserPort,
    timeout: Duration,
) -> Result<EventCatalog, PilotError> {
    let locator = Locator::new(port);
    locator
        .wait(&site::open_events_container(), Readiness::Visible, timeout)
        .await
        .map_err(|err| match err {
            LocatorError::Timeout { .. } => PilotError::CatalogUnavailable { timeout },
            LocatorError::Driver(source) => source.into(),
        })?;

    let mut catalog = EventCatalog::default();
    for link in port.query(&site::open_event_links()).await? {
        let name = port.text(&link).await?.trim().to_string();
        match port.attribute(&link, "href").await? {
            Some(href) if !href.is_empty() => catalog.insert(name, href),
            _ => debug!(%name, "skipping event link without href"),
        }
    }
    info!(events = catalog.len(), "open events catalog resolved");
    Ok(catalog)
}
