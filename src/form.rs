//! Best-effort prefill of the dynamically rendered sign-up form.
//!
//! The form is an external, unversioned UI; fields are matched against
//! the declared profile by input id and anything unmatched on either
//! side is skipped silently. Partial fill is the expected common case —
//! event-specific questions stay with the human operator.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::PilotError;
use crate::locator::{Locator, LocatorError};
use crate::port::{BrowserPort, Readiness};
use crate::site;

/// Form field values keyed by the input's DOM id (e.g. `firstName`,
/// `lastName`, `email`). Read-only once the prefill starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SignupProfile {
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
}

impl SignupProfile {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.fields.get(field_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Fill the known fields of the sign-up form from `profile`, typing each
/// value as keystrokes so client-side validation fires. Returns the
/// number of fields actually written.
pub async fn prefill(
    port: &dyn BrowserPort,
    profile: &SignupProfile,
    timeout: Duration,
) -> Result<usize, PilotError> {
    Locator::new(port)
        .wait(&site::signup_form(), Readiness::Visible, timeout)
        .await
        .map_err(|err| match err {
            LocatorError::Timeout { .. } => PilotError::FormUnavailable { timeout },
            LocatorError::Driver(source) => source.into(),
        })?;

    let mut filled = 0;
    for input in port.query(&site::form_inputs()).await? {
        let Some(field_id) = port.attribute(&input, "id").await? else {
            continue;
        };
        match profile.value(&field_id) {
            Some(value) => {
                port.type_text(&input, value).await?;
                filled += 1;
            }
            None => debug!(%field_id, "no profile value for form field"),
        }
    }
    info!(filled, "sign-up form prefilled");
    Ok(filled)
}
