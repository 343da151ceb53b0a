//! Chromium-backed implementation of [`BrowserPort`] over the DevTools
//! protocol.
//!
//! Elements are handed out as attribute-token selectors: a query script
//! tags every match with a fresh `data-ilmopilot-handle` token and the
//! handle is the selector for that token. Clicks and typing go through
//! chromiumoxide's element APIs so real input events are dispatched.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::port::{BrowserPort, ElementState, Handle, PortError, Readiness, Selector};

const HANDLE_ATTR: &str = "data-ilmopilot-handle";
const POLL_START: Duration = Duration::from_millis(100);
const POLL_CAP: Duration = Duration::from_secs(1);

pub struct CdpBrowser {
    browser: Browser,
    page: Page,
    driver_loop: JoinHandle<()>,
}

impl CdpBrowser {
    /// Launch a Chromium session and open the working page. The session
    /// is exclusively owned by this run.
    pub async fn launch(headless: bool) -> Result<Self, PortError> {
        let mut builder = BrowserConfig::builder();
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(PortError::Session)?;
        let (browser, mut handler) = Browser::launch(config).await.map_err(session_err)?;
        let driver_loop = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!(%err, "cdp handler event error");
                }
            }
        });
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(session_err)?;
        info!(headless, "browser session started");
        Ok(Self {
            browser,
            page,
            driver_loop,
        })
    }

    /// Close the session. Chromium is torn down on drop as well; this
    /// just makes the shutdown orderly and logged.
    pub async fn close(mut self) {
        if let Err(err) = self.browser.close().await {
            warn!(%err, "browser session did not close cleanly");
        }
        let _ = self.browser.wait().await;
        self.driver_loop.abort();
        info!("browser session closed");
    }

    async fn eval<T: DeserializeOwned>(&self, expression: String) -> Result<T, PortError> {
        self.page
            .evaluate(expression)
            .await
            .map_err(session_err)?
            .into_value::<T>()
            .map_err(|err| PortError::Session(format!("script result: {err}")))
    }

    async fn element_state(&self, handle: &Handle) -> Result<ElementState, PortError> {
        let expression = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return {{ present: false, visible: false, enabled: false }};
                const style = window.getComputedStyle(el);
                const rect = el.getBoundingClientRect();
                const visible = style.visibility !== 'hidden'
                    && style.display !== 'none'
                    && (rect.width > 0 || rect.height > 0);
                const enabled = !el.disabled && el.getAttribute('aria-disabled') !== 'true';
                return {{ present: true, visible, enabled }};
            }})()"#,
            sel = js_string(handle.as_str()),
        );
        self.eval(expression).await
    }
}

#[async_trait]
impl BrowserPort for CdpBrowser {
    async fn navigate(&self, url: &str) -> Result<(), PortError> {
        debug!(url, "navigating");
        self.page.goto(url).await.map_err(session_err)?;
        self.page.wait_for_navigation().await.map_err(session_err)?;
        Ok(())
    }

    async fn wait_until(
        &self,
        selector: &Selector,
        readiness: Readiness,
        timeout: Duration,
    ) -> Result<Handle, PortError> {
        let started = Instant::now();
        let mut interval = POLL_START;
        loop {
            for handle in self.query(selector).await? {
                if self.element_state(&handle).await?.satisfies(readiness) {
                    return Ok(handle);
                }
            }
            let elapsed = started.elapsed();
            if elapsed >= timeout {
                return Err(PortError::WaitTimeout {
                    selector: selector.clone(),
                    readiness,
                    elapsed,
                });
            }
            sleep(interval.min(timeout - elapsed)).await;
            interval = (interval * 2).min(POLL_CAP);
        }
    }

    async fn query(&self, selector: &Selector) -> Result<Vec<Handle>, PortError> {
        let token = format!("q{}", Uuid::new_v4().simple());
        let expression = format!(
            r#"(() => {{
                const attr = {attr};
                const token = {token};
                const tokens = [];
                document.querySelectorAll({sel}).forEach((el, i) => {{
                    const id = token + '-' + i;
                    el.setAttribute(attr, id);
                    tokens.push(id);
                }});
                return tokens;
            }})()"#,
            attr = js_string(HANDLE_ATTR),
            token = js_string(&token),
            sel = js_string(selector.as_str()),
        );
        let tokens: Vec<String> = self.eval(expression).await?;
        Ok(tokens
            .into_iter()
            .map(|id| Handle::new(format!("[{HANDLE_ATTR}=\"{id}\"]")))
            .collect())
    }

    async fn text(&self, handle: &Handle) -> Result<String, PortError> {
        let expression = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return null;
                return el.innerText || el.textContent || '';
            }})()"#,
            sel = js_string(handle.as_str()),
        );
        self.eval::<Option<String>>(expression)
            .await?
            .ok_or_else(|| PortError::StaleHandle(handle.to_string()))
    }

    async fn attribute(&self, handle: &Handle, name: &str) -> Result<Option<String>, PortError> {
        let expression = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return {{ stale: true, value: null }};
                return {{ stale: false, value: el.getAttribute({name}) }};
            }})()"#,
            sel = js_string(handle.as_str()),
            name = js_string(name),
        );
        let result: AttributeProbe = self.eval(expression).await?;
        if result.stale {
            return Err(PortError::StaleHandle(handle.to_string()));
        }
        Ok(result.value)
    }

    async fn click(&self, handle: &Handle) -> Result<(), PortError> {
        let element = self
            .page
            .find_element(handle.as_str())
            .await
            .map_err(|_| PortError::StaleHandle(handle.to_string()))?;
        element.click().await.map_err(session_err)?;
        Ok(())
    }

    async fn type_text(&self, handle: &Handle, text: &str) -> Result<(), PortError> {
        let element = self
            .page
            .find_element(handle.as_str())
            .await
            .map_err(|_| PortError::StaleHandle(handle.to_string()))?;
        element.click().await.map_err(session_err)?;
        element.type_str(text).await.map_err(session_err)?;
        Ok(())
    }
}

#[derive(serde::Deserialize)]
struct AttributeProbe {
    stale: bool,
    value: Option<String>,
}

fn session_err(err: impl std::fmt::Display) -> PortError {
    PortError::Session(err.to_string())
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).expect("strings serialize to JSON")
}
