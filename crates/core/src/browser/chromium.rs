//! Chromium-backed browsing session (Chrome DevTools Protocol).

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::BrowserConfig;

use super::dedup::{dedup_candidates, MAX_CANDIDATES};
use super::url::build_search_url;
use super::{
    BrowserError, BrowsingSession, Candidate, RawCandidate, RecencyWindow, SessionLauncher,
    SortKey,
};

/// Anchors that point at model detail pages.
pub const MODEL_LINK_SELECTOR: &str = r#"a[href*="/models/"]"#;

/// How often the result wait re-checks the DOM.
const RESULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Reduces the most obvious automation fingerprint.
const STEALTH_ARG: &str = "--disable-blink-features=AutomationControlled";

const COLLECT_CANDIDATES_JS: &str = r#"
Array.from(document.querySelectorAll('a[href*="/models/"]'))
    .filter(a => a.querySelector('img'))
    .map(a => {
        const img = a.querySelector('img');
        return {
            url: a.href || '',
            alt: img.alt || '',
            text: a.innerText || '',
            thumbnail_url: img.src || ''
        };
    })
"#;

const BODY_TEXT_JS: &str = "document.body ? document.body.innerText : ''";

/// Launches Chromium against a persistent profile directory.
pub struct ChromiumLauncher {
    config: BrowserConfig,
}

impl ChromiumLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    fn chrome_config(&self) -> Result<ChromeConfig, BrowserError> {
        let mut builder = ChromeConfig::builder()
            .user_data_dir(&self.config.profile_dir)
            .window_size(self.config.viewport_width, self.config.viewport_height)
            .viewport(Viewport {
                width: self.config.viewport_width,
                height: self.config.viewport_height,
                ..Default::default()
            })
            .arg(STEALTH_ARG);

        if !self.config.headless {
            builder = builder.with_head();
        }

        if let Some(executable) = &self.config.executable {
            builder = builder.chrome_executable(executable);
        }

        builder.build().map_err(BrowserError::Launch)
    }
}

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    fn name(&self) -> &str {
        "chromium"
    }

    async fn launch(&self) -> Result<Box<dyn BrowsingSession>, BrowserError> {
        tokio::fs::create_dir_all(&self.config.profile_dir)
            .await
            .map_err(|e| {
                BrowserError::Launch(format!(
                    "cannot create profile dir {}: {}",
                    self.config.profile_dir.display(),
                    e
                ))
            })?;

        let chrome_config = self.chrome_config()?;
        let (browser, mut handler) = Browser::launch(chrome_config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // The CDP handler must be polled for the browser to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler stopped: {}", e);
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(BrowserError::Launch(format!("cannot open page: {}", e)));
            }
        };

        info!(
            profile_dir = %self.config.profile_dir.display(),
            headless = self.config.headless,
            "Browser session started"
        );

        Ok(Box::new(ChromiumSession {
            browser: Some(browser),
            page: Some(page),
            handler: Some(handler_task),
            config: self.config.clone(),
        }))
    }
}

/// A single browser window reused for every navigation of a scan.
pub struct ChromiumSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    config: BrowserConfig,
}

impl ChromiumSession {
    fn page(&self) -> Result<&Page, BrowserError> {
        self.page.as_ref().ok_or(BrowserError::Closed)
    }

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let page = self.page()?;
        let nav_err = |e: chromiumoxide::error::CdpError| BrowserError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };

        page.goto(url).await.map_err(nav_err)?;
        page.wait_for_navigation().await.map_err(nav_err)?;
        Ok(())
    }

    async fn evaluate<T: DeserializeOwned>(&self, expression: &str) -> Result<T, BrowserError> {
        let params = EvaluateParams::builder()
            .expression(expression)
            .return_by_value(true)
            .await_promise(true)
            .build()
            .map_err(BrowserError::Evaluation)?;

        self.page()?
            .evaluate_expression(params)
            .await
            .map_err(|e| BrowserError::Evaluation(e.to_string()))?
            .into_value::<T>()
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }
}

/// Poll `found` every `interval` until it reports true or `timeout` elapses.
/// On timeout, sleep `fallback` and return false so the caller can carry on
/// with whatever the page rendered.
async fn wait_or_fallback<F, Fut>(
    mut found: F,
    interval: Duration,
    timeout: Duration,
    fallback: Duration,
) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let poll = async {
        while !found().await {
            tokio::time::sleep(interval).await;
        }
    };

    if tokio::time::timeout(timeout, poll).await.is_ok() {
        return true;
    }
    tokio::time::sleep(fallback).await;
    false
}

#[async_trait]
impl BrowsingSession for ChromiumSession {
    async fn go_to_search(
        &mut self,
        term: &str,
        recency: RecencyWindow,
        sort: Option<SortKey>,
    ) -> Result<(), BrowserError> {
        let url = build_search_url(
            &self.config.base_url,
            &self.config.locale,
            term,
            recency,
            sort,
        );
        debug!(term = term, url = %url, "Opening search page");

        self.navigate(&url).await?;

        let page = self.page()?;
        let appeared = wait_or_fallback(
            || async move { page.find_element(MODEL_LINK_SELECTOR).await.is_ok() },
            RESULT_POLL_INTERVAL,
            Duration::from_millis(self.config.search_timeout_ms),
            Duration::from_millis(self.config.fallback_delay_ms),
        )
        .await;

        if !appeared {
            // The page may have rendered with unexpected markup; use whatever is there.
            warn!(
                term = term,
                timeout_ms = self.config.search_timeout_ms,
                fallback_ms = self.config.fallback_delay_ms,
                "No model links appeared in time, continued after fixed delay"
            );
        }

        Ok(())
    }

    async fn extract_candidates(&mut self) -> Result<Vec<Candidate>, BrowserError> {
        let raw: Vec<RawCandidate> = self.evaluate(COLLECT_CANDIDATES_JS).await?;
        let found = raw.len();
        let candidates = dedup_candidates(raw, MAX_CANDIDATES);
        debug!(
            anchors = found,
            candidates = candidates.len(),
            "Collected candidates"
        );
        Ok(candidates)
    }

    async fn go_to_detail(&mut self, url: &str) -> Result<String, BrowserError> {
        self.navigate(url).await?;
        tokio::time::sleep(Duration::from_millis(self.config.pacing_delay_ms)).await;
        self.evaluate::<String>(BODY_TEXT_JS).await
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.page = None;

        let result = match self.browser.take() {
            Some(mut browser) => {
                let closed = browser
                    .close()
                    .await
                    .map(|_| ())
                    .map_err(|e| BrowserError::Evaluation(format!("close failed: {}", e)));
                if let Err(e) = browser.wait().await {
                    debug!("Waiting for browser exit failed: {}", e);
                }
                info!("Browser session closed");
                closed
            }
            None => Ok(()),
        };

        if let Some(handler) = self.handler.take() {
            handler.abort();
        }

        result
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if self.browser.is_some() {
            warn!("Browser session dropped without close(); the browser process will be killed");
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}
