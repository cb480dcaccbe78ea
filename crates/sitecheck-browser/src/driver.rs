use std::path::Path;
use std::time::{Duration, Instant};

use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use sitecheck_core::{CheckError, Locator, PageDriver};

/// How often a visibility wait re-evaluates its predicate.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A single Chromium tab implementing [`PageDriver`] over the Chrome
/// DevTools Protocol.
///
/// Visibility checks run a JavaScript predicate inside the page (see
/// [`Locator::visibility_predicate`]) in a bounded poll loop rather than
/// relying on CDP element handles, so "present but hidden" and "absent"
/// fail the same way: not visible within the timeout.
#[derive(Clone)]
pub struct BrowserPage {
    page: Page,
    nav_timeout: Duration,
}

impl BrowserPage {
    pub(crate) fn new(page: Page, nav_timeout: Duration) -> Self {
        Self { page, nav_timeout }
    }

    /// Evaluate the locator's predicate once.
    async fn is_visible(&self, locator: &Locator) -> Result<bool, CheckError> {
        let result = self
            .page
            .evaluate(locator.visibility_predicate())
            .await
            .map_err(|e| CheckError::Browser(format!("evaluate failed: {e}")))?;
        Ok(result.into_value::<bool>().unwrap_or(false))
    }
}

impl PageDriver for BrowserPage {
    async fn navigate(&self, url: &str) -> Result<(), CheckError> {
        let navigation = async {
            self.page.goto(url).await.map_err(|e| CheckError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| CheckError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        };

        match tokio::time::timeout(self.nav_timeout, navigation).await {
            Ok(inner) => inner,
            Err(_) => Err(CheckError::Navigation {
                url: url.to_string(),
                message: format!("timed out after {} s", self.nav_timeout.as_secs()),
            }),
        }
    }

    async fn title(&self) -> Result<String, CheckError> {
        let title = self
            .page
            .get_title()
            .await
            .map_err(|e| CheckError::Browser(format!("failed to read title: {e}")))?;
        Ok(title.unwrap_or_default())
    }

    async fn wait_for_visible(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), CheckError> {
        let start = Instant::now();
        loop {
            if self.is_visible(locator).await? {
                tracing::debug!("{locator} visible after {} ms", start.elapsed().as_millis());
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(CheckError::NotVisible {
                    locator: locator.to_string(),
                    waited_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn screenshot(&self, path: &Path) -> Result<(), CheckError> {
        self.page
            .save_screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(false)
                    .build(),
                path,
            )
            .await
            .map_err(|e| CheckError::Screenshot {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
