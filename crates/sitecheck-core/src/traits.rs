use std::future::Future;
use std::path::Path;
use std::time::Duration;

use crate::error::CheckError;
use crate::locator::Locator;

/// Drives a single browser page: navigation, DOM queries, screenshots.
///
/// The runner is generic over this trait so the check logic can be unit
/// tested against [`crate::testutil::MockDriver`] without a real browser.
/// The production implementation lives in the `sitecheck-browser` crate.
pub trait PageDriver: Send + Sync + Clone {
    /// Navigate to an absolute URL and wait for the page to load.
    fn navigate(&self, url: &str) -> impl Future<Output = Result<(), CheckError>> + Send;

    /// Current document title (empty string if the page has none).
    fn title(&self) -> impl Future<Output = Result<String, CheckError>> + Send;

    /// Wait until an element matching the locator is visible, polling up to
    /// `timeout`. Resolves to [`CheckError::NotVisible`] when the element
    /// never appears, never becomes visible, or the wait times out.
    fn wait_for_visible(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), CheckError>> + Send;

    /// Capture the current viewport as a PNG at `path`, overwriting any
    /// existing file.
    fn screenshot(&self, path: &Path) -> impl Future<Output = Result<(), CheckError>> + Send;
}
