use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use sitecheck_core::CheckError;
use tokio::task::JoinHandle;

use crate::driver::BrowserPage;

/// One launched headless Chromium process holding a single page.
///
/// The session is the scoped resource of a verification run: acquire it
/// once, run every page check against [`page`](Self::page), and call
/// [`close`](Self::close) on every exit path — including after a failed
/// check — so no browser process is left behind.
///
/// Requires a Chromium / Chrome binary reachable via `$PATH` (or the
/// default locations checked by `chromiumoxide`).
///
/// # Example
///
/// ```rust,no_run
/// use sitecheck_browser::BrowserSession;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use sitecheck_core::PageDriver;
///
/// let session = BrowserSession::launch().await?;
/// session.page().navigate("http://localhost:8080/index.html").await?;
/// session.close().await;
/// # Ok(())
/// # }
/// ```
pub struct BrowserSession {
    browser: Browser,
    page: BrowserPage,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Default bound on a single page navigation.
    pub const DEFAULT_NAV_TIMEOUT: Duration = Duration::from_secs(30);

    /// Launch headless Chromium with the default navigation timeout.
    pub async fn launch() -> Result<Self, CheckError> {
        Self::with_nav_timeout(Self::DEFAULT_NAV_TIMEOUT).await
    }

    /// Launch headless Chromium with a custom navigation timeout.
    pub async fn with_nav_timeout(nav_timeout: Duration) -> Result<Self, CheckError> {
        let mut builder = BrowserConfig::builder();
        builder = builder.no_sandbox().disable_default_args();

        // Snap-packaged Chromium ships a wrapper that rejects standard
        // Chrome CLI flags (--headless, --disable-gpu, …), so we look for
        // the real binary first and fall back to chromiumoxide's lookup.
        if let Some(bin) = find_chrome_binary() {
            tracing::info!("Using Chrome binary: {}", bin.display());
            builder = builder.chrome_executable(bin);
        }

        let config = builder
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--no-first-run")
            .window_size(1280, 720)
            .build()
            .map_err(|e| CheckError::Browser(format!("browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| CheckError::Browser(format!("failed to launch browser: {e}")))?;

        // The CDP handler must be polled continuously for the connection
        // to work.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::warn!("Browser CDP handler error: {event:?}");
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CheckError::Browser(format!("failed to open page: {e}")))?;

        Ok(Self {
            browser,
            page: BrowserPage::new(page, nav_timeout),
            handler_task,
        })
    }

    /// The single page this session drives.
    pub fn page(&self) -> &BrowserPage {
        &self.page
    }

    /// Shut the browser down and reap the process.
    ///
    /// Errors are logged rather than propagated: close also runs on
    /// failure paths, where the original check error must win.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Error closing browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::warn!("Error reaping browser process: {e}");
        }
        self.handler_task.abort();
    }
}

/// Tries to locate the real Chrome/Chromium binary.
///
/// Honours an explicit `CHROME_BIN` override first, then checks snap,
/// flatpak, and common apt install paths. Returns `None` to let
/// `chromiumoxide` do its own lookup.
fn find_chrome_binary() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("CHROME_BIN") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    let candidates: &[&str] = &[
        // Snap (Ubuntu default): the real binary, not the flag-stripping wrapper
        "/snap/chromium/current/usr/lib/chromium-browser/chrome",
        // Flatpak
        "/var/lib/flatpak/exports/bin/org.chromium.Chromium",
        // Common apt / manual installs
        "/usr/bin/google-chrome-stable",
        "/usr/bin/google-chrome",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
    ];

    candidates.iter().map(PathBuf::from).find(|p| p.exists())
}
