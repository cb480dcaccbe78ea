//! Test utilities: a mock implementation of [`PageDriver`].
//!
//! Handwritten mock for dependency injection in unit tests, using
//! `Arc<Mutex<_>>` for interior mutability so tests can assert on the
//! recorded call sequence.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::CheckError;
use crate::locator::Locator;
use crate::traits::PageDriver;

/// One recorded driver call, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverOp {
    Navigate(String),
    Title,
    WaitForVisible(String),
    Screenshot(PathBuf),
}

/// Mock driver that records every call and fails on demand.
///
/// By default every navigation succeeds, every locator is visible, and
/// screenshots succeed. Individual failure modes are scripted via the
/// `with_*` / [`hide`](Self::hide) constructors.
#[derive(Clone)]
pub struct MockDriver {
    /// Every call made against this driver, in order.
    pub ops: Arc<Mutex<Vec<DriverOp>>>,
    title: Arc<Mutex<String>>,
    navigate_error: Arc<Mutex<Option<CheckError>>>,
    screenshot_error: Arc<Mutex<Option<CheckError>>>,
    /// Locators (by display string) that never become visible.
    hidden: Arc<Mutex<HashSet<String>>>,
}

impl MockDriver {
    /// Driver for a healthy page with the given title.
    pub fn new(title: &str) -> Self {
        Self {
            ops: Arc::new(Mutex::new(Vec::new())),
            title: Arc::new(Mutex::new(title.to_string())),
            navigate_error: Arc::new(Mutex::new(None)),
            screenshot_error: Arc::new(Mutex::new(None)),
            hidden: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Driver whose first navigation fails (e.g. server down).
    pub fn with_navigate_error(error: CheckError) -> Self {
        let driver = Self::new("");
        *driver.navigate_error.lock().unwrap() = Some(error);
        driver
    }

    /// Driver whose next screenshot fails.
    pub fn with_screenshot_error(title: &str, error: CheckError) -> Self {
        let driver = Self::new(title);
        *driver.screenshot_error.lock().unwrap() = Some(error);
        driver
    }

    /// Mark a locator as never visible.
    pub fn hide(&self, locator: &Locator) {
        self.hidden.lock().unwrap().insert(locator.to_string());
    }

    /// Snapshot of the recorded call sequence.
    pub fn recorded(&self) -> Vec<DriverOp> {
        self.ops.lock().unwrap().clone()
    }
}

impl PageDriver for MockDriver {
    async fn navigate(&self, url: &str) -> Result<(), CheckError> {
        self.ops
            .lock()
            .unwrap()
            .push(DriverOp::Navigate(url.to_string()));
        if let Some(e) = self.navigate_error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(())
    }

    async fn title(&self) -> Result<String, CheckError> {
        self.ops.lock().unwrap().push(DriverOp::Title);
        Ok(self.title.lock().unwrap().clone())
    }

    async fn wait_for_visible(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), CheckError> {
        let display = locator.to_string();
        self.ops
            .lock()
            .unwrap()
            .push(DriverOp::WaitForVisible(display.clone()));
        if self.hidden.lock().unwrap().contains(&display) {
            return Err(CheckError::NotVisible {
                locator: display,
                waited_ms: timeout.as_millis() as u64,
            });
        }
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), CheckError> {
        self.ops
            .lock()
            .unwrap()
            .push(DriverOp::Screenshot(path.to_path_buf()));
        if let Some(e) = self.screenshot_error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(())
    }
}
