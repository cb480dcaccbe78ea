use std::path::PathBuf;

use thiserror::Error;

/// Application-wide error types for sitecheck.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The target URL could not be loaded (server unreachable, bad
    /// response, or navigation timed out).
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// The page title did not match the expected text.
    #[error("wrong page title: expected {expected:?}, got {actual:?}")]
    WrongTitle { expected: String, actual: String },

    /// An element was not present and visible within the wait timeout.
    #[error("{locator} was not visible after {waited_ms} ms")]
    NotVisible { locator: String, waited_ms: u64 },

    /// Browser launch or CDP communication failed.
    #[error("browser error: {0}")]
    Browser(String),

    /// Writing a screenshot to disk failed.
    #[error("screenshot to {} failed: {message}", path.display())]
    Screenshot { path: PathBuf, message: String },

    /// A suite definition file could not be read or parsed.
    #[error("invalid suite file: {0}")]
    SuiteFile(String),

    /// A check URL could not be built from the base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl CheckError {
    /// Returns true if the failure happened before any DOM condition could
    /// be evaluated (the page never loaded or the browser itself broke).
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            CheckError::Navigation { .. } | CheckError::Browser(_) | CheckError::InvalidUrl(_)
        )
    }
}
