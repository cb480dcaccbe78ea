use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::check::{PageCheck, Step};
use crate::error::CheckError;
use crate::traits::PageDriver;

/// Settings shared by every page check in a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    base_url: Url,
    out_dir: PathBuf,
    wait_timeout: Duration,
}

impl RunConfig {
    /// Build a run config. The base URL path gets a trailing slash appended
    /// if missing, so relative check paths join under it instead of
    /// replacing its last segment.
    pub fn new(mut base_url: Url, out_dir: PathBuf, wait_timeout: Duration) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            out_dir,
            wait_timeout,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a page check.
    pub fn page_url(&self, check: &PageCheck) -> Result<Url, CheckError> {
        self.base_url
            .join(&check.path)
            .map_err(|e| CheckError::InvalidUrl(format!("{}: {e}", check.path)))
    }

    /// Screenshot destination for a page check.
    pub fn screenshot_path(&self, check: &PageCheck) -> PathBuf {
        self.out_dir.join(&check.screenshot)
    }
}

/// Run a single page check: navigate, execute the steps strictly in order,
/// then capture the screenshot.
///
/// The first failing step aborts the routine and propagates; the screenshot
/// is only reached when every step held.
pub async fn run_page<D: PageDriver>(
    driver: &D,
    config: &RunConfig,
    check: &PageCheck,
) -> Result<(), CheckError> {
    let url = config.page_url(check)?;

    tracing::info!("Navigating to {} ({url})", check.name);
    driver.navigate(url.as_str()).await?;

    for step in &check.steps {
        match step {
            Step::Title { equals } => {
                let actual = driver.title().await?;
                if actual != *equals {
                    return Err(CheckError::WrongTitle {
                        expected: equals.clone(),
                        actual,
                    });
                }
                tracing::debug!("Title matches {equals:?}");
            }
            Step::Visible { locator } => {
                tracing::debug!("Waiting for {locator}");
                driver.wait_for_visible(locator, config.wait_timeout).await?;
            }
        }
    }

    let path = config.screenshot_path(check);
    tracing::info!("Taking screenshot of {} -> {}", check.name, path.display());
    driver.screenshot(&path).await?;

    Ok(())
}

/// Run every page check in order on the same page.
///
/// Fail-fast: the first failing page aborts the run, so later pages are
/// neither navigated to nor screenshotted. No retries.
pub async fn run_suite<D: PageDriver>(
    driver: &D,
    config: &RunConfig,
    suite: &[PageCheck],
) -> Result<(), CheckError> {
    for check in suite {
        run_page(driver, config, check).await?;
        tracing::info!("{} passed ({} checks)", check.name, check.steps.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::pocket_hub_suite;
    use crate::locator::Locator;
    use crate::testutil::{DriverOp, MockDriver};

    const HUB_TITLE: &str = "All-in-one Pocket | Modern Multi-Tool Hub";

    fn config() -> RunConfig {
        RunConfig::new(
            Url::parse("http://localhost:8080/").unwrap(),
            PathBuf::from("verification"),
            Duration::from_secs(10),
        )
    }

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let config = RunConfig::new(
            Url::parse("http://localhost:8080/pocket").unwrap(),
            PathBuf::from("verification"),
            Duration::from_secs(10),
        );
        let url = config.page_url(&pocket_hub_suite()[1]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/pocket/tools/unit-converter.html"
        );
    }

    #[tokio::test]
    async fn test_suite_success_runs_everything_in_order() {
        let driver = MockDriver::new(HUB_TITLE);
        run_suite(&driver, &config(), &pocket_hub_suite())
            .await
            .unwrap();

        let ops = driver.recorded();
        assert_eq!(ops.len(), 12);
        assert_eq!(
            ops[0],
            DriverOp::Navigate("http://localhost:8080/index.html".to_string())
        );
        assert_eq!(ops[1], DriverOp::Title);
        // Four homepage visibility waits, then the screenshot.
        assert!(matches!(ops[2], DriverOp::WaitForVisible(_)));
        assert_eq!(
            ops[6],
            DriverOp::Screenshot(PathBuf::from("verification/homepage.png"))
        );
        assert_eq!(
            ops[7],
            DriverOp::Navigate("http://localhost:8080/tools/unit-converter.html".to_string())
        );
        assert_eq!(
            ops[11],
            DriverOp::Screenshot(PathBuf::from("verification/unit_converter.png"))
        );
    }

    #[tokio::test]
    async fn test_wrong_title_wins_over_later_checks() {
        // Both the title is wrong and (implicitly) everything after it is
        // unchecked: only the title failure may be reported.
        let driver = MockDriver::new("404 Not Found");
        driver.hide(&Locator::css("#searchInput"));

        let err = run_suite(&driver, &config(), &pocket_hub_suite())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::WrongTitle { .. }));

        // Navigate + Title, then the routine aborted: no waits, no
        // screenshot, no second page.
        let ops = driver.recorded();
        assert_eq!(
            ops,
            vec![
                DriverOp::Navigate("http://localhost:8080/index.html".to_string()),
                DriverOp::Title,
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_element_skips_screenshot_and_later_pages() {
        let driver = MockDriver::new(HUB_TITLE);
        driver.hide(&Locator::css("#themeToggle"));

        let err = run_suite(&driver, &config(), &pocket_hub_suite())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("#themeToggle"));

        let ops = driver.recorded();
        assert!(!ops.iter().any(|op| matches!(op, DriverOp::Screenshot(_))));
        assert_eq!(
            ops.iter()
                .filter(|op| matches!(op, DriverOp::Navigate(_)))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_navigation_failure_aborts_immediately() {
        let driver = MockDriver::with_navigate_error(CheckError::Navigation {
            url: "http://localhost:8080/index.html".to_string(),
            message: "connection refused".to_string(),
        });

        let err = run_suite(&driver, &config(), &pocket_hub_suite())
            .await
            .unwrap_err();
        assert!(err.is_infrastructure());
        assert_eq!(driver.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_tool_page_failure_keeps_homepage_screenshot() {
        let driver = MockDriver::new(HUB_TITLE);
        driver.hide(&Locator::css(".app-header"));

        let err = run_suite(&driver, &config(), &pocket_hub_suite())
            .await
            .unwrap_err();
        assert!(err.to_string().contains(".app-header"));

        // The homepage completed, so exactly its screenshot was taken.
        let screenshots: Vec<_> = driver
            .recorded()
            .into_iter()
            .filter(|op| matches!(op, DriverOp::Screenshot(_)))
            .collect();
        assert_eq!(
            screenshots,
            vec![DriverOp::Screenshot(PathBuf::from(
                "verification/homepage.png"
            ))]
        );
    }

    #[tokio::test]
    async fn test_screenshot_failure_propagates() {
        let driver = MockDriver::with_screenshot_error(
            HUB_TITLE,
            CheckError::Screenshot {
                path: PathBuf::from("verification/homepage.png"),
                message: "permission denied".to_string(),
            },
        );

        let err = run_suite(&driver, &config(), &pocket_hub_suite())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Screenshot { .. }));
        // The failure stopped the run before the second page.
        assert_eq!(
            driver
                .recorded()
                .iter()
                .filter(|op| matches!(op, DriverOp::Navigate(_)))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let driver = MockDriver::new(HUB_TITLE);
        let config = config();
        let suite = pocket_hub_suite();

        run_suite(&driver, &config, &suite).await.unwrap();
        run_suite(&driver, &config, &suite).await.unwrap();

        // Same screenshot paths both times: reruns overwrite, never
        // accumulate.
        let screenshots: Vec<_> = driver
            .recorded()
            .into_iter()
            .filter_map(|op| match op {
                DriverOp::Screenshot(path) => Some(path),
                _ => None,
            })
            .collect();
        assert_eq!(screenshots.len(), 4);
        assert_eq!(screenshots[0], screenshots[2]);
        assert_eq!(screenshots[1], screenshots[3]);
    }
}
