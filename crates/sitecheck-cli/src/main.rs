use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use sitecheck_browser::BrowserSession;
use sitecheck_core::{PageCheck, RunConfig, load_suite, pocket_hub_suite, run_suite};

#[derive(Parser)]
#[command(
    name = "sitecheck",
    version,
    about = "Headless smoke verifier for the All-in-one Pocket tool hub"
)]
struct Cli {
    /// Base URL the site is served from
    #[arg(
        short,
        long,
        env = "SITECHECK_BASE_URL",
        default_value = "http://localhost:8080/"
    )]
    base_url: String,

    /// Directory screenshots are written to (created if missing)
    #[arg(short, long, default_value = "verification")]
    out_dir: PathBuf,

    /// Seconds to wait for an element to become visible
    #[arg(long, default_value_t = 10)]
    wait_timeout: u64,

    /// Seconds to wait for a page navigation
    #[arg(long, default_value_t = 30)]
    nav_timeout: u64,

    /// JSON file defining a custom check suite (defaults to the built-in
    /// Pocket-hub suite)
    #[arg(short, long)]
    suite: Option<PathBuf>,
}

impl Cli {
    fn suite_checks(&self) -> Result<Vec<PageCheck>> {
        match &self.suite {
            Some(path) => {
                load_suite(path).with_context(|| format!("loading suite {}", path.display()))
            }
            None => Ok(pocket_hub_suite()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sitecheck=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let base_url = Url::parse(&cli.base_url)
        .with_context(|| format!("invalid base URL: {}", cli.base_url))?;
    let suite = cli.suite_checks()?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;

    let config = RunConfig::new(
        base_url,
        cli.out_dir.clone(),
        Duration::from_secs(cli.wait_timeout),
    );

    tracing::info!("Launching headless browser");
    let session = BrowserSession::with_nav_timeout(Duration::from_secs(cli.nav_timeout)).await?;

    // Run the suite, then close the session before reporting: a failed
    // check must not leave a browser process behind.
    let result = run_suite(session.page(), &config, &suite).await;
    session.close().await;

    match result {
        Ok(()) => println!("Verification complete!"),
        Err(e) => println!("Verification failed: {e}"),
    }

    Ok(())
}
