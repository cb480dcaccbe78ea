/// Smoke-test for `BrowserSession`.
///
/// Launches a headless Chromium and runs the built-in Pocket-hub suite
/// against a site served on localhost:8080. Screenshots land in
/// `verification/`.
///
/// Run with:
///   cargo run --example smoke
use std::path::PathBuf;
use std::time::Duration;

use sitecheck_browser::BrowserSession;
use sitecheck_core::{RunConfig, pocket_hub_suite, run_suite};
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("Launching headless browser…");
    let session = BrowserSession::launch().await?;

    let config = RunConfig::new(
        Url::parse("http://localhost:8080/")?,
        PathBuf::from("verification"),
        Duration::from_secs(10),
    );

    let result = run_suite(session.page(), &config, &pocket_hub_suite()).await;
    session.close().await;

    match result {
        Ok(()) => println!("Verification complete!"),
        Err(e) => println!("Verification failed: {e}"),
    }
    Ok(())
}
