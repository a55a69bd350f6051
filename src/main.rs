// prdash: load the configured dashboard once and print every published event
// as a JSON line on stdout.
//
// Usage: prdash [CONFIG]   (default: $PRDASH_CONFIG, then ./prdash.toml)

use anyhow::{Context, Result};
use prdash::{Dashboard, DashboardConfig, run_once};

const CONFIG_ENV: &str = "PRDASH_CONFIG";
const DEFAULT_CONFIG: &str = "prdash.toml";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config =
        DashboardConfig::load(&path).with_context(|| format!("Failed to load config {path}"))?;

    let (dashboard, events) = Dashboard::new(&config)?;
    run_once(dashboard, events, |event| match serde_json::to_string(&event) {
        Ok(line) => println!("{line}"),
        Err(e) => log::warn!("Could not serialize {} event: {e}", event.kind()),
    })
    .await?;
    Ok(())
}
