use core::time::Duration;
use std::path::PathBuf;

use atlas::config;

#[derive(clap::Parser)]
#[command(about = "Scrape country and capital facts into a CSV table")]
struct Args {
    /// Output table, replaced at the end of the run.
    #[arg(short, long, env = "ATLAS_CSV", default_value = config::DEFAULT_CSV)]
    output: PathBuf,
    /// JSON list of `{ name, country_url, capital_url }`; built-in list if absent.
    #[arg(short, long, env = "ATLAS_TARGETS", value_name = "file")]
    targets: Option<PathBuf>,
    /// Pause after each country, in milliseconds.
    #[arg(long, env = "ATLAS_DELAY_MS", default_value_t = config::COURTESY_DELAY.as_millis() as u64)]
    delay_ms: u64,
    /// Per-request timeout, in seconds.
    #[arg(long, env = "ATLAS_TIMEOUT_SECS", default_value_t = config::REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    pretty_env_logger::init_timed();

    let args = Args::parse();

    let targets = match &args.targets {
        Some(path) => config::load_targets(path)?,
        None => config::default_targets(),
    };
    tracing::info!(target: "main", "scraping {} countries into {}", targets.len(), args.output.display());

    let client = atlas::scrape::basic(Duration::from_secs(args.timeout_secs))?;
    atlas::scrape::run_pipeline(
        &client,
        &targets,
        Duration::from_millis(args.delay_ms),
        &args.output,
    )
    .await?;

    Ok(())
}
