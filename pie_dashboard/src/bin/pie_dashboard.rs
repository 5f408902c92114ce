use anyhow::Result;
use clap::Parser;
use pie_dashboard::{
    config::DashboardConfig,
    render::TerminalRenderer,
    runner::{RunnerOptions, run_loop},
};
use sheet_ingestor::sources::sheet_csv::SheetCsvSource;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Animated raffle leaderboard for a shared spreadsheet")]
struct Cli {
    /// Path to the config file (dashboard.toml)
    #[arg(short, long, value_name = "FILE")]
    config: String,

    /// Run a single fetch/render cycle, then exit
    #[arg(long)]
    once: bool,

    /// Log filter, e.g. "info" or "pie_dashboard=debug" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; the chart owns stdout.
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::load(&cli.config)?;
    let source = SheetCsvSource::new(config.source.sheet.clone())?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    let opts = RunnerOptions {
        steps: config.animation.steps,
        frame_delay: config.animation.frame_delay(),
        poll_interval: config.animation.poll_interval(),
        max_retries: config.source.max_retries,
        base_delay: config.source.base_delay(),
        once: cli.once,
    };

    let mut renderer = TerminalRenderer::stdout(config.title.clone())?;
    let result = run_loop(&opts, &source, &mut renderer, shutdown_rx).await;
    renderer.restore()?;
    Ok(result?)
}
