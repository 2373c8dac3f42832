use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wordcloud::config::Config;
use wordcloud::errors::AppError;
use wordcloud::input::read_terms;
use wordcloud::layout::LayoutScheduler;

/// Usage: `wordcloud [TERMS.json|-]`
///
/// Reads weighted terms (file or stdin), lays them out on the configured
/// canvas and writes the `LayoutResult` as JSON to stdout. Logs go to stderr.
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging on stderr; stdout carries the layout JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting wordcloud v{}", env!("CARGO_PKG_VERSION"));

    let input = std::env::args_os().nth(1).map(PathBuf::from);
    if let Err(e) = run(&config, input).await {
        error!("{e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}

async fn run(config: &Config, input: Option<PathBuf>) -> Result<(), AppError> {
    let terms = read_terms(input.as_deref())?;
    let canvas = config.canvas();
    info!(
        terms = terms.len(),
        width = canvas.width,
        height = canvas.height,
        "Laying out word cloud"
    );

    let scheduler = LayoutScheduler::new();
    let outcome = scheduler
        .submit(terms, canvas, config.layout_config())
        .await?;
    let result = outcome
        .into_current()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("sole layout request was superseded")))?;

    if let Some(summary) = result.omitted_summary() {
        info!("{summary}");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &result)?;
    writeln!(out)?;
    Ok(())
}
