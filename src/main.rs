pub mod cli;
pub mod csv_handler;
pub mod error;
pub mod matcher;
pub mod merger;
pub mod pipeline;
pub mod verifier;

#[cfg(test)]
mod test_support;

use clap::Parser;
use cli::Cli;
use error::Result;
use log::{error, info};
use std::time::Instant;

/// Info by default; `filters` (the `RUST_LOG` syntax) overrides it.
fn logger_builder(filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .format_target(false)
        .format_timestamp_secs()
        .filter_level(log::LevelFilter::Info);
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    builder
}

#[tokio::main]
async fn main() -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    if let Err(e) = logger_builder(rust_log.as_deref()).try_init() {
        eprintln!("Logger already initialized: {}", e);
    }

    let config = Cli::parse().into_run_config();
    info!("Starting name reconciliation...");
    info!("Source A: {:?} (column {})", config.source_a.path, config.source_a.name_column);
    info!("Source B: {:?} (column {})", config.source_b.path, config.source_b.name_column);
    info!("Output file: {:?}", config.output);

    let start_time = Instant::now();
    let summary = match pipeline::run(&config).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Run failed during {} stage: {}", e.stage(), e);
            return Err(e);
        }
    };

    summary.print(&config.output);
    println!("Execution time: {:.2?}", start_time.elapsed());
    Ok(())
}
