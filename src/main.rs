//! Mortality Charts - command-line entry point
//!
//! Without arguments prints the median age of death from breast cancer for
//! women in the report year.

use anyhow::{Context, Result};
use mortality_charts::cli::{Cli, Command};
use mortality_charts::{median_summary_line, AppConfig, MortalityApp};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the results.
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(out) = cli.out {
        config.output_dir = out;
    }
    info!(data = %config.data_path.display(), year = config.report_year, "startup");

    let app = MortalityApp::new(config);
    let year = app.config().report_year;

    let charts = match (cli.command, cli.command.chart()) {
        (Command::Summary, _) => {
            let stats = app.median_age_summary()?;
            println!("{}", median_summary_line(year, &stats));
            return Ok(());
        }
        (_, Some(kind)) => vec![app.render_chart(kind)?],
        (_, None) => app.render_all()?,
    };

    for path in &charts {
        println!("{}", path.display());
        if cli.show {
            open::that(path).with_context(|| format!("failed to open {}", path.display()))?;
        }
    }
    Ok(())
}
