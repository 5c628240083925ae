//! Application Module
//! Runs the analyses. Every analysis reloads its own tidy table, so
//! analyses share no state and can run in any order or in parallel.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::info;

use crate::charts::{series, ChartKind, ChartRenderer};
use crate::config::AppConfig;
use crate::data::{MortalityLoader, TidyTable};
use crate::stats::{MedianAge, StatsCalculator};

/// The one-line median age summary.
pub fn median_summary_line(year: i32, stats: &MedianAge) -> String {
    format!(
        "The median age of death from breast cancer for women in {year} is: {:.2} ± {:.2} ages",
        stats.median, stats.std_dev
    )
}

pub struct MortalityApp {
    config: AppConfig,
}

impl MortalityApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn load(&self) -> Result<TidyTable> {
        MortalityLoader::new(&self.config.data_path)
            .load_tidy()
            .context("failed to load mortality data")
    }

    /// Median age at death from breast cancer for women in the report year.
    pub fn median_age_summary(&self) -> Result<MedianAge> {
        let table = self.load()?;
        let year = self.config.report_year;
        let weights = series::breast_cancer_age_sample(&table, year)?;
        let stats = StatsCalculator::median_age(&weights)
            .with_context(|| format!("no female breast cancer deaths recorded for {year}"))?;
        info!(year, deaths = stats.count, "computed median age");
        Ok(stats)
    }

    /// Render one chart into the output directory and return its path.
    pub fn render_chart(&self, kind: ChartKind) -> Result<PathBuf> {
        let table = self.load()?;
        let year = self.config.report_year;

        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "failed to create output directory {}",
                self.config.output_dir.display()
            )
        })?;
        let path = self.config.chart_path(kind.file_name());

        match kind {
            ChartKind::CauseDistribution => {
                let shares =
                    series::cause_distribution(&table, year, self.config.share_threshold_pct)?;
                ChartRenderer::cause_distribution(&shares, year, &path)?;
            }
            ChartKind::CancerBySex => {
                let bars = series::cancer_mortality_by_sex(&table, year)?;
                ChartRenderer::cancer_by_sex(&bars, year, &path)?;
            }
            ChartKind::BreastCancerTrend => {
                let trend = series::breast_cancer_trend(&table)?;
                ChartRenderer::breast_cancer_trend(&trend, &path)?;
            }
            ChartKind::BreastCancerByAge => {
                let buckets = series::breast_cancer_by_age(&table, year)?;
                ChartRenderer::breast_cancer_by_age(&buckets, year, &path)?;
            }
        }

        info!(chart = kind.name(), path = %path.display(), "chart written");
        Ok(path)
    }

    /// Render every chart in parallel.
    pub fn render_all(&self) -> Result<Vec<PathBuf>> {
        ChartKind::ALL
            .par_iter()
            .map(|kind| self.render_chart(*kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_uses_two_decimals() {
        let stats = MedianAge {
            median: 72.5,
            std_dev: 13.456,
            count: 10,
        };
        assert_eq!(
            median_summary_line(2022, &stats),
            "The median age of death from breast cancer for women in 2022 is: 72.50 ± 13.46 ages"
        );
    }

    #[test]
    fn missing_data_file_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_path: dir.path().join("absent.csv"),
            ..AppConfig::default()
        };
        let err = MortalityApp::new(config).median_age_summary().unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("absent.csv"), "{message}");
    }
}
