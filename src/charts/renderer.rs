//! Static Chart Renderer
//! Renders the mortality series to PNG images with plotters.
//!
//! Charts:
//! 1. Pie: share of deaths per primary cause, cancer highlighted
//! 2. Grouped bars: deaths per cancer type, female vs male
//! 3. Line: female breast-cancer deaths per year
//! 4. Bars: female breast-cancer deaths per age group

use std::path::Path;

use plotters::coord::ranged1d::SegmentValue;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::FontTransform;
use thiserror::Error;
use tracing::debug;

use super::series::{AgeDeaths, CancerBySex, CauseShare, YearDeaths};
use crate::data::vocab::ALL_MALIGNANT_NEOPLASMS;

// Colors (RGB)
const INDIAN_RED: RGBColor = RGBColor(205, 92, 92); // Cancer slice
const DARK_GRAY: RGBColor = RGBColor(169, 169, 169);
const LIGHT_GRAY: RGBColor = RGBColor(211, 211, 211);
const TAB_BLUE: RGBColor = RGBColor(31, 119, 180); // Female
const TAB_ORANGE: RGBColor = RGBColor(255, 127, 14); // Male

const FONT: &str = "sans-serif";

/// Lower bound of the trend chart's y-axis top.
const TREND_Y_TOP: i64 = 22_000;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Nothing to plot for {0}")]
    EmptySeries(&'static str),
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Pie chart of cause shares.
    pub fn cause_distribution(
        shares: &[CauseShare],
        year: i32,
        path: &Path,
    ) -> Result<(), ChartError> {
        if shares.is_empty() {
            return Err(ChartError::EmptySeries("cause distribution"));
        }

        let root = BitMapBackend::new(path, (1800, 600)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let title = format!("Proportion of Mortality by Cause in Germany in {year}");
        let area = root.titled(&title, (FONT, 26)).map_err(render_err)?;

        let (w, h) = area.dim_in_pixel();
        let center = ((w / 2) as i32, (h / 2) as i32);
        let radius = f64::from(w.min(h)) * 0.38;
        let sizes: Vec<f64> = shares.iter().map(|s| s.percent).collect();
        let colors = Self::pie_colors(shares);
        let labels: Vec<String> = shares.iter().map(|s| s.cause.clone()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(140.0);
        pie.label_style((FONT, 14).into_font().color(&BLACK));
        pie.percentages((FONT, 12).into_font().color(&BLACK));
        area.draw(&pie).map_err(render_err)?;

        root.present().map_err(render_err)?;
        debug!(path = %path.display(), slices = shares.len(), "rendered pie chart");
        Ok(())
    }

    /// Grouped bars of cancer deaths by sex.
    pub fn cancer_by_sex(bars: &[CancerBySex], year: i32, path: &Path) -> Result<(), ChartError> {
        if bars.is_empty() {
            return Err(ChartError::EmptySeries("cancer mortality by sex"));
        }

        let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
        let y_max = bars.iter().map(|b| b.female.max(b.male)).max().unwrap_or(0);

        let root = BitMapBackend::new(path, (1200, 700)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Comparison of Cancer Types Mortality in {year} by Sex"),
                (FONT, 24),
            )
            .margin(20)
            .x_label_area_size(200)
            .y_label_area_size(80)
            .build_cartesian_2d((0..bars.len()).into_segmented(), 0i64..Self::y_ceiling(y_max))
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len())
            .x_label_formatter(&|v| Self::segment_label(&labels, v))
            .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate90))
            .x_desc("Type of Cancer")
            .y_desc("Number of Deaths")
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                Rectangle::new(
                    [(SegmentValue::Exact(i), 0), (SegmentValue::CenterOf(i), bar.female)],
                    TAB_BLUE.filled(),
                )
            }))
            .map_err(render_err)?
            .label("Female")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], TAB_BLUE.filled()));

        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                Rectangle::new(
                    [(SegmentValue::CenterOf(i), 0), (SegmentValue::Exact(i + 1), bar.male)],
                    TAB_ORANGE.filled(),
                )
            }))
            .map_err(render_err)?
            .label("Male")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], TAB_ORANGE.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        debug!(path = %path.display(), bars = bars.len(), "rendered cancer by sex chart");
        Ok(())
    }

    /// Line chart of breast-cancer deaths per year.
    pub fn breast_cancer_trend(trend: &[YearDeaths], path: &Path) -> Result<(), ChartError> {
        let (Some(first), Some(last)) = (trend.first(), trend.last()) else {
            return Err(ChartError::EmptySeries("breast cancer trend"));
        };

        let y_max = trend.iter().map(|p| p.deaths).max().unwrap_or(0);
        let y_top = TREND_Y_TOP.max(Self::y_ceiling(y_max));

        let root = BitMapBackend::new(path, (1000, 500)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!(
                    "Breast Cancer Mortality Trends in Women, {}-{}",
                    first.year, last.year
                ),
                (FONT, 22),
            )
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d((first.year - 1)..(last.year + 1), 0i64..y_top)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_labels(trend.len() + 2)
            .x_label_formatter(&|year| year.to_string())
            .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
            .x_desc("Year")
            .y_desc("Number of Deaths")
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                trend.iter().map(|p| (p.year, p.deaths)),
                TAB_BLUE.stroke_width(2),
            ))
            .map_err(render_err)?;
        chart
            .draw_series(
                trend
                    .iter()
                    .map(|p| Circle::new((p.year, p.deaths), 4, TAB_BLUE.filled())),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        debug!(path = %path.display(), points = trend.len(), "rendered trend chart");
        Ok(())
    }

    /// Bars of breast-cancer deaths per age group.
    pub fn breast_cancer_by_age(
        buckets: &[AgeDeaths],
        year: i32,
        path: &Path,
    ) -> Result<(), ChartError> {
        if buckets.is_empty() {
            return Err(ChartError::EmptySeries("breast cancer by age"));
        }

        let labels: Vec<String> = buckets.iter().map(|b| b.group.alias.to_string()).collect();
        let y_max = buckets.iter().map(|b| b.deaths).max().unwrap_or(0);

        let root = BitMapBackend::new(path, (1000, 500)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Age-Specific Breast Cancer Mortality in Women from Year {year}"),
                (FONT, 22),
            )
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(
                (0..buckets.len()).into_segmented(),
                0i64..Self::y_ceiling(y_max),
            )
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(buckets.len())
            .x_label_formatter(&|v| Self::segment_label(&labels, v))
            .x_desc("Age")
            .y_desc("Number of Deaths")
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(buckets.iter().enumerate().map(|(i, bucket)| {
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), bucket.deaths)],
                    TAB_BLUE.filled(),
                );
                bar.set_margin(0, 0, 4, 4);
                bar
            }))
            .map_err(render_err)?;

        if buckets.iter().any(|b| b.group.no_data) {
            root.draw(&Text::new(
                "* no data available",
                (110, 50),
                (FONT, 14).into_font(),
            ))
            .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        debug!(path = %path.display(), buckets = buckets.len(), "rendered age chart");
        Ok(())
    }

    /// Alternating grays with cancer in indian red; the largest slice is
    /// always light gray.
    fn pie_colors(shares: &[CauseShare]) -> Vec<RGBColor> {
        let mut colors: Vec<RGBColor> = shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                if share.cause == ALL_MALIGNANT_NEOPLASMS {
                    INDIAN_RED
                } else if i % 2 == 0 {
                    DARK_GRAY
                } else {
                    LIGHT_GRAY
                }
            })
            .collect();
        if let Some(first) = colors.first_mut() {
            *first = LIGHT_GRAY;
        }
        colors
    }

    /// Axis top with 10% headroom.
    fn y_ceiling(max: i64) -> i64 {
        (max + max / 10).max(1)
    }

    fn segment_label(labels: &[String], value: &SegmentValue<usize>) -> String {
        match value {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(cause: &str, percent: f64) -> CauseShare {
        CauseShare {
            cause: cause.to_string(),
            percent,
        }
    }

    #[test]
    fn pie_colors_highlight_cancer() {
        let colors = ChartRenderer::pie_colors(&[
            share("Diseases of the circulatory system", 33.0),
            share(ALL_MALIGNANT_NEOPLASMS, 22.0),
            share("Diseases of the respiratory system", 7.0),
            share("Other", 10.0),
        ]);
        assert_eq!(colors, vec![LIGHT_GRAY, INDIAN_RED, DARK_GRAY, LIGHT_GRAY]);
    }

    #[test]
    fn y_ceiling_adds_headroom() {
        assert_eq!(ChartRenderer::y_ceiling(0), 1);
        assert_eq!(ChartRenderer::y_ceiling(100), 110);
    }

    #[test]
    fn segment_labels_by_index() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            ChartRenderer::segment_label(&labels, &SegmentValue::CenterOf(1)),
            "b"
        );
        assert_eq!(
            ChartRenderer::segment_label(&labels, &SegmentValue::Exact(5)),
            ""
        );
        assert_eq!(ChartRenderer::segment_label(&labels, &SegmentValue::Last), "");
    }

    #[test]
    fn empty_series_are_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.png");
        assert!(matches!(
            ChartRenderer::breast_cancer_trend(&[], &path),
            Err(ChartError::EmptySeries(_))
        ));
        assert!(!path.exists());
    }
}
