//! Charts module - Series preparation and chart rendering

mod renderer;
pub mod series;

pub use renderer::{ChartError, ChartRenderer};
pub use series::SeriesError;

/// The charts the tool can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    CauseDistribution,
    CancerBySex,
    BreastCancerTrend,
    BreastCancerByAge,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::CauseDistribution,
        ChartKind::CancerBySex,
        ChartKind::BreastCancerTrend,
        ChartKind::BreastCancerByAge,
    ];

    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::CauseDistribution => "causes",
            ChartKind::CancerBySex => "cancer-by-sex",
            ChartKind::BreastCancerTrend => "trend",
            ChartKind::BreastCancerByAge => "by-age",
        }
    }

    /// Output file name.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::CauseDistribution => "cause_distribution.png",
            ChartKind::CancerBySex => "cancer_mortality_by_sex.png",
            ChartKind::BreastCancerTrend => "breast_cancer_trend.png",
            ChartKind::BreastCancerByAge => "breast_cancer_by_age.png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn file_names_are_distinct_pngs() {
        let names: HashSet<&str> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(names.len(), ChartKind::ALL.len());
        assert!(names.iter().all(|n| n.ends_with(".png")));
    }
}
