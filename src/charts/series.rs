//! Chart Series Module
//! Filter and aggregate steps turning the tidy table into per-chart series.

use std::collections::HashMap;

use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::data::vocab::{
    self, AgeGroup, AGE_GROUPS, ALL_MALIGNANT_NEOPLASMS, BREAST_CANCER,
    FEMALE_REPRODUCTIVE_CANCERS, FEMALE_REPRODUCTIVE_SYSTEM, TOTAL_CAUSE,
};
use crate::data::{
    Sex, TidyTable, AGE_GROUP_COLUMN, CAUSE_COLUMN, DEATHS_COLUMN, SEX_COLUMN, YEAR_COLUMN,
};

/// Label of the slice collecting all causes below the share threshold.
pub const OTHER_LABEL: &str = "Other";

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No positive '{}' row for {year}", TOTAL_CAUSE)]
    MissingTotal { year: i32 },
}

/// Percentage of all deaths of a year attributed to one cause.
#[derive(Debug, Clone, PartialEq)]
pub struct CauseShare {
    pub cause: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancerBySex {
    pub cause: String,
    pub label: String,
    pub female: i64,
    pub male: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearDeaths {
    pub year: i32,
    pub deaths: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeDeaths {
    pub group: &'static AgeGroup,
    /// Absent counts are reported as zero.
    pub deaths: i64,
}

/// Primary causes of death as shares of the year's `Total`.
///
/// `Total` only serves as the denominator. Shares are sorted descending and
/// those under `threshold_pct` are folded into a trailing [`OTHER_LABEL`].
pub fn cause_distribution(
    table: &TidyTable,
    year: i32,
    threshold_pct: f64,
) -> Result<Vec<CauseShare>, SeriesError> {
    let totals: Vec<(String, i64)> = sum_by(table, col(YEAR_COLUMN).eq(lit(year)), CAUSE_COLUMN)?
        .into_iter()
        .filter(|(cause, _)| vocab::is_primary_cause(cause))
        .collect();

    let total = totals
        .iter()
        .find(|(cause, _)| cause == TOTAL_CAUSE)
        .map(|(_, deaths)| *deaths)
        .filter(|deaths| *deaths > 0)
        .ok_or(SeriesError::MissingTotal { year })?;

    let mut shares: Vec<CauseShare> = totals
        .into_iter()
        .filter(|(cause, _)| cause != TOTAL_CAUSE)
        .map(|(cause, deaths)| CauseShare {
            cause,
            percent: deaths as f64 / total as f64 * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| {
        b.percent
            .total_cmp(&a.percent)
            .then_with(|| a.cause.cmp(&b.cause))
    });

    let (mut significant, minor): (Vec<_>, Vec<_>) = shares
        .into_iter()
        .partition(|share| share.percent >= threshold_pct);
    debug!(
        significant = significant.len(),
        folded = minor.len(),
        "cause distribution"
    );
    significant.push(CauseShare {
        cause: OTHER_LABEL.to_string(),
        percent: minor.iter().map(|share| share.percent).sum(),
    });

    Ok(significant)
}

/// Deaths per cancer type and sex for one year.
///
/// Cervix, corpus uteri and ovary cancers are merged into one female
/// reproductive system entry; the all-cancer aggregate is left out.
pub fn cancer_mortality_by_sex(
    table: &TidyTable,
    year: i32,
) -> Result<Vec<CancerBySex>, SeriesError> {
    let out = table
        .lazy()
        .filter(col(YEAR_COLUMN).eq(lit(year)))
        .group_by([col(CAUSE_COLUMN), col(SEX_COLUMN)])
        .agg([col(DEATHS_COLUMN).sum()])
        .collect()?;

    let causes = out.column(CAUSE_COLUMN)?.str()?;
    let sexes = out.column(SEX_COLUMN)?.str()?;
    let sums = out.column(DEATHS_COLUMN)?.i64()?;

    let mut by_cause: HashMap<&str, (i64, i64)> = HashMap::new();
    for ((cause, sex), deaths) in causes.into_iter().zip(sexes).zip(sums) {
        let (Some(cause), Some(sex)) = (cause, sex.and_then(Sex::parse)) else {
            continue;
        };
        if !vocab::is_cancer_type(cause) || cause == ALL_MALIGNANT_NEOPLASMS {
            continue;
        }
        let key = if FEMALE_REPRODUCTIVE_CANCERS.contains(&cause) {
            FEMALE_REPRODUCTIVE_SYSTEM
        } else {
            cause
        };
        let entry = by_cause.entry(key).or_default();
        match sex {
            Sex::Female => entry.0 += deaths.unwrap_or(0),
            Sex::Male => entry.1 += deaths.unwrap_or(0),
        }
    }

    Ok(vocab::CANCER_ALIASES
        .iter()
        .filter_map(|(cause, alias)| {
            by_cause.get(cause).map(|(female, male)| CancerBySex {
                cause: cause.to_string(),
                label: alias.to_string(),
                female: *female,
                male: *male,
            })
        })
        .collect())
}

/// Female breast-cancer deaths per year, ascending by year.
pub fn breast_cancer_trend(table: &TidyTable) -> Result<Vec<YearDeaths>, SeriesError> {
    let out = table
        .lazy()
        .filter(female_breast_cancer())
        .group_by([col(YEAR_COLUMN)])
        .agg([col(DEATHS_COLUMN).sum()])
        .collect()?;

    let years = out.column(YEAR_COLUMN)?.i32()?;
    let sums = out.column(DEATHS_COLUMN)?.i64()?;
    let mut trend: Vec<YearDeaths> = years
        .into_iter()
        .zip(sums)
        .filter_map(|(year, deaths)| {
            Some(YearDeaths {
                year: year?,
                deaths: deaths.unwrap_or(0),
            })
        })
        .collect();
    trend.sort_by_key(|point| point.year);

    Ok(trend)
}

/// Female breast-cancer deaths per age group for one year, in age order.
pub fn breast_cancer_by_age(table: &TidyTable, year: i32) -> Result<Vec<AgeDeaths>, SeriesError> {
    let by_label: HashMap<String, i64> = sum_by(
        table,
        female_breast_cancer().and(col(YEAR_COLUMN).eq(lit(year))),
        AGE_GROUP_COLUMN,
    )?
    .into_iter()
    .collect();

    Ok(AGE_GROUPS
        .iter()
        .map(|group| AgeDeaths {
            group,
            deaths: by_label.get(group.label).copied().unwrap_or(0),
        })
        .collect())
}

/// (age midpoint, deaths) weights of female breast-cancer deaths in `year`.
pub fn breast_cancer_age_sample(
    table: &TidyTable,
    year: i32,
) -> Result<Vec<(f64, u64)>, SeriesError> {
    Ok(breast_cancer_by_age(table, year)?
        .into_iter()
        .map(|bucket| (bucket.group.midpoint, bucket.deaths.max(0) as u64))
        .collect())
}

fn female_breast_cancer() -> Expr {
    col(SEX_COLUMN)
        .eq(lit(Sex::Female.as_str()))
        .and(col(CAUSE_COLUMN).eq(lit(BREAST_CANCER)))
}

/// Filter, then sum deaths per value of a string column.
fn sum_by(table: &TidyTable, predicate: Expr, key: &str) -> PolarsResult<Vec<(String, i64)>> {
    let out = table
        .lazy()
        .filter(predicate)
        .group_by([col(key)])
        .agg([col(DEATHS_COLUMN).sum()])
        .collect()?;

    let keys = out.column(key)?.str()?;
    let sums = out.column(DEATHS_COLUMN)?.i64()?;
    Ok(keys
        .into_iter()
        .zip(sums)
        .filter_map(|(k, deaths)| Some((k?.to_string(), deaths.unwrap_or(0))))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TidyRecord;

    fn rec(year: i32, cause: &str, sex: Sex, age: &str, deaths: Option<i64>) -> TidyRecord {
        TidyRecord {
            year,
            cause: cause.to_string(),
            deaths,
            sex,
            age_group: age.to_string(),
        }
    }

    fn table(records: Vec<TidyRecord>) -> TidyTable {
        TidyTable::from_records(&records).unwrap()
    }

    const YOUNG: &str = "20 to under 25 years";
    const OLD: &str = "85 years and over";

    #[test]
    fn cause_shares_use_total_as_denominator() {
        let circulatory = "Diseases of the circulatory system";
        let skin = "Diseases of the skin and subcutaneous tissue";
        let blood = "Diseases of the blood and blood-forming organs";
        let t = table(vec![
            rec(2022, TOTAL_CAUSE, Sex::Female, OLD, Some(600)),
            rec(2022, TOTAL_CAUSE, Sex::Male, OLD, Some(400)),
            rec(2022, circulatory, Sex::Female, OLD, Some(300)),
            rec(2022, circulatory, Sex::Male, OLD, Some(100)),
            rec(2022, ALL_MALIGNANT_NEOPLASMS, Sex::Male, OLD, Some(250)),
            rec(2022, skin, Sex::Female, OLD, Some(20)),
            rec(2022, blood, Sex::Female, OLD, Some(10)),
            rec(2022, blood, Sex::Male, OLD, None),
            // Not a primary cause, and another year.
            rec(2022, BREAST_CANCER, Sex::Female, OLD, Some(90)),
            rec(2021, circulatory, Sex::Female, OLD, Some(999)),
        ]);

        let shares = cause_distribution(&t, 2022, 4.0).unwrap();
        let labels: Vec<&str> = shares.iter().map(|s| s.cause.as_str()).collect();
        assert_eq!(labels, vec![circulatory, ALL_MALIGNANT_NEOPLASMS, OTHER_LABEL]);
        assert!((shares[0].percent - 40.0).abs() < 1e-9);
        assert!((shares[1].percent - 25.0).abs() < 1e-9);
        assert!((shares[2].percent - 3.0).abs() < 1e-9);
    }

    #[test]
    fn cause_shares_require_total() {
        let t = table(vec![rec(
            2022,
            ALL_MALIGNANT_NEOPLASMS,
            Sex::Male,
            OLD,
            Some(5),
        )]);
        assert!(matches!(
            cause_distribution(&t, 2022, 4.0),
            Err(SeriesError::MissingTotal { year: 2022 })
        ));
    }

    #[test]
    fn cancer_by_sex_merges_reproductive_cancers() {
        let t = table(vec![
            rec(2022, ALL_MALIGNANT_NEOPLASMS, Sex::Female, OLD, Some(1000)),
            rec(2022, BREAST_CANCER, Sex::Female, OLD, Some(50)),
            rec(2022, BREAST_CANCER, Sex::Female, YOUNG, Some(5)),
            rec(2022, BREAST_CANCER, Sex::Male, OLD, Some(1)),
            rec(2022, "Malignant neoplasms of ovary", Sex::Female, OLD, Some(7)),
            rec(2022, "Malignant neoplasms of cervix uteri", Sex::Female, OLD, Some(3)),
            rec(2022, "Malignant neoplasms of prostate", Sex::Male, OLD, Some(40)),
            rec(2021, "Malignant neoplasms of prostate", Sex::Male, OLD, Some(99)),
        ]);

        let bars = cancer_mortality_by_sex(&t, 2022).unwrap();
        assert_eq!(
            bars,
            vec![
                CancerBySex {
                    cause: BREAST_CANCER.into(),
                    label: "breast".into(),
                    female: 55,
                    male: 1,
                },
                CancerBySex {
                    cause: "Malignant neoplasms of prostate".into(),
                    label: "prostate".into(),
                    female: 0,
                    male: 40,
                },
                CancerBySex {
                    cause: FEMALE_REPRODUCTIVE_SYSTEM.into(),
                    label: "female reproductive system".into(),
                    female: 10,
                    male: 0,
                },
            ]
        );
    }

    #[test]
    fn trend_sums_female_breast_cancer_per_year() {
        let t = table(vec![
            rec(2022, BREAST_CANCER, Sex::Female, OLD, Some(10)),
            rec(2022, BREAST_CANCER, Sex::Female, YOUNG, Some(2)),
            rec(2003, BREAST_CANCER, Sex::Female, OLD, Some(8)),
            rec(2003, BREAST_CANCER, Sex::Male, OLD, Some(100)),
            rec(2003, "Malignant neoplasms of colon", Sex::Female, OLD, Some(100)),
        ]);

        let trend = breast_cancer_trend(&t).unwrap();
        assert_eq!(
            trend,
            vec![
                YearDeaths {
                    year: 2003,
                    deaths: 8
                },
                YearDeaths {
                    year: 2022,
                    deaths: 12
                },
            ]
        );
    }

    #[test]
    fn by_age_covers_every_group_and_fills_absent_with_zero() {
        let t = table(vec![
            rec(2022, BREAST_CANCER, Sex::Female, "under 1 year", None),
            rec(2022, BREAST_CANCER, Sex::Female, YOUNG, Some(5)),
            rec(2022, BREAST_CANCER, Sex::Female, OLD, Some(30)),
            rec(2021, BREAST_CANCER, Sex::Female, OLD, Some(70)),
        ]);

        let buckets = breast_cancer_by_age(&t, 2022).unwrap();
        assert_eq!(buckets.len(), AGE_GROUPS.len());
        assert_eq!(buckets[0].group.alias, "<1*");
        assert_eq!(buckets[0].deaths, 0);
        assert_eq!(buckets[3].group.label, YOUNG);
        assert_eq!(buckets[3].deaths, 5);
        assert_eq!(buckets[16].deaths, 30);

        let sample = breast_cancer_age_sample(&t, 2022).unwrap();
        let weighted: Vec<(f64, u64)> = sample.into_iter().filter(|(_, n)| *n > 0).collect();
        assert_eq!(weighted, vec![(22.5, 5), (90.0, 30)]);
    }
}
