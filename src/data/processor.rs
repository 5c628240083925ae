//! Data Processor Module
//! Reshapes the wide table into the tidy (long) table (melt operation).

use polars::prelude::*;
use tracing::debug;

use super::header::Sex;
use super::loader::WideTable;
use super::vocab::AGE_UNKNOWN;
use super::{AGE_GROUP_COLUMN, CAUSE_COLUMN, DEATHS_COLUMN, SEX_COLUMN, YEAR_COLUMN};

/// One row of the tidy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidyRecord {
    pub year: i32,
    pub cause: String,
    /// `None` when the source cell held no number.
    pub deaths: Option<i64>,
    pub sex: Sex,
    pub age_group: String,
}

/// Long-format table: Year, Cause of Death, Number of Deaths, Sex, Age Group.
///
/// Built once per load and never mutated; consumers derive filtered copies.
#[derive(Debug, Clone)]
pub struct TidyTable {
    df: DataFrame,
}

impl TidyTable {
    /// Build a table directly from records.
    pub fn from_records(records: &[TidyRecord]) -> PolarsResult<Self> {
        let df = DataFrame::new(vec![
            Column::new(
                YEAR_COLUMN.into(),
                records.iter().map(|r| r.year).collect::<Vec<_>>(),
            ),
            Column::new(
                CAUSE_COLUMN.into(),
                records.iter().map(|r| r.cause.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                DEATHS_COLUMN.into(),
                records.iter().map(|r| r.deaths).collect::<Vec<_>>(),
            ),
            Column::new(
                SEX_COLUMN.into(),
                records.iter().map(|r| r.sex.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                AGE_GROUP_COLUMN.into(),
                records.iter().map(|r| r.age_group.as_str()).collect::<Vec<_>>(),
            ),
        ])?;
        Ok(Self { df })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Lazy view for filtering and aggregation.
    pub fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Materialise typed records in table order.
    pub fn records(&self) -> PolarsResult<Vec<TidyRecord>> {
        let years = self.df.column(YEAR_COLUMN)?.i32()?;
        let causes = self.df.column(CAUSE_COLUMN)?.str()?;
        let deaths = self.df.column(DEATHS_COLUMN)?.i64()?;
        let sexes = self.df.column(SEX_COLUMN)?.str()?;
        let ages = self.df.column(AGE_GROUP_COLUMN)?.str()?;

        let records = years
            .into_iter()
            .zip(causes)
            .zip(deaths)
            .zip(sexes)
            .zip(ages)
            .filter_map(|((((year, cause), deaths), sex), age)| {
                Some(TidyRecord {
                    year: year?,
                    cause: cause?.to_string(),
                    deaths,
                    sex: Sex::parse(sex?)?,
                    age_group: age?.to_string(),
                })
            })
            .collect();
        Ok(records)
    }
}

/// Parse a death count cell. Integral decimals such as `5.0` are accepted.
/// Markers such as `-`, `.` or `x`, fractions and negative numbers yield
/// `None`.
pub fn parse_death_count(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    let count = match cell.parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            let value = cell.parse::<f64>().ok()?;
            if !value.is_finite() || value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
                return None;
            }
            value as i64
        }
    };
    (count >= 0).then_some(count)
}

/// Handles the wide-to-long transformation.
pub struct DataProcessor;

impl DataProcessor {
    /// Melt every demographic column into (Sex, Age Group, Number of Deaths)
    /// rows, keeping Year and Cause of Death fixed. `age unknown` columns are
    /// skipped.
    pub fn to_tidy(wide: &WideTable) -> PolarsResult<TidyTable> {
        let df = wide.frame();
        let years: Vec<i32> = df.column(YEAR_COLUMN)?.i32()?.into_no_null_iter().collect();
        let causes: Vec<&str> = df
            .column(CAUSE_COLUMN)?
            .str()?
            .into_iter()
            .map(|c| c.unwrap_or_default())
            .collect();

        let capacity = wide.height() * wide.demographic_count();
        let mut out_years: Vec<i32> = Vec::with_capacity(capacity);
        let mut out_causes: Vec<&str> = Vec::with_capacity(capacity);
        let mut out_deaths: Vec<Option<i64>> = Vec::with_capacity(capacity);
        let mut out_sexes: Vec<&str> = Vec::with_capacity(capacity);
        let mut out_ages: Vec<&str> = Vec::with_capacity(capacity);
        let mut absent = 0usize;

        for (_, slice) in wide.header().demographic_columns() {
            if slice.age_group == AGE_UNKNOWN {
                continue;
            }

            let cells = df.column(&slice.label)?.str()?;
            for ((year, cause), cell) in years.iter().zip(&causes).zip(cells) {
                let deaths = cell.and_then(parse_death_count);
                if deaths.is_none() {
                    absent += 1;
                }
                out_years.push(*year);
                out_causes.push(cause);
                out_deaths.push(deaths);
                out_sexes.push(slice.sex.as_str());
                out_ages.push(&slice.age_group);
            }
        }

        debug!(absent, "cells without a death count");

        let df = DataFrame::new(vec![
            Column::new(YEAR_COLUMN.into(), out_years),
            Column::new(CAUSE_COLUMN.into(), out_causes),
            Column::new(DEATHS_COLUMN.into(), out_deaths),
            Column::new(SEX_COLUMN.into(), out_sexes),
            Column::new(AGE_GROUP_COLUMN.into(), out_ages),
        ])?;

        Ok(TidyTable { df })
    }
}
