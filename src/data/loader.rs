//! CSV Data Loader Module
//! Reads the fixed-layout mortality export into a wide Polars table.
//!
//! Layout: leading metadata rows, four stacked header rows, one data row per
//! (Year, Cause of Death), trailing footer rows. Semicolon-delimited,
//! Windows-1252 encoded.

use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::header::{ColumnRole, HeaderModel, HEADER_ROWS, IDENTIFIER_COLUMNS};
use super::processor::{parse_death_count, DataProcessor, TidyTable};
use super::{CAUSE_COLUMN, YEAR_COLUMN};

/// Metadata rows above the header block.
pub const LEADING_METADATA_ROWS: usize = 5;

/// Non-data rows below the last data row.
pub const FOOTER_ROWS: usize = 4;

pub const DELIMITER: u8 = b';';

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unexpected file layout: {0}")]
    Format(#[from] FormatError),
    #[error("Failed to build table: {0}")]
    Frame(#[from] PolarsError),
}

/// Ways the file can deviate from the fixed layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected at least {expected} rows, found {found}")]
    TooFewRows { expected: usize, found: usize },
    #[error("expected {expected} header rows, found {found}")]
    HeaderRows { expected: usize, found: usize },
    #[error("no demographic columns after the identifier columns")]
    NoDemographicColumns,
    #[error("column {column}: unexpected sex label {label:?}")]
    UnexpectedSex { column: usize, label: String },
    #[error("column {column}: second row-total column")]
    DuplicateRowTotal { column: usize },
    #[error("duplicate column label {label:?}")]
    DuplicateColumn { label: String },
    #[error("row {row}: expected {expected} fields, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}: invalid year {value:?}")]
    InvalidYear { row: usize, value: String },
    #[error("row {row}: data row inside the {expected}-row footer")]
    FooterShape { row: usize, expected: usize },
    #[error("malformed record: {0}")]
    Record(String),
}

/// Wide table: identifier columns plus one raw string column per header column.
#[derive(Debug, Clone)]
pub struct WideTable {
    header: HeaderModel,
    df: DataFrame,
}

impl WideTable {
    /// Parse raw file bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoaderError> {
        let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
        if had_errors {
            warn!("input contains bytes outside windows-1252");
        }
        let records = split_records(&text)?;
        Self::from_records(&records)
    }

    /// Build from already split records, metadata and footer rows included.
    pub fn from_records(records: &[Vec<String>]) -> Result<Self, LoaderError> {
        let min_rows = LEADING_METADATA_ROWS + HEADER_ROWS + FOOTER_ROWS;
        if records.len() < min_rows {
            return Err(FormatError::TooFewRows {
                expected: min_rows,
                found: records.len(),
            }
            .into());
        }

        let header_end = LEADING_METADATA_ROWS + HEADER_ROWS;
        let data_end = records.len() - FOOTER_ROWS;
        let header = HeaderModel::parse(&records[LEADING_METADATA_ROWS..header_end])?;
        let width = header.width();

        for (offset, row) in records[data_end..].iter().enumerate() {
            if is_data_row(row, width) {
                return Err(FormatError::FooterShape {
                    row: data_end + offset + 1,
                    expected: FOOTER_ROWS,
                }
                .into());
            }
        }

        let data = &records[header_end..data_end];
        let mut years: Vec<i32> = Vec::with_capacity(data.len());
        let mut causes: Vec<String> = Vec::with_capacity(data.len());
        let mut cells: Vec<Vec<String>> =
            vec![Vec::with_capacity(data.len()); width - IDENTIFIER_COLUMNS];

        for (i, row) in data.iter().enumerate() {
            let line = header_end + i + 1;
            if row.len() != width {
                return Err(FormatError::RowWidth {
                    row: line,
                    expected: width,
                    found: row.len(),
                }
                .into());
            }
            let year = row[0].parse::<i32>().map_err(|_| FormatError::InvalidYear {
                row: line,
                value: row[0].clone(),
            })?;

            years.push(year);
            causes.push(row[1].clone());
            for (column, cell) in row[IDENTIFIER_COLUMNS..].iter().enumerate() {
                cells[column].push(cell.clone());
            }
        }

        let mut columns = vec![
            Column::new(YEAR_COLUMN.into(), years),
            Column::new(CAUSE_COLUMN.into(), causes),
        ];
        for (role, values) in header.roles()[IDENTIFIER_COLUMNS..].iter().zip(cells) {
            let label = match role {
                ColumnRole::Demographic(slice) => slice.label.as_str(),
                ColumnRole::RowTotal { label } => label.as_str(),
                ColumnRole::Year | ColumnRole::CauseOfDeath => continue,
            };
            columns.push(Column::new(label.into(), values));
        }

        let df = DataFrame::new(columns)?;
        debug!(rows = df.height(), columns = df.width(), "built wide table");

        Ok(Self { header, df })
    }

    pub fn header(&self) -> &HeaderModel {
        &self.header
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Number of (Year, Cause of Death) rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn demographic_count(&self) -> usize {
        self.header.demographic_columns().count()
    }

    /// Parsed values of the row-total column, if the file has one.
    pub fn row_totals(&self) -> PolarsResult<Option<Vec<Option<i64>>>> {
        let Some((_, label)) = self.header.row_total_column() else {
            return Ok(None);
        };
        let values = self.df.column(label)?.str()?;
        Ok(Some(
            values
                .into_iter()
                .map(|cell| cell.and_then(parse_death_count))
                .collect(),
        ))
    }
}

/// Loads the mortality export from disk.
pub struct MortalityLoader {
    file_path: PathBuf,
}

impl MortalityLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Read and parse the wide table.
    pub fn load_wide(&self) -> Result<WideTable, LoaderError> {
        let bytes = fs::read(&self.file_path).map_err(|source| LoaderError::FileAccess {
            path: self.file_path.clone(),
            source,
        })?;
        info!(path = %self.file_path.display(), bytes = bytes.len(), "read mortality export");
        WideTable::from_bytes(&bytes)
    }

    /// Read, parse and reshape into the tidy table.
    pub fn load_tidy(&self) -> Result<TidyTable, LoaderError> {
        let wide = self.load_wide()?;
        let tidy = DataProcessor::to_tidy(&wide)?;
        info!(
            wide_rows = wide.height(),
            demographic_columns = wide.demographic_count(),
            tidy_rows = tidy.height(),
            "reshaped to tidy table"
        );
        Ok(tidy)
    }
}

fn split_records(text: &str) -> Result<Vec<Vec<String>>, FormatError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(|field| field.trim().to_string()).collect())
                .map_err(|e| FormatError::Record(e.to_string()))
        })
        .collect()
}

fn is_data_row(row: &[String], width: usize) -> bool {
    row.len() == width && row.first().is_some_and(|cell| cell.parse::<i32>().is_ok())
}
