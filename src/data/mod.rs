//! Data module - CSV loading and tidy reshaping

mod header;
mod loader;
mod processor;
pub mod vocab;

pub use header::{ColumnRole, DemographicSlice, HeaderModel, Sex};
pub use loader::{FormatError, LoaderError, MortalityLoader, WideTable};
pub use processor::{parse_death_count, DataProcessor, TidyRecord, TidyTable};

pub const YEAR_COLUMN: &str = "Year";
pub const CAUSE_COLUMN: &str = "Cause of Death";
pub const DEATHS_COLUMN: &str = "Number of Deaths";
pub const SEX_COLUMN: &str = "Sex";
pub const AGE_GROUP_COLUMN: &str = "Age Group";

/// Tidy table column order.
pub const TIDY_COLUMNS: [&str; 5] = [
    YEAR_COLUMN,
    CAUSE_COLUMN,
    DEATHS_COLUMN,
    SEX_COLUMN,
    AGE_GROUP_COLUMN,
];
