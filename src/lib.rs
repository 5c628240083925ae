//! Mortality Charts - cause-of-death mortality loader and descriptive charts
//!
//! Loads the fixed-layout mortality export, reshapes it into a tidy table
//! and derives the chart series and the median age summary from it.

pub mod app;
pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod stats;

pub use app::{median_summary_line, MortalityApp};
pub use config::AppConfig;
