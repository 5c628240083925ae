//! Command-line parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};

use crate::charts::ChartKind;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the median age of death from breast cancer for women
    Summary,
    /// Pie chart of primary causes of death
    Causes,
    /// Cancer deaths by sex
    CancerBySex,
    /// Breast cancer deaths of women per year
    Trend,
    /// Breast cancer deaths of women per age group
    ByAge,
    /// Render every chart
    All,
}

impl Command {
    pub fn chart(self) -> Option<ChartKind> {
        match self {
            Command::Causes => Some(ChartKind::CauseDistribution),
            Command::CancerBySex => Some(ChartKind::CancerBySex),
            Command::Trend => Some(ChartKind::BreastCancerTrend),
            Command::ByAge => Some(ChartKind::BreastCancerByAge),
            Command::Summary | Command::All => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mortality_charts")]
#[command(about = "Cause-of-death statistics: median age summary and charts", long_about = None)]
pub struct Cli {
    /// Analysis to run
    #[arg(value_enum, default_value_t = Command::Summary)]
    pub command: Command,

    /// JSON config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mortality export to read (overrides the config)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Directory for rendered charts (overrides the config)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Open rendered charts in the system viewer
    #[arg(long, default_value_t = false)]
    pub show: bool,
}

impl Cli {
    /// Parse the process arguments, exiting with usage on error.
    pub fn parse_args() -> Self {
        Self::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse arguments, program name included.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Self::try_parse_from(args)?;
        if cli.show && cli.command == Command::Summary {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "--show needs a chart command; summary renders no charts",
            ));
        }
        Ok(cli)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_runs_summary() {
        let cli = Cli::try_parse_args(["mortality_charts"]).unwrap();
        assert_eq!(cli.command, Command::Summary);
        assert!(!cli.show);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_chart_command_and_options() {
        let cli = Cli::try_parse_args([
            "mortality_charts",
            "trend",
            "--data",
            "d.csv",
            "--out",
            "png",
            "--show",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Trend);
        assert_eq!(cli.command.chart(), Some(ChartKind::BreastCancerTrend));
        assert_eq!(cli.data, Some(PathBuf::from("d.csv")));
        assert_eq!(cli.out, Some(PathBuf::from("png")));
        assert!(cli.show);
    }

    #[test]
    fn command_names_are_kebab_case() {
        let cli = Cli::try_parse_args(["mortality_charts", "cancer-by-sex"]).unwrap();
        assert_eq!(cli.command.chart(), Some(ChartKind::CancerBySex));
        let cli = Cli::try_parse_args(["mortality_charts", "by-age"]).unwrap();
        assert_eq!(cli.command.chart(), Some(ChartKind::BreastCancerByAge));
        let cli = Cli::try_parse_args(["mortality_charts", "all"]).unwrap();
        assert_eq!(cli.command.chart(), None);
    }

    #[test]
    fn rejects_bad_input() {
        let err = Cli::try_parse_args(["mortality_charts", "pie"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(Cli::try_parse_args(["mortality_charts", "--config"]).is_err());
        assert!(Cli::try_parse_args(["mortality_charts", "all", "trend"]).is_err());
        assert!(Cli::try_parse_args(["mortality_charts", "--verbose"]).is_err());
    }

    #[test]
    fn show_is_rejected_for_summary() {
        let err = Cli::try_parse_args(["mortality_charts", "--show"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        let err = Cli::try_parse_args(["mortality_charts", "summary", "--show"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
