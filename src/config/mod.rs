pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-birthdays";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "pesel-etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Extract birth dates from files of PESEL numbers")
)]
pub struct CliConfig {
    /// Path to file with PESEL numbers to process
    #[cfg_attr(feature = "cli", arg(required = true, num_args = 1..))]
    pub files: Vec<String>,

    /// strftime format of the birth dates written to the output
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_DATE_FORMAT))]
    pub date_format: String,

    /// Output format
    #[cfg_attr(feature = "cli", arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text))]
    pub format: OutputFormat,

    /// Appended to the input file name to build the output file name
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_OUTPUT_SUFFIX))]
    pub suffix: String,

    /// Print invalid PESEL numbers
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub verbose: bool,

    /// Log memory usage and timing per file
    #[cfg_attr(feature = "cli", arg(long))]
    pub monitor: bool,

    /// Print the batch report as JSON
    #[cfg_attr(feature = "cli", arg(long))]
    pub json: bool,

    /// Emit logs as JSON
    #[cfg_attr(feature = "cli", arg(long))]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn input_files(&self) -> &[String] {
        &self.files
    }

    fn date_format(&self) -> &str {
        &self.date_format
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn output_suffix(&self) -> &str {
        &self.suffix
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_input_files("files", &self.files)?;
        validation::validate_date_format("date_format", &self.date_format)?;
        validation::validate_non_empty_string("suffix", &self.suffix)?;
        Ok(())
    }
}
