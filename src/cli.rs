use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(
    name = "oot",
    version,
    about = "Split time-series data into train and test sets at a date cutoff"
)]
pub struct Opt {
    #[clap(
        short = 'v',
        parse(from_occurrences),
        global = true,
        help = "Set the level of verbosity"
    )]
    pub verbose: u64,

    #[clap(subcommand)]
    pub cmd: Command,
}

impl Opt {
    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(
        name = "split",
        about = "Split a CSV file into train rows before the cutoff and test rows on or after it"
    )]
    Split(Split),
}

#[derive(Debug, Args)]
pub struct Split {
    #[clap(
        short = 'c',
        long = "cutoff",
        help = "First date of the test period, e.g. 2021-01-01 or 2021-01-01T09:30:00Z"
    )]
    pub cutoff: String,

    #[clap(
        short = 'd',
        long = "date-column",
        default_value = "date",
        help = "Name of the column holding each row's date"
    )]
    pub date_column: String,

    #[clap(
        parse(from_os_str),
        requires_if("-", "output-prefix"),
        help = "CSV data to split, gzip compressed if it ends in .gz. If '-', read from stdin"
    )]
    pub input: PathBuf,

    #[clap(
        short = 'o',
        long = "output-prefix",
        parse(from_os_str),
        help = "Output filename prefix. Defaults to the input path"
    )]
    pub output_prefix: Option<PathBuf>,

    #[clap(short = 'z', long = "gzip", help = "Gzip compress output files")]
    pub gzip: bool,

    #[clap(
        long = "delimiter",
        default_value = ",",
        parse(try_from_str = parse_delimiter),
        help = "Field delimiter for input and output"
    )]
    pub delimiter: u8,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(format!("delimiter must be a single byte, got '{value}'")),
    }
}
