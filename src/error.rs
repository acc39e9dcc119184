use thiserror::Error;

/// Error type in oot.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input is empty, expected a header row")]
    EmptyFile,
    #[error("an output prefix is required when reading from stdin")]
    MissingOutputPrefix,

    #[error("column '{column}' not found, available columns: {available:?}")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("row {row} out of range for {len} rows")]
    RowOutOfRange { row: usize, len: usize },
    #[error("row {row} has {found} values, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// `row` is `None` when the cutoff itself failed to parse.
    #[error("could not parse '{value}' as a date")]
    DateParse { value: String, row: Option<usize> },
    #[error("date '{value}' in row {row} cannot be compared with cutoff '{cutoff}'")]
    Incomparable {
        value: String,
        cutoff: String,
        row: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
