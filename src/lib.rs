//! Split time-series datasets into train and test sets at a date cutoff.
//!
//! Rows dated strictly before the cutoff form the training set; rows on or
//! after it form the test set, so nothing from the test period leaks into
//! training.
//!
//! ```
//! use oot::{split, Dataset, DEFAULT_DATE_COLUMN};
//!
//! let prices = Dataset::new(["date", "price"])?
//!     .with_row(["2020-01-01", "1.0"])?
//!     .with_row(["2020-06-15", "2.0"])?
//!     .with_row(["2021-01-01", "3.0"])?;
//! let (train, test) = split(&prices, "2021-01-01", DEFAULT_DATE_COLUMN)?;
//! assert_eq!(train.len(), 2);
//! assert_eq!(test.len(), 1);
//! # Ok::<(), oot::Error>(())
//! ```

pub mod cli;
mod dataset;
mod date;
mod error;
mod io;
mod split;

pub use {
    crate::dataset::{Dataset, Value},
    crate::date::{parse_date, CanonicalDate},
    crate::error::{Error, Result},
    crate::io::Compression,
    crate::split::{
        split, OutOfTimeSplit, Partition, Side, Splitter, SplitterBuilder, DEFAULT_DATE_COLUMN,
    },
};
