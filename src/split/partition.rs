use log::debug;

use crate::dataset::{Dataset, Value};
use crate::date::{parse_date, CanonicalDate};
use crate::error::{Error, Result};
use crate::split::side::Side;

/// Column used for dates when none is given.
pub const DEFAULT_DATE_COLUMN: &str = "date";

/// The two halves of a dataset split at a cutoff.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    /// Rows dated strictly before the cutoff.
    pub train: Dataset,
    /// Rows dated on or after the cutoff.
    pub test: Dataset,
}

impl Partition {
    pub fn get(&self, side: Side) -> &Dataset {
        match side {
            Side::Train => &self.train,
            Side::Test => &self.test,
        }
    }

    pub fn into_parts(self) -> (Dataset, Dataset) {
        (self.train, self.test)
    }
}

/// Splits datasets at a fixed cutoff.
///
/// The cutoff is parsed once, on construction, so a malformed cutoff is
/// reported before any dataset is touched.
#[derive(Clone, Debug)]
pub struct OutOfTimeSplit {
    cutoff: CanonicalDate,
    /// The cutoff as given, for error messages.
    cutoff_text: String,
    date_column: String,
}

impl OutOfTimeSplit {
    pub fn new(date_cutoff: &str) -> Result<Self> {
        Ok(OutOfTimeSplit {
            cutoff: parse_date(date_cutoff)?,
            cutoff_text: date_cutoff.to_string(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
        })
    }

    #[must_use]
    pub fn date_column(mut self, date_column: &str) -> Self {
        self.date_column = date_column.to_string();
        self
    }

    pub fn cutoff(&self) -> CanonicalDate {
        self.cutoff
    }

    /// Partition `dataset` into rows before the cutoff and rows on or
    /// after it.
    ///
    /// Every date is parsed before any row is copied, so on error nothing
    /// has been produced. Both halves are fresh copies and keep the input's
    /// row order.
    pub fn apply(&self, dataset: &Dataset) -> Result<Partition> {
        let index = dataset.column_index(&self.date_column)?;
        let sides = dataset
            .rows()
            .iter()
            .enumerate()
            .map(|(row, values)| self.side_of(row, &values[index]))
            .collect::<Result<Vec<Side>>>()?;

        let mut train = dataset.empty_like();
        let mut test = dataset.empty_like();
        for (values, side) in dataset.rows().iter().zip(sides) {
            match side {
                Side::Train => train.push_row(values.clone())?,
                Side::Test => test.push_row(values.clone())?,
            }
        }
        debug!(
            "split {} rows at {}: {} train, {} test",
            dataset.len(),
            self.cutoff,
            train.len(),
            test.len()
        );
        Ok(Partition { train, test })
    }

    fn side_of(&self, row: usize, value: &Value) -> Result<Side> {
        let date = match value {
            Value::Date(date) => *date,
            Value::Text(text) => parse_date(text).map_err(|_| Error::DateParse {
                value: text.clone(),
                row: Some(row),
            })?,
            other => {
                return Err(Error::DateParse {
                    value: other.to_string(),
                    row: Some(row),
                })
            }
        };
        Side::of(&date, &self.cutoff).ok_or_else(|| Error::Incomparable {
            value: date.to_string(),
            cutoff: self.cutoff_text.clone(),
            row,
        })
    }
}

/// Split `dataset` into `(train, test)` at `date_cutoff`, reading dates from
/// `date_column`.
///
/// Rows dated strictly before the cutoff go to train; rows on or after it go
/// to test. Pass [`DEFAULT_DATE_COLUMN`] for the usual `date` column.
pub fn split(dataset: &Dataset, date_cutoff: &str, date_column: &str) -> Result<(Dataset, Dataset)> {
    let partition = OutOfTimeSplit::new(date_cutoff)?
        .date_column(date_column)
        .apply(dataset)?;
    Ok(partition.into_parts())
}
