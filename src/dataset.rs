use std::fmt;

use crate::date::CanonicalDate;
use crate::error::{Error, Result};

/// A single cell of a [`Dataset`].
///
/// Floats compare with [`f64::total_cmp`], so a `NaN` cell equals itself
/// and `0.0` differs from `-0.0`.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Date(CanonicalDate),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b).is_eq(),
            (Value::Date(a), Value::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Date(d) => write!(f, "{d}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<CanonicalDate> for Value {
    fn from(value: CanonicalDate) -> Self {
        Value::Date(value)
    }
}

/// An ordered table of rows with named columns.
///
/// Each row holds exactly one value per column, in column order. Cloning a
/// dataset copies every row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create an empty dataset with the given column names.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if names.contains(&column) {
                return Err(Error::DuplicateColumn(column));
            }
            names.push(column);
        }
        Ok(Dataset {
            columns: names,
            rows: Vec::new(),
        })
    }

    /// An empty dataset with the same columns as this one.
    pub fn empty_like(&self) -> Self {
        Dataset {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    /// Append a row. It must have one value per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::RowLength {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style [`push_row`](Dataset::push_row).
    pub fn with_row<I, V>(mut self, row: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_row(row.into_iter().map(Into::into).collect())?;
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Replace one cell. Rows can't change length this way.
    pub fn set(&mut self, row: usize, column: &str, value: Value) -> Result<()> {
        let index = self.column_index(column)?;
        let len = self.rows.len();
        let values = self
            .rows
            .get_mut(row)
            .ok_or(Error::RowOutOfRange { row, len })?;
        values[index] = value;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `column`, or `ColumnNotFound`.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| Error::ColumnNotFound {
                column: column.to_string(),
                available: self.columns.clone(),
            })
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| &r[index])
    }

    /// Iterate over one column's values in row order.
    pub fn column_values<'a>(&'a self, column: &str) -> Result<impl Iterator<Item = &'a Value>> {
        let index = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| &row[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices() -> Dataset {
        Dataset::new(["date", "price"])
            .unwrap()
            .with_row(["2020-01-01", "1.0"])
            .unwrap()
            .with_row(["2020-01-02", "2.0"])
            .unwrap()
    }

    #[test]
    fn rejects_duplicate_columns() {
        match Dataset::new(["date", "price", "date"]) {
            Err(Error::DuplicateColumn(c)) => assert_eq!(c, "date"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_short_rows() {
        let mut ds = prices();
        match ds.push_row(vec![Value::from("2020-01-03")]) {
            Err(Error::RowLength {
                row,
                expected,
                found,
            }) => assert_eq!((row, expected, found), (2, 2, 1)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn looks_up_cells_by_name() {
        let ds = prices();
        assert_eq!(ds.get(1, "price"), Some(&Value::from("2.0")));
        assert_eq!(ds.get(2, "price"), None);
        assert_eq!(ds.get(0, "volume"), None);
        let dates: Vec<String> = ds
            .column_values("date")
            .unwrap()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(dates, vec!["2020-01-01", "2020-01-02"]);
    }

    #[test]
    fn missing_column_lists_available() {
        match prices().column_index("day") {
            Err(Error::ColumnNotFound { column, available }) => {
                assert_eq!(column, "day");
                assert_eq!(available, vec!["date", "price"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn set_replaces_a_single_cell() {
        let mut ds = prices();
        ds.set(1, "price", Value::Float(2.5)).unwrap();
        assert_eq!(ds.get(1, "price"), Some(&Value::Float(2.5)));
        assert_eq!(ds.rows()[1].len(), 2);
        assert!(matches!(
            ds.set(2, "price", Value::Null),
            Err(Error::RowOutOfRange { row: 2, len: 2 })
        ));
        assert!(matches!(
            ds.set(0, "volume", Value::Null),
            Err(Error::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn nan_cells_equal_their_clone() {
        let mut ds = prices();
        ds.set(0, "price", Value::Float(f64::NAN)).unwrap();
        assert_eq!(ds.clone(), ds);
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn empty_like_keeps_columns() {
        let empty = prices().empty_like();
        assert!(empty.is_empty());
        assert_eq!(empty.columns(), &["date", "price"]);
    }
}
