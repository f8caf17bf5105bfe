//! Numeric tables loaded from CSV files

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use crate::error::TableError;

/// A column-named table of numeric rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self { columns, rows }
    }

    /// Parse CSV text with a header row.
    ///
    /// Only numeric columns are kept: a column with any non-empty field that
    /// does not parse as a number is left out. Empty fields become NaN.
    pub fn parse_csv(text: &str) -> Result<Self, TableError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(TableError::Empty);
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            if record.len() != headers.len() {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(TableError::RaggedRow { line });
            }
            records.push(record);
        }

        let numeric: Vec<usize> = (0..headers.len())
            .filter(|&col| {
                let keep = records.iter().all(|record| parse_field(record, col).is_some());
                if !keep {
                    debug!("Dropping non-numeric column {}", &headers[col]);
                }
                keep
            })
            .collect();

        let columns = numeric.iter().map(|&col| headers[col].to_string()).collect();
        let rows = records
            .iter()
            .map(|record| {
                numeric
                    .iter()
                    .map(|&col| parse_field(record, col).unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Read and parse a CSV file
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_csv(&text)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Copy out one column by name
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Gather the named columns into row-major form
    pub fn select(&self, names: &[String]) -> Option<Vec<Vec<f64>>> {
        let indices: Vec<usize> = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Option<_>>()?;
        Some(
            self.rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i]).collect())
                .collect(),
        )
    }

    /// Append a column, replacing any existing column of the same name
    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Self {
        match self.column_index(name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        self
    }
}

/// A field as a number; empty fields read as NaN, text reads as `None`
fn parse_field(record: &StringRecord, col: usize) -> Option<f64> {
    match record.get(col) {
        Some("") | None => Some(f64::NAN),
        Some(field) => field.parse::<f64>().ok(),
    }
}
