use std::path::Path;

use tracing::info;

use crate::error::{BayesError, Result};
use crate::header::Header;

/// A row is the ordered list of raw cell values.
pub type Row = Vec<String>;

/// Raw tabular data: the parsed header plus every data row, all with the header's width.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub header: Header,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Builds a dataset from already-read CSV lines. The first non-blank line is the header.
    /// Fields are split on commas; quoting is not supported.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = lines.into_iter().enumerate().filter_map(|(i, line)| {
            let line = line.as_ref();
            if line.trim().is_empty() {
                return None;
            }
            Some((i + 1, line.split(',').map(str::to_string).collect::<Row>()))
        });

        Self::from_records(records)
    }

    /// Reads a CSV file from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_path(path.as_ref())?;

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |pos| pos.line() as usize);
            records.push((line, record.iter().map(str::to_string).collect::<Row>()));
        }

        let dataset = Self::from_records(records)?;
        info!(
            "loaded {} rows from {}",
            dataset.rows.len(),
            path.as_ref().display()
        );

        Ok(dataset)
    }

    fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, Row)>,
    {
        let mut records = records.into_iter();
        let (_, names) = records.next().ok_or(BayesError::EmptyInput)?;
        let header = Header::new(names)?;

        let mut rows = Vec::new();
        for (line, row) in records {
            if row.len() != header.len() {
                return Err(BayesError::RaggedRow {
                    line,
                    expected: header.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        Ok(Dataset { header, rows })
    }

    pub fn class_index(&self) -> usize {
        self.header.class_index()
    }

    pub fn feature_count(&self) -> usize {
        self.header.feature_count()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
