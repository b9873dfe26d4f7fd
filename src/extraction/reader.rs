use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};

use super::record::Record;
use crate::config::ColumnMap;
use crate::errors::{PagerStatsError, Result};

/// Streams [`Record`]s for one escalation policy out of a CSV export.
///
/// No header row is skipped. An export header never carries the policy
/// name in the policy column, so the filter drops it like any other
/// foreign row. Fields are read as bytes and decoded lossily, so stray
/// non-UTF-8 bytes in a description do not abort the run. The first error
/// ends the stream.
pub struct RecordReader<R: Read> {
    inner: csv::Reader<R>,
    row: ByteRecord,
    columns: ColumnMap,
    policy_name: String,
    rows_read: u64,
    retained: u64,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R, columns: ColumnMap, policy_name: impl Into<String>) -> Self {
        let inner = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        Self {
            inner,
            row: ByteRecord::new(),
            columns,
            policy_name: policy_name.into(),
            rows_read: 0,
            retained: 0,
            done: false,
        }
    }

    /// Rows read so far, including filtered ones.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Rows that passed the policy filter so far.
    pub fn retained(&self) -> u64 {
        self.retained
    }

    fn field(&self, index: usize) -> &[u8] {
        // Width is checked before any field is read.
        self.row.get(index).unwrap_or_default()
    }

    fn text(&self, index: usize) -> String {
        String::from_utf8_lossy(self.field(index)).into_owned()
    }

    fn map_row(&self) -> Result<Option<Record>> {
        let required = self.columns.required_width();
        if self.row.len() < required {
            return Err(PagerStatsError::MalformedRow {
                row: self.rows_read,
                found: self.row.len(),
                required,
            });
        }

        if self.field(self.columns.policy_name) != self.policy_name.as_bytes() {
            return Ok(None);
        }

        Ok(Some(Record::new(
            self.text(self.columns.id),
            self.text(self.columns.description),
            self.text(self.columns.policy_name),
            self.text(self.columns.created_at),
        )))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.inner.read_byte_record(&mut self.row) {
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                Ok(true) => {
                    self.rows_read += 1;
                    match self.map_row() {
                        Ok(None) => continue,
                        Ok(Some(record)) => {
                            self.retained += 1;
                            return Some(Ok(record));
                        }
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    }
                }
            }
        }
    }
}
