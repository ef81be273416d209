//! Line-delimited JSON dataset files.
//!
//! Writing is strict and overwrites the destination. Reading is tolerant:
//! a line that does not parse is surfaced as a recoverable
//! [`DatasetError::MalformedLine`] and the following lines are still read.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::DatasetRecord;
use crate::error::{DatasetError, Result};

/// Serialize records to `writer`, one JSON object per line.
pub fn write_records<'a, W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a DatasetRecord>,
{
    let mut writer = BufWriter::new(writer);
    let mut count = 0;
    for record in records {
        writeln!(writer, "{}", serde_json::to_string(record)?)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Write a dataset to `path`, replacing any existing file.
pub fn write_dataset(path: impl AsRef<Path>, records: &[DatasetRecord]) -> Result<usize> {
    let file = File::create(path.as_ref())?;
    let count = write_records(file, records)?;
    log::debug!("Wrote {} records to {}", count, path.as_ref().display());
    Ok(count)
}

/// A record together with the physical line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedRecord {
    pub line: usize,
    pub record: DatasetRecord,
}

/// Reader over a dataset file.
///
/// Each call to [`DatasetReader::records`] reopens the file, so the
/// sequence can be restarted.
#[derive(Debug, Clone)]
pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    /// Open a reader, failing if the dataset file does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(DatasetError::DatasetNotFound(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily iterate the records in file order
    pub fn records(&self) -> Result<Records<BufReader<File>>> {
        let file = File::open(&self.path)?;
        Ok(Records::new(BufReader::new(file)))
    }
}

/// Iterator over parsed dataset lines.
///
/// Blank lines are skipped silently. Lines that are not valid UTF-8 or not a
/// valid record yield `Err(DatasetError::MalformedLine)` and reading goes on;
/// only a failed read yields `Err(DatasetError::Io)` and ends the iteration.
pub struct Records<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
            done: false,
        }
    }
}

/// Parse one dataset line into a record
pub fn parse_line(line_number: usize, text: &str) -> Result<DatasetRecord> {
    serde_json::from_str(text).map_err(|e| DatasetError::MalformedLine {
        line: line_number,
        reason: e.to_string(),
    })
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<NumberedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
            self.line += 1;

            let text = match std::str::from_utf8(&self.buf) {
                Ok(text) => text,
                Err(e) => {
                    return Some(Err(DatasetError::MalformedLine {
                        line: self.line,
                        reason: format!("invalid UTF-8: {}", e),
                    }));
                }
            };
            if text.trim().is_empty() {
                continue;
            }
            return Some(parse_line(self.line, text).map(|record| NumberedRecord {
                line: self.line,
                record,
            }));
        }
    }
}
