use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use log::debug;

use super::{ColumnKey, TableError};

/// Number of header rows carrying the column key levels
pub const HEADER_ROWS: usize = 3;

/// Field delimiter for a table file, chosen by extension.
///
/// `.tsv` and `.txt` are tab separated; anything else is comma separated.
pub fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("txt") => b'\t',
        _ => b',',
    }
}

/// One trial's table of samples, addressed by three-level column keys.
#[derive(Debug, Clone)]
pub struct RawTrialTable {
    source: String,
    columns: Vec<ColumnKey>,
    index: HashMap<ColumnKey, usize>,
    rows: Vec<StringRecord>,
}

impl RawTrialTable {
    /// Load a table from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(
            BufReader::new(file),
            delimiter_for(path),
            path.display().to_string(),
        )
    }

    /// Parse a table already held in memory; `name` selects the delimiter
    pub fn from_bytes(bytes: &[u8], name: &str) -> Result<Self, TableError> {
        Self::from_reader(bytes, delimiter_for(Path::new(name)), name.to_string())
    }

    /// Parse a table from a reader
    pub fn from_reader<R: Read>(
        reader: R,
        delimiter: u8,
        source: impl Into<String>,
    ) -> Result<Self, TableError> {
        let source = source.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv_reader.records();
        let mut header = Vec::with_capacity(HEADER_ROWS);
        for _ in 0..HEADER_ROWS {
            match records.next() {
                Some(record) => header.push(record?),
                None => {
                    return Err(TableError::MissingHeader {
                        expected: HEADER_ROWS,
                        found: header.len(),
                    })
                }
            }
        }

        let mut rows = records.collect::<Result<Vec<_>, _>>()?;
        let samples = rows
            .iter()
            .rposition(|row| !is_blank(row))
            .map_or(0, |last| last + 1);
        if samples < rows.len() {
            debug!("{}: dropped {} trailing blank rows", source, rows.len() - samples);
            rows.truncate(samples);
        }
        let columns = build_keys(&header);

        let mut index = HashMap::with_capacity(columns.len());
        for (i, key) in columns.iter().enumerate() {
            if index.contains_key(key) {
                debug!("{}: duplicate column {} at position {} ignored", source, key, i);
                continue;
            }
            index.insert(key.clone(), i);
        }

        debug!(
            "{}: loaded {} columns, {} samples",
            source,
            columns.len(),
            rows.len()
        );

        Ok(Self {
            source,
            columns,
            index,
            rows,
        })
    }

    /// Identity of the file this table came from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Column keys in file order
    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    /// Number of sample rows, trailing all-blank rows excluded
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when `key` labels a column
    pub fn contains(&self, key: &ColumnKey) -> bool {
        self.index.contains_key(key)
    }

    /// Numeric samples of the column labelled `key`, or `None` if absent.
    ///
    /// The result always holds [`row_count`](Self::row_count) values. A blank
    /// or non-numeric cell in any sample row is an error, so a column that
    /// ends early never shortens its own time base.
    pub fn numeric_column(&self, key: &ColumnKey) -> Option<Result<Vec<f64>, TableError>> {
        let col = *self.index.get(key)?;
        Some(self.parse_column(col, key))
    }

    fn parse_column(&self, col: usize, key: &ColumnKey) -> Result<Vec<f64>, TableError> {
        self.rows
            .iter()
            .map(|row| row.get(col).unwrap_or("").trim())
            .enumerate()
            .map(|(i, cell)| {
                cell.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| TableError::InvalidValue {
                        line: i + HEADER_ROWS + 1,
                        column: key.clone(),
                        value: cell.to_string(),
                    })
            })
            .collect()
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Combine the three header rows into one key per column.
fn build_keys(header: &[StringRecord]) -> Vec<ColumnKey> {
    let width = header.iter().map(|r| r.len()).max().unwrap_or(0);
    let label = |level: usize, col: usize| -> String {
        header[level]
            .get(col)
            .unwrap_or("")
            .trim()
            .trim_start_matches('\u{feff}')
            .to_string()
    };

    let mut keys = Vec::with_capacity(width);
    let mut group = String::new();
    for col in 0..width {
        let g = label(0, col);
        if !g.is_empty() {
            group = g;
        }
        keys.push(ColumnKey::new(group.clone(), label(1, col), label(2, col)));
    }
    keys
}
