use std::{
    ffi::OsString,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use compact_str::CompactString;

use crate::record::{CountryRecord, UNKNOWN, columns};

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("table i/o: {0}")]
    Io(#[from] io::Error),
    #[error("table format: {0}")]
    Csv(#[from] csv::Error),
}

/// Header-addressed rows of text cells.
///
/// Every row has exactly one cell per header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountryTable {
    headers: Vec<CompactString>,
    rows: Vec<Vec<CompactString>>,
}

impl CountryTable {
    /// No rows, only the required columns.
    pub fn empty() -> Self {
        Self {
            headers: columns::REQUIRED.into_iter().map(CompactString::const_new).collect(),
            rows: Vec::new(),
        }
    }

    /// The layout written by a scrape run.
    pub fn from_records(records: &[CountryRecord]) -> Self {
        Self {
            headers: columns::WRITTEN.into_iter().map(CompactString::const_new).collect(),
            rows: records
                .iter()
                .map(|r| r.cells().into_iter().map(CompactString::new).collect())
                .collect(),
        }
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(CompactString::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// Renames the legacy name column, then appends every missing required
    /// column filled with [`UNKNOWN`]. Returns the appended column names.
    pub fn repair(&mut self) -> Vec<&'static str> {
        if self.column_index(columns::NAME).is_none()
            && let Some(idx) = self.column_index(columns::LEGACY_NAME)
        {
            self.headers[idx] = CompactString::const_new(columns::NAME);
        }

        let missing = columns::REQUIRED
            .into_iter()
            .filter(|c| self.column_index(c).is_none())
            .collect::<Vec<_>>();

        for &column in &missing {
            self.headers.push(CompactString::const_new(column));
            for row in &mut self.rows {
                row.push(CompactString::const_new(UNKNOWN));
            }
        }

        missing
    }

    /// Writes the whole table, replacing `path` only once every row is out.
    pub fn write_csv(&self, path: &Path) -> Result<(), TableError> {
        let tmp = sibling_tmp(path);

        let mut writer = csv::Writer::from_path(&tmp)?;
        writer.write_record(self.headers.iter().map(CompactString::as_str))?;
        for row in &self.rows {
            writer.write_record(row.iter().map(CompactString::as_str))?;
        }
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn sibling_tmp(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Loads the table at `path`, filling in whatever required column it lacks.
///
/// A missing file is an empty table, never an error.
pub fn load_table(path: &Path) -> Result<CountryTable, TableError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(target: "table", "{} not found, starting with an empty table", path.display());
            return Ok(CountryTable::empty());
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader
        .headers()?
        .iter()
        .map(CompactString::new)
        .collect::<Vec<_>>();
    let width = headers.len();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != width {
            tracing::warn!(target: "table", "row {} has {} cells, expected {width}", i + 1, record.len());
        }
        let mut row = record
            .iter()
            .take(width)
            .map(CompactString::new)
            .collect::<Vec<_>>();
        row.resize(width, CompactString::default());
        rows.push(row);
    }

    let mut table = CountryTable { headers, rows };
    let missing = table.repair();
    if !missing.is_empty() {
        tracing::warn!(target: "table", "missing columns {missing:?}, filled with {UNKNOWN:?}");
    }
    tracing::info!(target: "table", "loaded {} rows from {}", table.len(), path.display());

    Ok(table)
}
