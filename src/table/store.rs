//! Table Store
//!
//! Raw file access for table files. Knows nothing about schemas beyond the
//! header it is asked to initialize with.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

use super::Row;

/// Stateless reader/writer for CSV-shaped table files
pub struct TableStore;

impl TableStore {
    /// Create the file with a single header row if it is absent or empty
    ///
    /// Never touches a file that already has content. Returns whether the
    /// header was written.
    pub fn initialize(path: &Path, header: &[&str]) -> Result<bool> {
        let needs_header = match fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if !needs_header {
            return Ok(false);
        }

        let header: Row = header.iter().map(|c| c.to_string()).collect();
        Self::write_all(path, &[header])?;

        debug!(path = %path.display(), "initialized table file");
        Ok(true)
    }

    /// Read every row, header included, in file order
    ///
    /// A missing file reads as an empty table.
    pub fn read_all(path: &Path) -> Result<Vec<Row>> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        // Width checks belong to the caller, which knows the schema
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(path = %path.display(), rows = rows.len(), "read table");
        Ok(rows)
    }

    /// Replace the whole file with `rows`
    ///
    /// Rows go to a temp file in the target's directory which is synced and
    /// renamed over the target, so a failed write leaves the old content.
    pub fn write_all(path: &Path, rows: &[Row]) -> Result<()> {
        Self::replace_with(path, |writer| {
            for row in rows {
                writer.write_record(row)?;
            }
            Ok(rows.len())
        })
    }

    /// Atomically replace the file with `header` followed by serialized records
    pub fn write_serialized<S: Serialize>(path: &Path, header: &[&str], records: &[S]) -> Result<()> {
        Self::replace_with(path, |writer| {
            writer.write_record(header)?;
            for record in records {
                writer.serialize(record)?;
            }
            Ok(records.len() + 1)
        })
    }

    fn replace_with<F>(path: &Path, fill: F) -> Result<()>
    where
        F: FnOnce(&mut csv::Writer<&mut File>) -> Result<usize>,
    {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;

        let rows = {
            let mut writer = Self::writer_builder().from_writer(tmp.as_file_mut());
            let rows = fill(&mut writer)?;
            writer.flush()?;
            rows
        };

        // Temp files are created 0600; keep whatever the table had before
        if let Ok(meta) = fs::metadata(path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }

        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        debug!(path = %path.display(), rows, "rewrote table");
        Ok(())
    }

    /// Append one row without rewriting the file
    ///
    /// A file whose last record lacks a terminator gets one first, so the new
    /// row never lands on the end of an existing line.
    pub fn append_row(path: &Path, row: &[String]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        if !Self::ends_with_terminator(&mut file)? {
            file.write_all(b"\n")?;
            debug!(path = %path.display(), "terminated unterminated last record");
        }

        let mut writer = Self::writer_builder().from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;

        debug!(path = %path.display(), "appended row");
        Ok(())
    }

    fn ends_with_terminator(file: &mut File) -> Result<bool> {
        if file.metadata()?.len() == 0 {
            return Ok(true);
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        Ok(matches!(last[0], b'\n' | b'\r'))
    }

    fn writer_builder() -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder.has_headers(false).terminator(csv::Terminator::Any(b'\n'));
        builder
    }
}
