//! Typed table handle
//!
//! `Table<R>` binds a file path to a record schema and implements the
//! read → mutate → rewrite cycle shared by every entity table.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GradeError, Result};

use super::{check_width, Record, Row, Schema, SortOrder, TableStore};

/// Contents of a table split into header and data rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    pub header: Row,
    pub rows: Vec<Row>,
}

impl TableData {
    /// Header followed by data rows, ready for `TableStore::write_all`
    pub fn into_rows(self) -> Vec<Row> {
        let mut all = Vec::with_capacity(self.rows.len() + 1);
        all.push(self.header);
        all.extend(self.rows);
        all
    }
}

/// A file-backed table of `R` records
///
/// Holds no rows between calls; every operation re-reads the file.
#[derive(Debug)]
pub struct Table<R: Record> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Table<R> {
    /// Bind to `path`, writing the header if the file is absent or empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        TableStore::initialize(&path, R::SCHEMA.header)?;
        Ok(Self {
            path,
            _record: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> Schema {
        R::SCHEMA
    }

    // =========================================================================
    // Raw Row Access
    // =========================================================================

    /// Read the table and validate every row's width
    ///
    /// A missing or empty file loads as the schema header with no rows.
    pub fn load(&self) -> Result<TableData> {
        let mut all = TableStore::read_all(&self.path)?.into_iter();
        let schema = self.schema();

        let header = match all.next() {
            Some(header) => header,
            None => {
                return Ok(TableData {
                    header: schema.header_row(),
                    rows: Vec::new(),
                })
            }
        };

        let rows: Vec<Row> = all.collect();
        for (i, row) in std::iter::once(&header).chain(rows.iter()).enumerate() {
            if row.len() != schema.width() {
                return Err(GradeError::MalformedRow {
                    table: schema.name,
                    row: i,
                    expected: schema.width(),
                    found: row.len(),
                });
            }
        }

        Ok(TableData { header, rows })
    }

    /// Data rows in file order
    pub fn rows(&self) -> Result<Vec<Row>> {
        Ok(self.load()?.rows)
    }

    /// First row whose key column equals `key`
    pub fn find_row(&self, key: &str) -> Result<Option<Row>> {
        Ok(self
            .rows()?
            .into_iter()
            .find(|row| row[Schema::KEY_COLUMN] == key))
    }

    /// Append `row` unless a row with the same key exists
    ///
    /// Returns `false` when the key was already present (first writer wins).
    pub fn insert_row(&self, row: Row) -> Result<bool> {
        let schema = self.schema();
        check_width(&schema, &row)?;

        let data = self.load()?;
        if data
            .rows
            .iter()
            .any(|r| r[Schema::KEY_COLUMN] == row[Schema::KEY_COLUMN])
        {
            return Ok(false);
        }

        if std::fs::metadata(&self.path).map(|m| m.len() > 0).unwrap_or(false) {
            TableStore::append_row(&self.path, &row)?;
        } else {
            // File vanished or was truncated since open; restore the header too
            TableStore::write_all(&self.path, &[data.header, row])?;
        }

        Ok(true)
    }

    /// Apply `update` to every row keyed by `key`
    ///
    /// The table is rewritten only when at least one row matched. Returns the
    /// number of rows touched.
    pub fn update_rows<F>(&self, key: &str, mut update: F) -> Result<usize>
    where
        F: FnMut(&mut Row) -> Result<()>,
    {
        let mut data = self.load()?;
        let mut matched = 0;

        for row in data.rows.iter_mut() {
            if row[Schema::KEY_COLUMN] == key {
                update(row)?;
                matched += 1;
            }
        }

        if matched > 0 {
            TableStore::write_all(&self.path, &data.into_rows())?;
        }

        debug!(table = self.schema().name, key, matched, "update");
        Ok(matched)
    }

    /// Remove every row keyed by `key` and rewrite the table
    ///
    /// Rewrites even when nothing matched. Returns the number of rows removed.
    pub fn delete_rows(&self, key: &str) -> Result<usize> {
        let mut data = self.load()?;
        let before = data.rows.len();
        data.rows.retain(|row| row[Schema::KEY_COLUMN] != key);
        let removed = before - data.rows.len();

        TableStore::write_all(&self.path, &data.into_rows())?;

        debug!(table = self.schema().name, key, removed, "delete");
        Ok(removed)
    }

    /// Stable sort of all data rows by a derived key, persisted
    ///
    /// Keys are computed up front so a bad field fails before anything is
    /// written. Rows with equal keys keep their relative order in both
    /// directions. Returns the rows in their new order.
    pub fn sort_rows_by<K, F>(&self, order: SortOrder, key_fn: F) -> Result<Vec<Row>>
    where
        K: Ord,
        F: Fn(&Row) -> Result<K>,
    {
        let data = self.load()?;

        let mut keyed = data
            .rows
            .into_iter()
            .map(|row| -> Result<(K, Row)> { Ok((key_fn(&row)?, row)) })
            .collect::<Result<Vec<(K, Row)>>>()?;

        keyed.sort_by(|(a, _), (b, _)| match order {
            SortOrder::Ascending => a.cmp(b),
            SortOrder::Descending => b.cmp(a),
        });

        let sorted = TableData {
            header: data.header,
            rows: keyed.into_iter().map(|(_, row)| row).collect(),
        };
        TableStore::write_all(&self.path, &sorted.clone().into_rows())?;

        Ok(sorted.rows)
    }

    // =========================================================================
    // Typed Access
    // =========================================================================

    /// Every record in file order
    pub fn records(&self) -> Result<Vec<R>> {
        self.rows()?.iter().map(|row| R::from_row(row)).collect()
    }

    /// Record keyed by `key`, if any
    pub fn find(&self, key: &str) -> Result<Option<R>> {
        self.find_row(key)?.map(|row| R::from_row(&row)).transpose()
    }

    /// Dedup-checked insert of a typed record
    pub fn insert(&self, record: &R) -> Result<bool> {
        self.insert_row(record.to_row())
    }
}
