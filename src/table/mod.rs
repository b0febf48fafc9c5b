//! Table Module
//!
//! Flat-file tables: one CSV file per entity, header row first.
//!
//! ## Responsibilities
//! - Create table files with their header on first use
//! - Read whole tables, validating field counts against the schema
//! - Rewrite whole tables atomically (temp file + rename)
//! - Append single rows for dedup-checked inserts
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Header    email,first_name,last_name,...     │  row 0
//! ├──────────────────────────────────────────────┤
//! │ Record    a@uni.edu,Ada,Lovelace,...         │  row 1
//! │ Record    b@uni.edu,Alan,Turing,...          │  row 2
//! │ ...                                          │
//! └──────────────────────────────────────────────┘
//! ```
//! Fields are UTF-8 text, comma separated, quoted only when they contain a
//! delimiter, quote or newline. Records end with `\n`.
//!
//! ## Mutation Model
//! Every mutation is read-full-table → change in memory → write-full-table.
//! There is no locking: a second writer racing the first can lose updates.
//! The atomic rename only guarantees readers never observe a torn file.

mod store;
mod handle;

pub use store::TableStore;
pub use handle::{Table, TableData};

use crate::error::Result;

/// A single table row, fields in header order
pub type Row = Vec<String>;

/// Column layout of a table. The key is always column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Table name used in log lines and errors
    pub name: &'static str,

    /// Column names, written verbatim as the header row
    pub header: &'static [&'static str],
}

impl Schema {
    /// Index of the key column
    pub const KEY_COLUMN: usize = 0;

    /// Number of fields every row must carry
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// The header as an owned row
    pub fn header_row(&self) -> Row {
        self.header.iter().map(|c| c.to_string()).collect()
    }

    /// Position of a named column
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|c| *c == name)
    }
}

/// A typed view over one table row
pub trait Record: Sized {
    /// Layout of the backing table
    const SCHEMA: Schema;

    /// Parse a row, validating width and typed fields
    fn from_row(row: &[String]) -> Result<Self>;

    /// Render to a row in header order
    fn to_row(&self) -> Row;

    /// Value of the key column
    fn key(&self) -> &str;
}

/// Direction for table sorts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// Fail with a validation error unless `row` has exactly `schema.width()` fields
pub(crate) fn check_width(schema: &Schema, row: &[String]) -> Result<()> {
    if row.len() != schema.width() {
        return Err(crate::GradeError::Validation(format!(
            "{} row needs {} fields, got {}",
            schema.name,
            schema.width(),
            row.len()
        )));
    }
    Ok(())
}
