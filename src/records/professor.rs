//! Professor records

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::table::{check_width, Record, Row, Schema, Table};

const NAME: usize = 1;
const RANK: usize = 2;
const COURSE_ID: usize = 3;

/// One row of the professor table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Professor {
    pub email: String,
    pub name: String,
    pub rank: String,
    pub course_id: String,
}

impl Professor {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        rank: impl Into<String>,
        course_id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            rank: rank.into(),
            course_id: course_id.into(),
        }
    }
}

impl Record for Professor {
    const SCHEMA: Schema = Schema {
        name: "professors",
        header: &["email", "name", "rank", "course_id"],
    };

    fn from_row(row: &[String]) -> Result<Self> {
        check_width(&Self::SCHEMA, row)?;
        Ok(Self {
            email: row[0].clone(),
            name: row[NAME].clone(),
            rank: row[RANK].clone(),
            course_id: row[COURSE_ID].clone(),
        })
    }

    fn to_row(&self) -> Row {
        vec![
            self.email.clone(),
            self.name.clone(),
            self.rank.clone(),
            self.course_id.clone(),
        ]
    }

    fn key(&self) -> &str {
        &self.email
    }
}

/// The professor table
#[derive(Debug, Clone)]
pub struct ProfessorTable {
    table: Table<Professor>,
}

impl ProfessorTable {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            table: Table::open(path)?,
        })
    }

    pub fn table(&self) -> &Table<Professor> {
        &self.table
    }

    /// Insert `professor` unless the email exists; a collision is a silent no-op
    pub fn add(&self, professor: &Professor) -> Result<bool> {
        let inserted = self.table.insert(professor)?;
        if inserted {
            info!(email = %professor.email, "professor added");
        }
        Ok(inserted)
    }

    pub fn find(&self, email: &str) -> Result<Option<Professor>> {
        self.table.find(email)
    }

    pub fn all(&self) -> Result<Vec<Professor>> {
        self.table.records()
    }

    /// Set the rank on every row keyed by `email`
    ///
    /// The table should hold at most one such row, but a duplicated email is
    /// tolerated and every copy is updated. Returns the number of rows changed.
    pub fn modify_rank(&self, email: &str, rank: &str) -> Result<usize> {
        let changed = self.table.update_rows(email, |row| {
            row[RANK] = rank.to_string();
            Ok(())
        })?;

        if changed > 1 {
            warn!(email, changed, "professor email is not unique");
        }
        Ok(changed)
    }

    pub fn delete(&self, email: &str) -> Result<bool> {
        let removed = self.table.delete_rows(email)?;
        info!(email, removed, "professor delete");
        Ok(removed > 0)
    }

    /// `email -> name` for report lookups
    pub fn name_map(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .table
            .rows()?
            .into_iter()
            .map(|mut row| {
                let name = std::mem::take(&mut row[NAME]);
                (std::mem::take(&mut row[0]), name)
            })
            .collect())
    }
}
