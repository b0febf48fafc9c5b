//! Course records

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::table::{check_width, Record, Row, Schema, Table};

const COURSE_NAME: usize = 1;
const DESCRIPTION: usize = 2;

/// One row of the course table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub course_id: String,
    pub course_name: String,
    pub description: String,
}

impl Course {
    pub fn new(
        course_id: impl Into<String>,
        course_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            description: description.into(),
        }
    }
}

impl Record for Course {
    const SCHEMA: Schema = Schema {
        name: "courses",
        header: &["course_id", "course_name", "description"],
    };

    fn from_row(row: &[String]) -> Result<Self> {
        check_width(&Self::SCHEMA, row)?;
        Ok(Self {
            course_id: row[0].clone(),
            course_name: row[COURSE_NAME].clone(),
            description: row[DESCRIPTION].clone(),
        })
    }

    fn to_row(&self) -> Row {
        vec![
            self.course_id.clone(),
            self.course_name.clone(),
            self.description.clone(),
        ]
    }

    fn key(&self) -> &str {
        &self.course_id
    }
}

/// Field-scoped change to a course; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseUpdate {
    pub course_name: Option<String>,
    pub description: Option<String>,
}

/// The course table
#[derive(Debug, Clone)]
pub struct CourseTable {
    table: Table<Course>,
}

impl CourseTable {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            table: Table::open(path)?,
        })
    }

    pub fn table(&self) -> &Table<Course> {
        &self.table
    }

    /// Insert `course` unless its id exists; a collision is a silent no-op
    pub fn add(&self, course: &Course) -> Result<bool> {
        let inserted = self.table.insert(course)?;
        if inserted {
            info!(course_id = %course.course_id, "course added");
        }
        Ok(inserted)
    }

    pub fn find(&self, course_id: &str) -> Result<Option<Course>> {
        self.table.find(course_id)
    }

    pub fn all(&self) -> Result<Vec<Course>> {
        self.table.records()
    }

    /// Overwrite the supplied fields; `false` when the course is absent
    pub fn update(&self, course_id: &str, changes: &CourseUpdate) -> Result<bool> {
        let matched = self.table.update_rows(course_id, |row| {
            if let Some(name) = &changes.course_name {
                row[COURSE_NAME] = name.clone();
            }
            if let Some(description) = &changes.description {
                row[DESCRIPTION] = description.clone();
            }
            Ok(())
        })?;
        Ok(matched > 0)
    }

    pub fn delete(&self, course_id: &str) -> Result<bool> {
        let removed = self.table.delete_rows(course_id)?;
        info!(course_id, removed, "course delete");
        Ok(removed > 0)
    }

    /// `course_id -> course_name` for report lookups
    pub fn name_map(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .table
            .rows()?
            .into_iter()
            .map(|mut row| {
                let name = std::mem::take(&mut row[COURSE_NAME]);
                (std::mem::take(&mut row[0]), name)
            })
            .collect())
    }
}
