//! Student records
//!
//! CRUD, sorting and per-course statistics over the student table, keyed by
//! email.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{GradeError, Result};
use crate::stats::CourseStats;
use crate::table::{check_width, Record, Row, Schema, SortOrder, Table};

const EMAIL: usize = 0;
const FIRST_NAME: usize = 1;
const LAST_NAME: usize = 2;
const COURSE_ID: usize = 3;
const PROFESSOR_EMAIL: usize = 4;
const GRADE: usize = 5;
const MARKS: usize = 6;

/// Parse a marks field; anything but plain ASCII digits is rejected
///
/// `str::parse` alone would accept a leading `+`.
pub fn parse_marks(raw: &str) -> Result<u32> {
    let invalid = || {
        GradeError::Validation(format!(
            "marks must be a non-negative integer, got '{}'",
            raw
        ))
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map_err(|_| invalid())
}

/// One row of the student table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub course_id: String,
    pub professor_email: String,
    pub grade: String,
    pub marks: u32,
}

impl Student {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        course_id: impl Into<String>,
        professor_email: impl Into<String>,
        grade: impl Into<String>,
        marks: u32,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            course_id: course_id.into(),
            professor_email: professor_email.into(),
            grade: grade.into(),
            marks,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Student {
    const SCHEMA: Schema = Schema {
        name: "students",
        header: &[
            "email",
            "first_name",
            "last_name",
            "course_id",
            "professor_email",
            "grade",
            "marks",
        ],
    };

    fn from_row(row: &[String]) -> Result<Self> {
        check_width(&Self::SCHEMA, row)?;
        Ok(Self {
            email: row[EMAIL].clone(),
            first_name: row[FIRST_NAME].clone(),
            last_name: row[LAST_NAME].clone(),
            course_id: row[COURSE_ID].clone(),
            professor_email: row[PROFESSOR_EMAIL].clone(),
            grade: row[GRADE].clone(),
            marks: parse_marks(&row[MARKS])?,
        })
    }

    fn to_row(&self) -> Row {
        vec![
            self.email.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.course_id.clone(),
            self.professor_email.clone(),
            self.grade.clone(),
            self.marks.to_string(),
        ]
    }

    fn key(&self) -> &str {
        &self.email
    }
}

/// Field-scoped change to a student; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    pub course_id: Option<String>,
    pub grade: Option<String>,
    pub marks: Option<u32>,
}

impl StudentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn course_id(mut self, course_id: impl Into<String>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }

    pub fn grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn marks(mut self, marks: u32) -> Self {
        self.marks = Some(marks);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.course_id.is_none() && self.grade.is_none() && self.marks.is_none()
    }

    fn apply(&self, row: &mut Row) {
        if let Some(course_id) = &self.course_id {
            row[COURSE_ID] = course_id.clone();
        }
        if let Some(grade) = &self.grade {
            row[GRADE] = grade.clone();
        }
        if let Some(marks) = self.marks {
            row[MARKS] = marks.to_string();
        }
    }
}

/// The student table
#[derive(Debug, Clone)]
pub struct StudentTable {
    table: Table<Student>,
}

impl StudentTable {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            table: Table::open(path)?,
        })
    }

    /// Underlying generic table
    pub fn table(&self) -> &Table<Student> {
        &self.table
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Insert `student` unless the email is already present
    ///
    /// An existing row always wins; the call is then a no-op returning
    /// `false`. `silent` suppresses the log lines.
    pub fn save(&self, student: &Student, silent: bool) -> Result<bool> {
        let inserted = self.table.insert(student)?;

        if !silent {
            if inserted {
                info!(email = %student.email, "student {} added", student.full_name());
            } else {
                warn!(
                    email = %student.email,
                    "student {} already exists, skipping save",
                    student.full_name()
                );
            }
        }

        Ok(inserted)
    }

    /// Student with `email`, if any
    pub fn search(&self, email: &str) -> Result<Option<Student>> {
        self.table.find(email)
    }

    /// Every student in file order
    pub fn all(&self) -> Result<Vec<Student>> {
        self.table.records()
    }

    /// Overwrite the supplied fields on every row matching `email`
    ///
    /// Returns `false` (and leaves the file alone) when no row matched.
    pub fn update(&self, email: &str, changes: &StudentUpdate) -> Result<bool> {
        let matched = self.table.update_rows(email, |row| {
            changes.apply(row);
            Ok(())
        })?;

        if matched > 0 {
            info!(email, "student record updated");
        } else {
            info!(email, "student not found, nothing updated");
        }

        Ok(matched > 0)
    }

    /// Remove the student with `email`; returns whether a row was removed
    pub fn delete(&self, email: &str) -> Result<bool> {
        let removed = self.table.delete_rows(email)?;
        info!(email, removed, "student delete");
        Ok(removed > 0)
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Reorder the table by marks and persist; equal marks keep their order
    pub fn sort_by_marks(&self, order: SortOrder) -> Result<Vec<Student>> {
        self.sort_by(order, |s| s.marks)
    }

    pub fn sort_by_email(&self, order: SortOrder) -> Result<Vec<Student>> {
        self.sort_by(order, |s| s.email.clone())
    }

    /// First name, then last name
    pub fn sort_by_name(&self, order: SortOrder) -> Result<Vec<Student>> {
        self.sort_by(order, |s| (s.first_name.clone(), s.last_name.clone()))
    }

    fn sort_by<K: Ord>(&self, order: SortOrder, key: impl Fn(&Student) -> K) -> Result<Vec<Student>> {
        // Parsing inside the key function validates every row before the rewrite
        let rows = self
            .table
            .sort_rows_by(order, |row| Student::from_row(row).map(|s| key(&s)))?;

        rows.iter().map(|row| Student::from_row(row)).collect()
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Mean/median/mode of marks for one course; `None` when it has no students
    pub fn course_statistics(&self, course_id: &str) -> Result<Option<CourseStats>> {
        let marks: Vec<u32> = self
            .all()?
            .into_iter()
            .filter(|s| s.course_id == course_id)
            .map(|s| s.marks)
            .collect();

        Ok(CourseStats::from_marks(course_id, &marks))
    }

    /// Statistics for every course with at least one student, by course id
    pub fn all_courses_statistics(&self) -> Result<Vec<CourseStats>> {
        let mut by_course: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for student in self.all()? {
            by_course.entry(student.course_id).or_default().push(student.marks);
        }

        Ok(by_course
            .into_iter()
            .filter_map(|(course_id, marks)| CourseStats::from_marks(course_id, &marks))
            .collect())
    }
}
