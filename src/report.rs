//! Report Engine
//!
//! Joins students against the course and professor tables and groups the
//! result three ways: by course name, by professor name, and by student.
//!
//! ## Responsibilities
//! - Build `course_id -> course_name` and `email -> name` lookups once per report
//! - Resolve dangling references to `Unknown Course` / `Unknown Professor`
//! - Render the grouped report for operators
//! - Persist the reported rows as a table file

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::records::{CourseTable, ProfessorTable, Student, StudentTable};
use crate::table::{Record, TableStore};

/// Group for students whose course id has no course row
pub const UNKNOWN_COURSE: &str = "Unknown Course";

/// Group for students whose professor email has no professor row
pub const UNKNOWN_PROFESSOR: &str = "Unknown Professor";

/// Header of the persisted report table
pub const REPORT_HEADER: &[&str] = &["First Name", "Last Name", "Course", "Grade", "Marks"];

/// One named group of formatted student summaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    pub key: String,
    pub entries: Vec<String>,
}

/// One row of the persisted report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub first_name: String,
    pub last_name: String,
    pub course: String,
    pub grade: String,
    pub marks: u32,
}

/// Groups in first-appearance order
#[derive(Default)]
struct Grouper {
    groups: Vec<ReportGroup>,
    index: HashMap<String, usize>,
}

impl Grouper {
    fn push(&mut self, key: &str, entry: String) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.groups.push(ReportGroup {
                    key: key.to_string(),
                    entries: Vec::new(),
                });
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].entries.push(entry);
    }

    fn finish(self) -> Vec<ReportGroup> {
        self.groups
    }
}

/// Course-, professor- and student-wise views over the first `limit` students
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GradeReport {
    pub limit: usize,
    pub course_wise: Vec<ReportGroup>,
    pub professor_wise: Vec<ReportGroup>,
    pub student_wise: Vec<ReportGroup>,
    pub rows: Vec<ReportRow>,
}

impl GradeReport {
    /// Group `students` (already in file order) using the given lookups
    ///
    /// Only the first `limit` students are considered.
    pub fn build(
        students: &[Student],
        course_names: &HashMap<String, String>,
        professor_names: &HashMap<String, String>,
        limit: usize,
    ) -> Self {
        let mut by_course = Grouper::default();
        let mut by_professor = Grouper::default();
        let mut by_student = Grouper::default();
        let mut rows = Vec::new();

        for student in students.iter().take(limit) {
            let course = course_names
                .get(&student.course_id)
                .map(String::as_str)
                .unwrap_or(UNKNOWN_COURSE);
            let professor = professor_names
                .get(&student.professor_email)
                .map(String::as_str)
                .unwrap_or(UNKNOWN_PROFESSOR);

            let summary = format!("{}: {} ({})", student.full_name(), student.grade, student.marks);
            by_course.push(course, summary.clone());
            by_professor.push(professor, summary);
            by_student.push(
                &student.email,
                format!(
                    "{}: {} ({}, {})",
                    student.full_name(),
                    student.course_id,
                    student.grade,
                    student.marks
                ),
            );

            rows.push(ReportRow {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                course: course.to_string(),
                grade: student.grade.clone(),
                marks: student.marks,
            });
        }

        Self {
            limit,
            course_wise: by_course.finish(),
            professor_wise: by_professor.finish(),
            student_wise: by_student.finish(),
            rows,
        }
    }

    /// True when no student contributed to the report
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, limit: usize, groups: &[ReportGroup]) -> fmt::Result {
    writeln!(f, "\n--- {}-Wise Report (First {} Records) ---", title, limit)?;
    for group in groups {
        writeln!(f, "{}: {}", group.key, group.entries.join(", "))?;
    }
    Ok(())
}

impl fmt::Display for GradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No student records available to generate reports.");
        }
        write_section(f, "Course", self.limit, &self.course_wise)?;
        write_section(f, "Professor", self.limit, &self.professor_wise)?;
        write_section(f, "Student", self.limit, &self.student_wise)
    }
}

/// Builds grade reports from the three entity tables
#[derive(Debug, Clone)]
pub struct ReportEngine {
    students: StudentTable,
    courses: CourseTable,
    professors: ProfessorTable,
}

impl ReportEngine {
    pub fn new(students: StudentTable, courses: CourseTable, professors: ProfessorTable) -> Self {
        Self {
            students,
            courses,
            professors,
        }
    }

    /// Report over the first `limit` student rows in file order
    ///
    /// A header-only or missing student table yields an empty report.
    pub fn generate(&self, limit: usize) -> Result<GradeReport> {
        let students = self
            .students
            .table()
            .rows()?
            .iter()
            .take(limit)
            .map(|row| Student::from_row(row))
            .collect::<Result<Vec<_>>>()?;

        if students.is_empty() {
            debug!("no student rows, empty report");
            return Ok(GradeReport {
                limit,
                ..GradeReport::default()
            });
        }

        let course_names = self.courses.name_map()?;
        let professor_names = self.professors.name_map()?;

        Ok(GradeReport::build(&students, &course_names, &professor_names, limit))
    }

    /// Write the report's rows as a table with `REPORT_HEADER`
    pub fn persist(&self, report: &GradeReport, path: &Path) -> Result<()> {
        TableStore::write_serialized(path, REPORT_HEADER, &report.rows)?;
        info!(path = %path.display(), rows = report.rows.len(), "grade report written");
        Ok(())
    }
}
