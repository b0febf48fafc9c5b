//! GradeBook Module
//!
//! Entry point that wires every table to its file under one `Config`.
//!
//! ## Responsibilities
//! - Create the data directory
//! - Initialize each table file with its header (never overwriting content)
//! - Hand out table handles and the report engine

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::records::{CourseTable, LoginTable, ProfessorTable, StudentTable};
use crate::report::{GradeReport, ReportEngine};

/// All tables of one store
///
/// ## Concurrency Model: Single Caller
///
/// Handles keep only a path. Every operation reads the whole file, changes
/// it in memory and writes it back through an atomic rename. Nothing
/// serializes two processes (or two threads) mutating the same table, so
/// concurrent writers can lose updates. Readers never see a torn file.
#[derive(Debug, Clone)]
pub struct GradeBook {
    config: Config,
    students: StudentTable,
    courses: CourseTable,
    professors: ProfessorTable,
    logins: LoginTable,
}

impl GradeBook {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Validate the config
    /// 2. Create the data directory
    /// 3. Write headers into missing or empty table files
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;

        let students = StudentTable::open(config.student_path())?;
        let courses = CourseTable::open(config.course_path())?;
        let professors = ProfessorTable::open(config.professor_path())?;
        let logins = LoginTable::open(config.login_path())?;

        info!(data_dir = %config.data_dir.display(), "grade book opened");

        Ok(Self {
            config,
            students,
            courses,
            professors,
            logins,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default file names under the given data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    pub fn students(&self) -> &StudentTable {
        &self.students
    }

    pub fn courses(&self) -> &CourseTable {
        &self.courses
    }

    pub fn professors(&self) -> &ProfessorTable {
        &self.professors
    }

    pub fn logins(&self) -> &LoginTable {
        &self.logins
    }

    /// A report engine over this store's tables
    pub fn reports(&self) -> ReportEngine {
        ReportEngine::new(
            self.students.clone(),
            self.courses.clone(),
            self.professors.clone(),
        )
    }

    /// Generate a report with `limit` (or the configured default) and write
    /// it to the configured report file
    pub fn write_report(&self, limit: Option<usize>) -> Result<GradeReport> {
        let engine = self.reports();
        let report = engine.generate(limit.unwrap_or(self.config.report_limit))?;
        engine.persist(&report, &self.config.report_path())?;
        Ok(report)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }
}
