//! Configuration for CheckMyGrade
//!
//! Centralized configuration with sensible defaults. Every table path is
//! derived from `data_dir`, so tests point a whole store at a temp directory
//! by changing one field.

use std::path::PathBuf;

use crate::error::{GradeError, Result};

/// Main configuration for a CheckMyGrade store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all table files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── students.csv
    ///     ├── courses.csv
    ///     ├── professors.csv
    ///     ├── login.csv
    ///     └── grade_report.csv   (written by the report engine)
    pub data_dir: PathBuf,

    /// File name of the student table
    pub student_file: String,

    /// File name of the course table
    pub course_file: String,

    /// File name of the professor table
    pub professor_file: String,

    /// File name of the credential table
    pub login_file: String,

    /// File name of the persisted grade report
    pub report_file: String,

    // -------------------------------------------------------------------------
    // Report Configuration
    // -------------------------------------------------------------------------
    /// Max number of student rows included in a grade report
    pub report_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            student_file: "students.csv".to_string(),
            course_file: "courses.csv".to_string(),
            professor_file: "professors.csv".to_string(),
            login_file: "login.csv".to_string(),
            report_file: "grade_report.csv".to_string(),
            report_limit: 10,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn student_path(&self) -> PathBuf {
        self.data_dir.join(&self.student_file)
    }

    pub fn course_path(&self) -> PathBuf {
        self.data_dir.join(&self.course_file)
    }

    pub fn professor_path(&self) -> PathBuf {
        self.data_dir.join(&self.professor_file)
    }

    pub fn login_path(&self) -> PathBuf {
        self.data_dir.join(&self.login_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.data_dir.join(&self.report_file)
    }

    /// Reject configurations that would make two tables share a file
    pub fn validate(&self) -> Result<()> {
        let names = [
            &self.student_file,
            &self.course_file,
            &self.professor_file,
            &self.login_file,
            &self.report_file,
        ];

        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(GradeError::Config("table file name is empty".to_string()));
            }
            if names[i + 1..].contains(name) {
                return Err(GradeError::Config(format!(
                    "file name '{}' is used by more than one table",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all tables)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the student table file name
    pub fn student_file(mut self, name: impl Into<String>) -> Self {
        self.config.student_file = name.into();
        self
    }

    /// Set the course table file name
    pub fn course_file(mut self, name: impl Into<String>) -> Self {
        self.config.course_file = name.into();
        self
    }

    /// Set the professor table file name
    pub fn professor_file(mut self, name: impl Into<String>) -> Self {
        self.config.professor_file = name.into();
        self
    }

    /// Set the credential table file name
    pub fn login_file(mut self, name: impl Into<String>) -> Self {
        self.config.login_file = name.into();
        self
    }

    /// Set the report output file name
    pub fn report_file(mut self, name: impl Into<String>) -> Self {
        self.config.report_file = name.into();
        self
    }

    /// Set the default number of rows per grade report
    pub fn report_limit(mut self, limit: usize) -> Self {
        self.config.report_limit = limit;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
