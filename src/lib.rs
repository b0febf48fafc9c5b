//! # CheckMyGrade
//!
//! A flat-file academic records store with:
//! - One CSV table per entity (students, courses, professors, logins)
//! - Dedup-on-save inserts keyed by email / course id
//! - Whole-table atomic rewrites on every mutation
//! - Sorting, per-course statistics and grouped grade reports
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         GradeBook                           │
//! │                  (Config → table handles)                   │
//! └──────┬──────────────┬───────────────┬──────────────┬────────┘
//!        │              │               │              │
//!        ▼              ▼               ▼              ▼
//!  ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐
//!  │ Students  │  │  Courses  │  │ Professors │  │  Logins   │
//!  │ sort/stats│  │           │  │   rank     │  │  argon2   │
//!  └─────┬─────┘  └─────┬─────┘  └─────┬──────┘  └─────┬─────┘
//!        │              │              │               │
//!        └──────┬───────┴──────┬───────┘               │
//!               │              ▼                       │
//!               │      ┌───────────────┐               │
//!               │      │ ReportEngine  │               │
//!               │      └───────────────┘               │
//!               ▼                                      ▼
//!        ┌─────────────────────────────────────────────────┐
//!        │            Table<R> / TableStore                │
//!        │     (read all → mutate → atomic rewrite)        │
//!        └─────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod records;
pub mod stats;
pub mod report;
pub mod security;
pub mod gradebook;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{GradeError, Result};
pub use config::Config;
pub use gradebook::GradeBook;
pub use records::{Course, Credential, Professor, Role, Student, StudentUpdate};
pub use table::SortOrder;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of CheckMyGrade
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
