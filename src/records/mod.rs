//! Records Module
//!
//! Typed entity records and the tables that manage them.
//!
//! | Table      | Key             | Columns                                                          |
//! |------------|-----------------|------------------------------------------------------------------|
//! | students   | email           | email, first_name, last_name, course_id, professor_email, grade, marks |
//! | courses    | course_id       | course_id, course_name, description                              |
//! | professors | email           | email, name, rank, course_id                                     |
//! | login      | email           | email, password_hash, role                                       |
//!
//! `course_id` and `professor_email` on a student are soft references:
//! nothing checks them on write, and readers resolve dangling values to a
//! sentinel instead of failing.

mod course;
mod credential;
mod professor;
mod student;

pub use course::{Course, CourseTable, CourseUpdate};
pub use credential::{Credential, LoginTable, Role};
pub use professor::{Professor, ProfessorTable};
pub use student::{parse_marks, Student, StudentTable, StudentUpdate};
