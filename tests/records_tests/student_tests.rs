//! Tests for StudentTable
//!
//! These tests verify:
//! - Dedup-on-save (first writer wins)
//! - Search / field-scoped update / delete
//! - Stable sorts by marks, email and name
//! - Per-course statistics and empty-table tolerance
//! - Marks validation

use std::fs;

use checkmygrade::records::{parse_marks, StudentTable};
use checkmygrade::{GradeError, SortOrder, Student, StudentUpdate};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_table() -> (TempDir, StudentTable) {
    let temp_dir = TempDir::new().unwrap();
    let table = StudentTable::open(temp_dir.path().join("students.csv")).unwrap();
    (temp_dir, table)
}

fn student(email: &str, first: &str, course: &str, marks: u32) -> Student {
    Student::new(email, first, "Tester", course, "prof@uni.edu", "B", marks)
}

fn emails(students: &[Student]) -> Vec<&str> {
    students.iter().map(|s| s.email.as_str()).collect()
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_and_search() {
    let (_temp, table) = setup_temp_table();
    let s = Student::new(
        "test.student@example.com",
        "Test",
        "Student",
        "DATA200",
        "prof@example.com",
        "B",
        85,
    );

    assert!(table.save(&s, true).unwrap());

    let found = table.search("test.student@example.com").unwrap();
    assert_eq!(found, Some(s));
}

#[test]
fn test_save_duplicate_keeps_first() {
    let (_temp, table) = setup_temp_table();

    assert!(table.save(&student("a@uni.edu", "Ann", "C1", 70), true).unwrap());
    assert!(!table.save(&student("a@uni.edu", "Changed", "C2", 99), true).unwrap());
    assert!(!table.save(&student("a@uni.edu", "Again", "C3", 10), false).unwrap());

    let all = table.all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].first_name, "Ann");
    assert_eq!(all[0].marks, 70);
}

#[test]
fn test_save_onto_hand_edited_file_without_final_newline() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.csv");
    fs::write(
        &path,
        "email,first_name,last_name,course_id,professor_email,grade,marks\n\
         a@uni.edu,Ann,Tester,C1,prof@uni.edu,A,90",
    )
    .unwrap();
    let table = StudentTable::open(&path).unwrap();

    assert!(table.save(&student("b@uni.edu", "Bob", "C1", 80), true).unwrap());

    let all = table.all().unwrap();
    assert_eq!(emails(&all), vec!["a@uni.edu", "b@uni.edu"]);
    assert_eq!(all[0].marks, 90);
    assert_eq!(all[1].marks, 80);
}

#[test]
fn test_search_missing_returns_none() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("a@uni.edu", "Ann", "C1", 70), true).unwrap();

    assert_eq!(table.search("nobody@uni.edu").unwrap(), None);
}

#[test]
fn test_marks_written_as_text() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.csv");
    let table = StudentTable::open(&path).unwrap();

    table.save(&student("a@uni.edu", "Ann", "C1", 85), true).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "email,first_name,last_name,course_id,professor_email,grade,marks\n\
         a@uni.edu,Ann,Tester,C1,prof@uni.edu,B,85\n"
    );
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_marks_only() {
    let (_temp, table) = setup_temp_table();
    let original = student("a@uni.edu", "Ann", "C1", 85);
    table.save(&original, true).unwrap();

    let updated = table
        .update("a@uni.edu", &StudentUpdate::new().marks(90))
        .unwrap();

    assert!(updated);
    let after = table.search("a@uni.edu").unwrap().unwrap();
    assert_eq!(after.marks, 90);
    assert_eq!(
        Student {
            marks: 85,
            ..after
        },
        original
    );
}

#[test]
fn test_update_leaves_other_rows_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.csv");
    fs::write(
        &path,
        "email,first_name,last_name,course_id,professor_email,grade,marks\n\
         a@uni.edu,Ann,Tester,C1,p@uni.edu,B,085\n\
         b@uni.edu,\"Bo, Jr\",Tester,C2,p@uni.edu,A,91\n",
    )
    .unwrap();
    let table = StudentTable::open(&path).unwrap();

    table
        .update("b@uni.edu", &StudentUpdate::new().grade("A+"))
        .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "email,first_name,last_name,course_id,professor_email,grade,marks\n\
         a@uni.edu,Ann,Tester,C1,p@uni.edu,B,085\n\
         b@uni.edu,\"Bo, Jr\",Tester,C2,p@uni.edu,A+,91\n"
    );
}

#[test]
fn test_update_course_and_grade() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("a@uni.edu", "Ann", "C1", 85), true).unwrap();

    let changes = StudentUpdate::new().course_id("C9").grade("A");
    assert!(table.update("a@uni.edu", &changes).unwrap());

    let after = table.search("a@uni.edu").unwrap().unwrap();
    assert_eq!(after.course_id, "C9");
    assert_eq!(after.grade, "A");
    assert_eq!(after.marks, 85);
}

#[test]
fn test_update_missing_student() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("a@uni.edu", "Ann", "C1", 85), true).unwrap();
    let before = fs::read(table.table().path()).unwrap();

    let updated = table
        .update("ghost@uni.edu", &StudentUpdate::new().marks(1))
        .unwrap();

    assert!(!updated);
    assert_eq!(fs::read(table.table().path()).unwrap(), before);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_exactly_one() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("a@uni.edu", "Ann", "C1", 70), true).unwrap();
    table.save(&student("b@uni.edu", "Bob", "C1", 80), true).unwrap();

    assert!(table.delete("a@uni.edu").unwrap());

    assert_eq!(table.search("a@uni.edu").unwrap(), None);
    assert_eq!(emails(&table.all().unwrap()), vec!["b@uni.edu"]);
}

#[test]
fn test_delete_missing_is_ok() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("a@uni.edu", "Ann", "C1", 70), true).unwrap();

    assert!(!table.delete("ghost@uni.edu").unwrap());
    assert_eq!(table.all().unwrap().len(), 1);
}

#[test]
fn test_add_update_delete_cycle() {
    let (_temp, table) = setup_temp_table();
    let s = student("test.student@example.com", "Test", "DATA200", 85);

    table.save(&s, true).unwrap();
    assert!(table.search(&s.email).unwrap().is_some());

    table.update(&s.email, &StudentUpdate::new().marks(90)).unwrap();
    assert_eq!(table.search(&s.email).unwrap().unwrap().marks, 90);

    table.delete(&s.email).unwrap();
    assert!(table.search(&s.email).unwrap().is_none());
}

// =============================================================================
// Sort Tests
// =============================================================================

#[test]
fn test_sort_by_marks_descending_is_stable() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("a@uni.edu", "Ann", "C1", 80), true).unwrap();
    table.save(&student("b@uni.edu", "Bob", "C1", 95), true).unwrap();
    table.save(&student("c@uni.edu", "Cat", "C1", 80), true).unwrap();
    table.save(&student("d@uni.edu", "Dan", "C1", 60), true).unwrap();

    let sorted = table.sort_by_marks(SortOrder::Descending).unwrap();

    assert_eq!(
        emails(&sorted),
        vec!["b@uni.edu", "a@uni.edu", "c@uni.edu", "d@uni.edu"]
    );
    // Persisted in the same order
    assert_eq!(table.all().unwrap(), sorted);
}

#[test]
fn test_sort_by_marks_ascending_is_stable() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("a@uni.edu", "Ann", "C1", 80), true).unwrap();
    table.save(&student("b@uni.edu", "Bob", "C1", 95), true).unwrap();
    table.save(&student("c@uni.edu", "Cat", "C1", 80), true).unwrap();

    let sorted = table.sort_by_marks(SortOrder::Ascending).unwrap();

    assert_eq!(emails(&sorted), vec!["a@uni.edu", "c@uni.edu", "b@uni.edu"]);
    let header = fs::read_to_string(table.table().path()).unwrap();
    assert!(header.starts_with("email,first_name,"));
}

#[test]
fn test_sort_by_email_and_name() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("c@uni.edu", "Ann", "C1", 1), true).unwrap();
    table.save(&student("a@uni.edu", "Cat", "C1", 2), true).unwrap();
    table.save(&student("b@uni.edu", "Bob", "C1", 3), true).unwrap();

    let by_email = table.sort_by_email(SortOrder::Ascending).unwrap();
    assert_eq!(emails(&by_email), vec!["a@uni.edu", "b@uni.edu", "c@uni.edu"]);

    let by_name = table.sort_by_name(SortOrder::Descending).unwrap();
    assert_eq!(emails(&by_name), vec!["a@uni.edu", "b@uni.edu", "c@uni.edu"]);
    let names: Vec<_> = by_name.iter().map(|s| s.first_name.as_str()).collect();
    assert_eq!(names, vec!["Cat", "Bob", "Ann"]);
}

#[test]
fn test_sort_empty_table() {
    let (_temp, table) = setup_temp_table();

    assert!(table.sort_by_marks(SortOrder::Ascending).unwrap().is_empty());
}

#[test]
fn test_sort_fails_on_bad_marks_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.csv");
    let content = "email,first_name,last_name,course_id,professor_email,grade,marks\n\
                   b@uni.edu,Bob,T,C1,p,A,90\n\
                   a@uni.edu,Ann,T,C1,p,A,ninety\n";
    fs::write(&path, content).unwrap();
    let table = StudentTable::open(&path).unwrap();

    let result = table.sort_by_email(SortOrder::Ascending);

    assert!(matches!(result, Err(GradeError::Validation(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

// =============================================================================
// Statistics Tests
// =============================================================================

#[test]
fn test_course_statistics() {
    let (_temp, table) = setup_temp_table();
    for (i, marks) in [70, 80, 80, 90].iter().enumerate() {
        let email = format!("s{}@uni.edu", i);
        table.save(&student(&email, "S", "C101", *marks), true).unwrap();
    }
    table.save(&student("x@uni.edu", "X", "C202", 10), true).unwrap();

    let stats = table.course_statistics("C101").unwrap().unwrap();

    assert_eq!(stats.mean, 80.0);
    assert_eq!(stats.median, 80.0);
    assert_eq!(stats.mode, 80);
    assert_eq!(stats.count, 4);
}

#[test]
fn test_course_statistics_no_data() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("a@uni.edu", "Ann", "C1", 70), true).unwrap();

    assert_eq!(table.course_statistics("NOPE").unwrap(), None);
}

#[test]
fn test_all_courses_statistics() {
    let (_temp, table) = setup_temp_table();
    table.save(&student("a@uni.edu", "A", "MATH", 90), true).unwrap();
    table.save(&student("b@uni.edu", "B", "CS", 60), true).unwrap();
    table.save(&student("c@uni.edu", "C", "CS", 70), true).unwrap();
    table.save(&student("d@uni.edu", "D", "MATH", 50), true).unwrap();

    let all = table.all_courses_statistics().unwrap();

    let ids: Vec<_> = all.iter().map(|s| s.course_id.as_str()).collect();
    assert_eq!(ids, vec!["CS", "MATH"]);
    assert_eq!(all[0].mean, 65.0);
    assert_eq!(all[0].mode, 60);
    assert_eq!(all[1].median, 70.0);
    assert_eq!(all[1].mode, 50);
}

#[test]
fn test_statistics_over_empty_and_missing_table() {
    let (temp, table) = setup_temp_table();

    assert!(table.all_courses_statistics().unwrap().is_empty());

    fs::remove_file(temp.path().join("students.csv")).unwrap();
    assert!(table.all_courses_statistics().unwrap().is_empty());
    assert_eq!(table.course_statistics("C1").unwrap(), None);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_parse_marks() {
    assert_eq!(parse_marks("85").unwrap(), 85);
    assert!(matches!(parse_marks("abc"), Err(GradeError::Validation(_))));
    assert!(matches!(parse_marks("-5"), Err(GradeError::Validation(_))));
    assert!(matches!(parse_marks(""), Err(GradeError::Validation(_))));
    assert!(matches!(parse_marks("85.5"), Err(GradeError::Validation(_))));
    assert!(matches!(parse_marks("+85"), Err(GradeError::Validation(_))));
    assert!(matches!(parse_marks(" 85"), Err(GradeError::Validation(_))));
}

#[test]
fn test_search_row_with_bad_marks_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.csv");
    fs::write(
        &path,
        "email,first_name,last_name,course_id,professor_email,grade,marks\n\
         a@uni.edu,Ann,T,C1,p,A,lots\n",
    )
    .unwrap();
    let table = StudentTable::open(&path).unwrap();

    assert!(matches!(
        table.search("a@uni.edu"),
        Err(GradeError::Validation(_))
    ));
}
