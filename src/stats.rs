//! Statistics over student marks
//!
//! Pure functions; the student table feeds them marks grouped by course.

use std::collections::BTreeMap;
use std::fmt;

/// Summary of one course's marks
#[derive(Debug, Clone, PartialEq)]
pub struct CourseStats {
    pub course_id: String,
    /// Number of students contributing marks
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Most frequent mark; the smallest one when several tie
    pub mode: u32,
}

impl CourseStats {
    /// Summarize `marks`, or `None` when there are none
    pub fn from_marks(course_id: impl Into<String>, marks: &[u32]) -> Option<Self> {
        Some(Self {
            course_id: course_id.into(),
            count: marks.len(),
            mean: mean(marks)?,
            median: median(marks)?,
            mode: mode(marks)?,
        })
    }
}

impl fmt::Display for CourseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Course {}: Average = {:.2}, Median = {:.2}, Mode = {} ({} students)",
            self.course_id, self.mean, self.median, self.mode, self.count
        )
    }
}

pub fn mean(marks: &[u32]) -> Option<f64> {
    if marks.is_empty() {
        return None;
    }
    let total: u64 = marks.iter().map(|&m| u64::from(m)).sum();
    Some(total as f64 / marks.len() as f64)
}

/// Middle value, or the mean of the two middle values for an even count
pub fn median(marks: &[u32]) -> Option<f64> {
    if marks.is_empty() {
        return None;
    }
    let mut sorted = marks.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(f64::from(sorted[mid]))
    } else {
        Some((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
    }
}

/// Most frequent value; ties go to the smallest value
pub fn mode(marks: &[u32]) -> Option<u32> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for &m in marks {
        *counts.entry(m).or_insert(0) += 1;
    }

    // BTreeMap iterates ascending, so the first maximum is the smallest mark
    let mut best: Option<(u32, usize)> = None;
    for (mark, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((mark, count)),
        }
    }
    best.map(|(mark, _)| mark)
}
