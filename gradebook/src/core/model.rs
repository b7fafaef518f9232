//! Student and course records.
//!
//! Enrollment lives only on the student side: a course code maps to either a
//! grade or `None` (ungraded). Courses carry no back-references.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Grade recorded against an enrollment. `None` means ungraded.
pub type Grade = Option<i64>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub student_id: String,
    /// Course code -> grade. Codes are not re-checked against the course list.
    #[serde(default)]
    pub courses: BTreeMap<String, Grade>,
}

impl Student {
    pub fn new(name: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            courses: BTreeMap::new(),
        }
    }

    /// Enroll in `code` with no grade.
    ///
    /// Re-enrolling overwrites the existing entry, so a previously assigned
    /// grade is discarded. The discarded grade is returned.
    pub fn enroll(&mut self, code: impl Into<String>) -> Grade {
        self.courses.insert(code.into(), None).flatten()
    }

    /// Set the grade for an enrolled course.
    ///
    /// Returns `false` (and changes nothing) when not enrolled in `code`.
    pub fn assign_grade(&mut self, code: &str, grade: i64) -> bool {
        match self.courses.get_mut(code) {
            Some(slot) => {
                *slot = Some(grade);
                true
            }
            None => false,
        }
    }

    pub fn is_enrolled(&self, code: &str) -> bool {
        self.courses.contains_key(code)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    pub code: String,
}

impl Course {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}
