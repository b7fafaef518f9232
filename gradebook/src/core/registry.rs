//! In-memory registry of students and courses.
//!
//! The registry owns both collections in insertion order. It does not enforce
//! uniqueness; callers check `find_*` before adding (see `session`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{Course, Student};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registry {
    #[serde(default)]
    students: Vec<Student>,
    #[serde(default)]
    courses: Vec<Course>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a student. Duplicate ids are the caller's responsibility.
    pub fn add_student(&mut self, student: Student) {
        self.students.push(student);
    }

    /// Append a course. Duplicate codes are the caller's responsibility.
    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    pub fn find_student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.student_id == student_id)
    }

    pub fn find_student_mut(&mut self, student_id: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.student_id == student_id)
    }

    pub fn find_course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.courses.is_empty()
    }

    /// Serialize the whole registry to its structured form:
    /// `{ students: [{name, student_id, courses}], courses: [{name, code}] }`.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Deserialize `value`, replacing the contents of this registry.
    ///
    /// Decoding happens before anything is installed. On failure the registry
    /// is left empty rather than partially populated.
    pub fn load_value(&mut self, value: Value) -> serde_json::Result<()> {
        self.students.clear();
        self.courses.clear();
        let decoded: Registry = serde_json::from_value(value)?;
        *self = decoded;
        Ok(())
    }
}
