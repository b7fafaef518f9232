//! The five gradebook actions a front end can invoke.
//!
//! Every mutating action runs `validate -> mutate -> save -> report`. Changes
//! are staged on a copy of the registry and only installed once the document
//! has been written, so a rejected action or a failed save leaves both memory
//! and disk untouched.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::core::error::ActionError;
use crate::core::input::{parse_grade, require_field};
use crate::core::listing::{CourseRow, StudentRow, course_rows, student_rows};
use crate::core::model::{Course, Student};
use crate::core::registry::Registry;
use crate::io::config::OnCorrupt;
use crate::io::store::{StoreError, load_registry, save_registry};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Confirmation returned by a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
}

impl Outcome {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A registry bound to the document it is persisted to.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    data_path: PathBuf,
}

impl Session {
    pub fn new(registry: Registry, data_path: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            data_path: data_path.into(),
        }
    }

    /// Hydrate from `data_path`. A missing document yields an empty gradebook.
    ///
    /// A corrupt document is fatal under [`OnCorrupt::Fail`]; under
    /// [`OnCorrupt::StartEmpty`] it is logged and left on disk until the next
    /// successful save replaces it.
    pub fn open(data_path: impl Into<PathBuf>, on_corrupt: OnCorrupt) -> Result<Self, StoreError> {
        let data_path = data_path.into();
        let registry = match load_registry(&data_path) {
            Ok(registry) => registry,
            Err(err) if err.is_corrupt() && on_corrupt == OnCorrupt::StartEmpty => {
                warn!(path = %data_path.display(), error = %err, "ignoring corrupt gradebook");
                Registry::new()
            }
            Err(err) => return Err(err),
        };
        Ok(Self::new(registry, data_path))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn add_student(&mut self, name: &str, student_id: &str) -> Result<Outcome, SessionError> {
        let name = require_field("name", name)?;
        let student_id = require_field("student id", student_id)?;
        if self.registry.find_student(student_id).is_some() {
            return Err(ActionError::DuplicateStudentId(student_id.to_string()).into());
        }

        let mut next = self.registry.clone();
        next.add_student(Student::new(name, student_id));
        self.commit(next)?;
        info!(student_id, "student added");
        Ok(Outcome::new(format!("Student {name} added.")))
    }

    pub fn add_course(&mut self, name: &str, code: &str) -> Result<Outcome, SessionError> {
        let name = require_field("course name", name)?;
        let code = require_field("course code", code)?;
        if self.registry.find_course(code).is_some() {
            return Err(ActionError::DuplicateCourseCode(code.to_string()).into());
        }

        let mut next = self.registry.clone();
        next.add_course(Course::new(name, code));
        self.commit(next)?;
        info!(code, "course added");
        Ok(Outcome::new(format!("Course {name} added.")))
    }

    /// Enroll a student in an existing course.
    ///
    /// Re-enrolling resets the grade for that course to ungraded.
    pub fn enroll(&mut self, student_id: &str, code: &str) -> Result<Outcome, SessionError> {
        let student_id = require_field("student id", student_id)?;
        let code = require_field("course code", code)?;
        if self.registry.find_student(student_id).is_none() {
            return Err(ActionError::StudentNotFound(student_id.to_string()).into());
        }
        let course_name = match self.registry.find_course(code) {
            Some(course) => course.name.clone(),
            None => return Err(ActionError::CourseNotFound(code.to_string()).into()),
        };

        let mut next = self.registry.clone();
        let student = next
            .find_student_mut(student_id)
            .ok_or_else(|| ActionError::StudentNotFound(student_id.to_string()))?;
        if let Some(previous) = student.enroll(code) {
            warn!(student_id, code, previous, "re-enrollment discarded grade");
        }
        let message = format!("{} enrolled in {course_name}.", student.name);
        self.commit(next)?;
        info!(student_id, code, "student enrolled");
        Ok(Outcome::new(message))
    }

    /// Grade an existing enrollment. The course itself is not re-checked.
    pub fn assign_grade(
        &mut self,
        student_id: &str,
        code: &str,
        grade: &str,
    ) -> Result<Outcome, SessionError> {
        let student_id = require_field("student id", student_id)?;
        let code = require_field("course code", code)?;
        let grade = require_field("grade", grade)?;
        let student = self
            .registry
            .find_student(student_id)
            .ok_or_else(|| ActionError::StudentNotFound(student_id.to_string()))?;
        if !student.is_enrolled(code) {
            return Err(ActionError::NotEnrolled {
                student_id: student_id.to_string(),
                code: code.to_string(),
            }
            .into());
        }
        let grade = parse_grade(grade)?;

        let mut next = self.registry.clone();
        let student = next
            .find_student_mut(student_id)
            .ok_or_else(|| ActionError::StudentNotFound(student_id.to_string()))?;
        student.assign_grade(code, grade);
        let message = format!("Grade {grade} assigned to {}.", student.name);
        self.commit(next)?;
        info!(student_id, code, grade, "grade assigned");
        Ok(Outcome::new(message))
    }

    /// All students with their course/grade pairs, in insertion order.
    pub fn list(&self) -> Vec<StudentRow> {
        student_rows(&self.registry)
    }

    pub fn courses(&self) -> Vec<CourseRow> {
        course_rows(&self.registry)
    }

    fn commit(&mut self, next: Registry) -> Result<(), StoreError> {
        save_registry(&self.data_path, &next)?;
        self.registry = next;
        Ok(())
    }
}
