//! Named rejection reasons for gradebook actions.

use thiserror::Error;

/// Why an action was rejected. Raised before any state is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("student id {0:?} already exists")]
    DuplicateStudentId(String),
    #[error("course code {0:?} already exists")]
    DuplicateCourseCode(String),
    #[error("student {0:?} not found")]
    StudentNotFound(String),
    #[error("course {0:?} not found")]
    CourseNotFound(String),
    #[error("student {student_id:?} is not enrolled in {code:?}")]
    NotEnrolled { student_id: String, code: String },
    #[error("grade must be a whole number, got {0:?}")]
    InvalidGradeFormat(String),
}
