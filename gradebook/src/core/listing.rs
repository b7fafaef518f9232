//! Flat rows for displaying the registry.

use serde::Serialize;

use super::model::{Grade, Student};
use super::registry::Registry;

/// Placeholder shown for an enrollment without a grade.
pub const UNGRADED: &str = "ungraded";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRow {
    pub student_id: String,
    pub name: String,
    /// `"C1: 90, C2: ungraded"`; empty when not enrolled anywhere.
    pub courses: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRow {
    pub code: String,
    pub name: String,
}

/// One row per student, in the order they were added.
pub fn student_rows(registry: &Registry) -> Vec<StudentRow> {
    registry
        .students()
        .iter()
        .map(|student| StudentRow {
            student_id: student.student_id.clone(),
            name: student.name.clone(),
            courses: render_courses(student),
        })
        .collect()
}

pub fn course_rows(registry: &Registry) -> Vec<CourseRow> {
    registry
        .courses()
        .iter()
        .map(|course| CourseRow {
            code: course.code.clone(),
            name: course.name.clone(),
        })
        .collect()
}

fn render_courses(student: &Student) -> String {
    student
        .courses
        .iter()
        .map(|(code, grade)| format!("{}: {}", code, render_grade(*grade)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_grade(grade: Grade) -> String {
    match grade {
        Some(value) => value.to_string(),
        None => UNGRADED.to_string(),
    }
}
