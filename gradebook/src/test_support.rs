//! Test-only helpers: fixture registries and a scratch data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::model::{Course, Student};
use crate::core::registry::Registry;
use crate::io::config::OnCorrupt;
use crate::io::store::{load_registry, save_registry};
use crate::session::Session;

/// Two students and two courses; Ada is graded in C1 and ungraded in C2.
pub fn sample_registry() -> Registry {
    let mut ada = Student::new("Ada", "S1");
    ada.enroll("C1");
    ada.enroll("C2");
    ada.assign_grade("C1", 90);

    let mut registry = Registry::new();
    registry.add_student(ada);
    registry.add_student(Student::new("Grace", "S2"));
    registry.add_course(Course::new("Algorithms", "C1"));
    registry.add_course(Course::new("Compilers", "C2"));
    registry
}

/// Temporary directory holding a gradebook document.
pub struct TestStore {
    dir: TempDir,
    data_path: PathBuf,
}

impl TestStore {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let data_path = dir.path().join("student_data.json");
        Ok(Self { dir, data_path })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn open_session(&self) -> Result<Session> {
        Session::open(&self.data_path, OnCorrupt::Fail).context("open session")
    }

    pub fn load(&self) -> Result<Registry> {
        load_registry(&self.data_path).context("load registry")
    }

    pub fn save(&self, registry: &Registry) -> Result<()> {
        save_registry(&self.data_path, registry).context("save registry")
    }
}
