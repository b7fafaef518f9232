//! Student and course record keeping persisted to a single JSON document.
//!
//! - **[`core`]**: records, the in-memory [`core::registry::Registry`] and
//!   input validation. No I/O.
//! - **[`io`]**: the persisted document and `gradebook.toml` config.
//!
//! [`session`] ties the two together into the actions a front end calls:
//! add student, add course, enroll, assign grade and list.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
