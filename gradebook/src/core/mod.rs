//! Pure gradebook logic: records, the registry and input validation.
//!
//! Nothing here touches the filesystem. Persistence lives in [`crate::io`].

pub mod error;
pub mod input;
pub mod listing;
pub mod model;
pub mod registry;
