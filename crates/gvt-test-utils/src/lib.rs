//! Testing fixtures for gvt.
//!
//! Provides throwaway working directories populated with files, so store
//! operations can be exercised without touching the real filesystem.
//!
//! # Example Usage
//!
//! ```rust
//! use gvt_test_utils::TestProject;
//!
//! let project = TestProject::new()
//!     .with_file("a.txt", "hello")
//!     .with_file("notes/b.txt", "nested")
//!     .build();
//!
//! assert_eq!(project.read_file("a.txt"), "hello");
//! ```

pub mod fixtures;

pub use fixtures::{BuiltTestProject, TestProject};
