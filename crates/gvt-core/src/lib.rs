//! Versioning engine for gvt.
//!
//! A store lives in a hidden directory inside the working directory and keeps
//! a linear list of numbered versions. Each version holds full copies of the
//! files that were tracked when it was created, plus a message. This crate
//! provides:
//! - Repository metadata (head and active version ids)
//! - The tracked-file index
//! - Version creation and lookup
//! - History traversal
//! - Checkout of a version back into the working directory
//!
//! # Example
//!
//! ```no_run
//! use gvt_core::{Repository, StoreConfig, VersionId};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut repo = Repository::load("/project/root", StoreConfig::default()).await?;
//! repo.initialize().await?;
//!
//! // Track a file; this creates version 1
//! repo.add(Path::new("notes.txt"), None).await?;
//!
//! // ... edit the file, then record the new content as version 2 ...
//! repo.commit(Path::new("notes.txt"), Some("second draft")).await?;
//!
//! // Bring back the first draft
//! repo.checkout(VersionId::new(1)).await?;
//! # Ok(())
//! # }
//! ```

mod checkout;
mod config;
mod error;
mod history;
mod index;
mod layout;
mod metadata;
mod repo;
mod store;
mod version;

pub use config::{StoreConfig, PROJECT_CONFIG_FILE};
pub use error::{StoreError, StoreResult};
pub use history::{describe_version, History, HistoryEntry};
pub use index::TrackedIndex;
pub use layout::StoreLayout;
pub use metadata::RepoMetadata;
pub use repo::{AddOutcome, CommitOutcome, DetachOutcome, Repository};
pub use store::VersionStore;
pub use version::{Version, VersionId, NO_MESSAGE};
