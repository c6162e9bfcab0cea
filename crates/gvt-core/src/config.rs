//! Store configuration.
//!
//! Configuration comes from an optional `gvt.json` file in the working
//! directory. Every field has a default, so a missing file or a partial file
//! is fine:
//!
//! ```json
//! { "store_dir": ".gvt", "init_message": "store initialized" }
//! ```

use crate::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use tokio::fs;
use tracing::debug;

/// Name of the project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "gvt.json";

/// Configuration for a version store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the hidden store directory inside the working directory.
    pub store_dir: String,

    /// Message of version 0.
    pub init_message: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_dir: ".gvt".to_string(),
            init_message: "store initialized".to_string(),
        }
    }
}

impl StoreConfig {
    /// Load the project configuration from `work_dir`, falling back to
    /// defaults when no config file exists.
    pub async fn load(work_dir: &Path) -> StoreResult<Self> {
        let path = work_dir.join(PROJECT_CONFIG_FILE);
        let config = match fs::read_to_string(&path).await {
            Ok(content) => {
                debug!(path = %path.display(), "Loading project config");
                serde_json::from_str::<StoreConfig>(&content)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(StoreError::read(&path, e)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the store directory name.
    pub fn with_store_dir(mut self, store_dir: impl Into<String>) -> Self {
        self.store_dir = store_dir.into();
        self
    }

    /// Check that `store_dir` is a single plain directory name.
    pub fn validate(&self) -> StoreResult<()> {
        let mut components = Path::new(&self.store_dir).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(StoreError::InvalidPath(format!(
                "store directory must be a plain directory name: {:?}",
                self.store_dir
            ))),
        }
    }
}
