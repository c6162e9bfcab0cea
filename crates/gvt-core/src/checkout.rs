//! Restoring a version into the working directory.

use crate::layout::create_dir_all;
use crate::{StoreError, StoreResult, VersionId, VersionStore};
use tokio::fs;
use tracing::{debug, info};

impl VersionStore {
    /// Copy every file captured by a version back into the working directory.
    ///
    /// Existing files are overwritten. Files that the version did not capture
    /// are left alone, so a restore never deletes anything. Returns the names
    /// that were restored.
    pub async fn restore(&self, id: VersionId) -> StoreResult<Vec<String>> {
        if !self.exists(id).await {
            return Err(StoreError::VersionNotFound(id));
        }

        let files_dir = self.layout().files_dir(id);
        let files = self.list_files(id).await?;

        for name in &files {
            let src = files_dir.join(name);
            let dst = self.layout().work_file(name);

            if let Some(parent) = dst.parent() {
                create_dir_all(parent).await?;
            }
            fs::copy(&src, &dst)
                .await
                .map_err(|e| StoreError::write(&dst, e))?;

            debug!(version = %id, file = %name, "Restored");
        }

        info!("Restored version {} ({} files)", id, files.len());

        Ok(files)
    }
}
