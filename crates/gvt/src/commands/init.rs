//! The `init` command.

use super::{code, Outcome};
use futures::future::BoxFuture;
use gvt_core::{Repository, StoreError};

/// Create the store in the working directory.
pub fn init<'a>(repo: &'a mut Repository, _args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(async move {
        match repo.initialize().await {
            Ok(_) => Outcome::ok("Current directory initialized successfully."),
            Err(StoreError::AlreadyInitialized) => Outcome::new(
                code::ALREADY_INITIALIZED,
                "Current directory is already initialized.",
            ),
            Err(e) => Outcome::system_failure(&e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::open;
    use gvt_test_utils::TestProject;

    #[tokio::test]
    async fn test_init_then_init_again() {
        let project = TestProject::new().build();
        let mut repo = open(project.path()).await;

        let outcome = init(&mut repo, &[]).await;
        assert!(outcome.is_success());
        assert!(project.file_exists(".gvt/HEAD"));
        assert!(project.file_exists(".gvt/versions/0/message.txt"));

        let outcome = init(&mut repo, &[]).await;
        assert_eq!(outcome.code, code::ALREADY_INITIALIZED);
    }
}
