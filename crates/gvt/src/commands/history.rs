//! The `history` command.

use super::args::history_limit;
use super::Outcome;
use futures::future::BoxFuture;
use gvt_core::Repository;

/// List versions newest first, one `<id>: <summary>` line each.
pub fn history<'a>(repo: &'a mut Repository, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(async move {
        let history = match repo.history(history_limit(args)) {
            Ok(history) => history,
            Err(e) => return Outcome::system_failure(&e),
        };

        match history.render().await {
            Ok(text) => Outcome::ok(text),
            Err(e) => Outcome::system_failure(&e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{argv, open_initialized};
    use gvt_test_utils::TestProject;
    use std::path::Path;

    #[tokio::test]
    async fn test_history_lines() {
        let project = TestProject::new().with_file("a.txt", "hello").build();
        let mut repo = open_initialized(project.path()).await;
        repo.add(Path::new("a.txt"), None).await.unwrap();
        repo.commit(Path::new("a.txt"), Some("second\nwith body"))
            .await
            .unwrap();

        let outcome = history(&mut repo, &[]).await;
        assert!(outcome.is_success());
        assert_eq!(
            outcome.message,
            "2: second\n1: file added: a.txt\n0: store initialized\n"
        );

        let outcome = history(&mut repo, &argv(&["-last", "2"])).await;
        assert_eq!(outcome.message, "2: second\n1: file added: a.txt\n");

        let outcome = history(&mut repo, &argv(&["-last", "nope"])).await;
        assert_eq!(outcome.message.lines().count(), 3);

        let outcome = history(&mut repo, &argv(&["-last", "0"])).await;
        assert_eq!(outcome.message.lines().count(), 3);

        let outcome = history(&mut repo, &argv(&["-last", "-2"])).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.message, "");
    }
}
