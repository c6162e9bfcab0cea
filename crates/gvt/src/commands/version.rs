//! The `version` and `checkout` commands.

use super::{code, Outcome};
use futures::future::BoxFuture;
use gvt_core::{Repository, StoreError, VersionId};

fn invalid_version(text: impl std::fmt::Display) -> Outcome {
    Outcome::new(code::INVALID_VERSION, format!("Invalid version number: {text}"))
}

/// Map an error from a version lookup to an outcome.
fn version_error(err: StoreError) -> Outcome {
    match err {
        StoreError::NotInitialized => Outcome::not_initialized(),
        StoreError::VersionNotFound(id) => invalid_version(id),
        StoreError::InvalidVersionNumber(text) => invalid_version(format!("{text}.")),
        err => Outcome::system_failure(&err),
    }
}

/// Describe a version; without an id, the active one.
pub fn version<'a>(repo: &'a mut Repository, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(async move {
        let id = match args.first() {
            Some(text) => match text.parse::<VersionId>() {
                Ok(id) => id,
                Err(e) => return version_error(e),
            },
            None => repo.active(),
        };

        match repo.describe_version(id).await {
            Ok(description) => Outcome::ok(description),
            Err(e) => version_error(e),
        }
    })
}

/// Restore a version into the working directory.
pub fn checkout<'a>(repo: &'a mut Repository, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(async move {
        let Some(text) = args.first() else {
            return invalid_version("(none)");
        };
        let id = match text.parse::<VersionId>() {
            Ok(id) => id,
            Err(e) => return version_error(e),
        };

        match repo.checkout(id).await {
            Ok(_) => Outcome::ok(format!("Checkout successful for version: {id}")),
            Err(e) => version_error(e),
        }
    })
}
