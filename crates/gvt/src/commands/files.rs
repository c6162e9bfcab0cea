//! The `add`, `detach` and `commit` commands.

use super::args::{extract_message, file_argument};
use super::{code, Outcome};
use futures::future::BoxFuture;
use gvt_core::{AddOutcome, CommitOutcome, DetachOutcome, Repository, StoreError};
use std::path::Path;

/// Exit codes and wording of one file command.
struct FileCommand {
    verb: &'static str,
    past: &'static str,
    missing_argument: i32,
    not_found: i32,
    failed: i32,
}

const ADD: FileCommand = FileCommand {
    verb: "add",
    past: "added",
    missing_argument: code::ADD_MISSING_ARGUMENT,
    not_found: code::ADD_FILE_NOT_FOUND,
    failed: code::ADD_FAILED,
};

const DETACH: FileCommand = FileCommand {
    verb: "detach",
    past: "detached",
    missing_argument: code::DETACH_MISSING_ARGUMENT,
    not_found: code::DETACH_FAILED,
    failed: code::DETACH_FAILED,
};

const COMMIT: FileCommand = FileCommand {
    verb: "commit",
    past: "committed",
    missing_argument: code::COMMIT_MISSING_ARGUMENT,
    not_found: code::COMMIT_FILE_NOT_FOUND,
    failed: code::COMMIT_FAILED,
};

impl FileCommand {
    fn missing_argument(&self) -> Outcome {
        Outcome::new(
            self.missing_argument,
            format!("Please specify file to {}.", self.verb),
        )
    }

    fn error(&self, file: &str, err: StoreError) -> Outcome {
        match err {
            StoreError::NotInitialized => Outcome::not_initialized(),
            StoreError::FileNotFound(_) => {
                Outcome::new(self.not_found, format!("File not found. File: {file}"))
            }
            StoreError::InvalidPath(_) => Outcome::failure(
                self.missing_argument,
                format!("Cannot {} this path. File: {file}", self.verb),
                &err,
            ),
            err => Outcome::failure(
                self.failed,
                format!(
                    "File cannot be {}, see ERR for details. File: {file}",
                    self.past
                ),
                &err,
            ),
        }
    }
}

/// Track a file and capture it in a new version.
pub fn add<'a>(repo: &'a mut Repository, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(async move {
        let Some(file) = file_argument(args) else {
            return ADD.missing_argument();
        };
        let message = extract_message(args);

        match repo.add(Path::new(file), message.as_deref()).await {
            Ok(AddOutcome::Added(_)) => {
                Outcome::ok(format!("File added successfully. File: {file}"))
            }
            Ok(AddOutcome::AlreadyTracked(_)) => {
                Outcome::ok(format!("File already added. File: {file}"))
            }
            Err(e) => ADD.error(file, e),
        }
    })
}

/// Stop tracking a file, recording the change in a new version.
pub fn detach<'a>(repo: &'a mut Repository, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(async move {
        let Some(file) = file_argument(args) else {
            return DETACH.missing_argument();
        };
        let message = extract_message(args);

        match repo.detach(Path::new(file), message.as_deref()).await {
            Ok(DetachOutcome::Detached(_)) => {
                Outcome::ok(format!("File detached successfully. File: {file}"))
            }
            Ok(DetachOutcome::NotTracked(_)) => {
                Outcome::ok(format!("File is not added to gvt. File: {file}"))
            }
            Err(e) => DETACH.error(file, e),
        }
    })
}

/// Record the current content of the tracked files in a new version.
pub fn commit<'a>(repo: &'a mut Repository, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(async move {
        let Some(file) = file_argument(args) else {
            return COMMIT.missing_argument();
        };
        let message = extract_message(args);

        match repo.commit(Path::new(file), message.as_deref()).await {
            Ok(CommitOutcome::Committed(_)) => {
                Outcome::ok(format!("File committed successfully. File: {file}"))
            }
            Ok(CommitOutcome::NotTracked(_)) => {
                Outcome::ok(format!("File is not added to gvt. File: {file}"))
            }
            Err(e) => COMMIT.error(file, e),
        }
    })
}
