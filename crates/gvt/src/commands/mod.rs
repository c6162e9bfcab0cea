//! Command handlers for the gvt CLI.
//!
//! Every command word maps to a handler in [`COMMANDS`]. A handler receives
//! the repository and the words that followed the command, and returns an
//! [`Outcome`]: the text to show and the process exit code.

pub mod args;
pub mod files;
pub mod history;
pub mod init;
pub mod version;

use futures::future::BoxFuture;
use gvt_core::{Repository, StoreError};
use tracing::error;

/// Stable process exit codes.
pub mod code {
    pub const OK: i32 = 0;
    pub const BAD_COMMAND: i32 = 1;
    pub const ALREADY_INITIALIZED: i32 = 10;
    pub const ADD_MISSING_ARGUMENT: i32 = 20;
    pub const ADD_FILE_NOT_FOUND: i32 = 21;
    pub const ADD_FAILED: i32 = 22;
    pub const DETACH_MISSING_ARGUMENT: i32 = 30;
    pub const DETACH_FAILED: i32 = 31;
    pub const COMMIT_MISSING_ARGUMENT: i32 = 50;
    pub const COMMIT_FILE_NOT_FOUND: i32 = 51;
    pub const COMMIT_FAILED: i32 = 52;
    pub const INVALID_VERSION: i32 = 60;
    pub const NOT_INITIALIZED: i32 = -2;
    pub const SYSTEM_FAILURE: i32 = -3;
}

/// What a command produced: a message and an exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: i32,
    pub message: String,
    /// Error details, printed after the message.
    pub detail: Option<String>,
}

impl Outcome {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(code::OK, message)
    }

    /// A failure caused by `err`, whose text is kept as detail.
    pub fn failure(code: i32, message: impl Into<String>, err: &StoreError) -> Self {
        error!(code, error = %err, "Command failed");
        Self {
            detail: Some(err.to_string()),
            ..Self::new(code, message)
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            code::NOT_INITIALIZED,
            "Current directory is not initialized. Please use \"init\" command to initialize.",
        )
    }

    pub fn system_failure(err: &StoreError) -> Self {
        Self::failure(
            code::SYSTEM_FAILURE,
            "Underlying system problem. See ERR for details.",
            err,
        )
    }

    pub fn is_success(&self) -> bool {
        self.code == code::OK
    }

    /// Print the message to stdout on success, stderr otherwise.
    pub fn print(&self) {
        if self.is_success() {
            if !self.message.is_empty() {
                println!("{}", self.message.trim_end_matches('\n'));
            }
        } else {
            eprintln!("{}", self.message);
        }
        if let Some(detail) = &self.detail {
            eprintln!("{detail}");
        }
    }
}

/// A command handler.
pub type Handler = for<'a> fn(&'a mut Repository, &'a [String]) -> BoxFuture<'a, Outcome>;

/// One entry of the command table.
pub struct CommandSpec {
    pub name: &'static str,
    /// Whether the store must exist before the handler runs.
    pub requires_init: bool,
    pub handler: Handler,
}

/// All commands, by name.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "init",
        requires_init: false,
        handler: init::init,
    },
    CommandSpec {
        name: "add",
        requires_init: true,
        handler: files::add,
    },
    CommandSpec {
        name: "detach",
        requires_init: true,
        handler: files::detach,
    },
    CommandSpec {
        name: "commit",
        requires_init: true,
        handler: files::commit,
    },
    CommandSpec {
        name: "history",
        requires_init: true,
        handler: history::history,
    },
    CommandSpec {
        name: "version",
        requires_init: true,
        handler: version::version,
    },
    CommandSpec {
        name: "checkout",
        requires_init: true,
        handler: version::checkout,
    },
];

/// Look up a command by name, ignoring case.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Run the command named by the first word of `argv`.
pub async fn dispatch(repo: &mut Repository, argv: &[String]) -> Outcome {
    let Some((name, rest)) = argv.split_first() else {
        return Outcome::new(code::BAD_COMMAND, "Please specify command.");
    };

    let Some(spec) = find(name) else {
        return Outcome::new(code::BAD_COMMAND, format!("Unknown command {name}."));
    };

    if spec.requires_init && !repo.is_initialized() {
        return Outcome::not_initialized();
    }

    (spec.handler)(repo, rest).await
}
