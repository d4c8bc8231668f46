//! Error kinds produced while running a line.

use std::io;
use std::path::PathBuf;

/// The only text a user ever sees on the error stream, whatever went wrong.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Why a subcommand failed.
///
/// None of these stop the interpreter: the failing subcommand is dropped, the fixed
/// [`ERROR_MESSAGE`] is printed and the rest of the line keeps going. The `Display`
/// text is only used for logging.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("{command}: bad usage: {detail}")]
    Usage { command: String, detail: String },

    #[error("cd: can't change directory to {}: {source}", .target.display())]
    ChangeDir {
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name}: command not found")]
    NotFound { name: String },

    #[error("failed to spawn {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for {name}: {source}")]
    Wait {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl ShellError {
    pub(crate) fn usage(command: &str, detail: impl Into<String>) -> Self {
        ShellError::Usage {
            command: command.to_owned(),
            detail: detail.into(),
        }
    }
}
