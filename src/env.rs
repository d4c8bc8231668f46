use crate::registry::PathRegistry;
use std::env as stdenv;
use std::path::PathBuf;

/// Mutable engine state shared by every command the interpreter runs.
///
/// The environment contains:
/// - `path`: the directories searched for external commands.
/// - `current_dir`: the working directory external commands are started in.
/// - `should_exit`: raised by the `exit` builtin; the interpreter stops as soon as it
///   sees it.
///
/// Each [`crate::Interpreter`] owns its own environment, so several engines can live in
/// one process without sharing a search path.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Directories searched for external commands.
    pub path: PathRegistry,
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// When set to true, the interpreter stops processing input.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the process working directory and start with the default search path.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            path: PathRegistry::default(),
            current_dir,
            should_exit: false,
        }
    }

    /// Same as [`Environment::new`] but searching `path` instead of the default.
    pub fn with_path(path: PathRegistry) -> Self {
        Self {
            path,
            ..Self::new()
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
