//! Handles to running external commands and the wait that reaps them.

use crate::error::ShellError;
use std::process::{Child, ExitStatus};

/// A running external command started for one subcommand.
#[derive(Debug)]
pub struct SpawnedProcess {
    name: String,
    child: Child,
}

impl SpawnedProcess {
    pub fn new(name: impl Into<String>, child: Child) -> Self {
        Self {
            name: name.into(),
            child,
        }
    }

    /// Command name as typed by the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Block until the process exits, consuming the handle.
    pub fn wait(mut self) -> Result<ExitStatus, ShellError> {
        self.child.wait().map_err(|source| ShellError::Wait {
            name: self.name,
            source,
        })
    }
}

/// Reap every process in `handles`.
///
/// Exit statuses are not reported to the user; failures to wait are logged and the
/// remaining handles are still waited on.
pub fn wait_all(handles: Vec<SpawnedProcess>) {
    for handle in handles {
        let pid = handle.id();
        match handle.wait() {
            Ok(status) => log::debug!("reaped pid {pid}: {status}"),
            Err(e) => log::debug!("{e}"),
        }
    }
}
