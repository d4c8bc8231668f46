use crate::command::{CommandFactory, ExecutableCommand, Launched};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use crate::process::SpawnedProcess;
use crate::registry::PathRegistry;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Command that is not a builtin.
pub struct ExternalCommand {
    name: String,
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(name: String, program: PathBuf, args: Vec<String>) -> Self {
        Self {
            name,
            program,
            args,
        }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let program = find_in_registry(&env.path, name)?;
        Some(Box::new(ExternalCommand::new(
            name.to_owned(),
            program,
            args.iter().map(|x| x.to_string()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    /// Starts the program and returns without waiting for it.
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<Launched, ShellError> {
        let mut cmd = Command::new(&self.program);
        set_arg0(&mut cmd, &self.name);
        let child = cmd
            .args(&self.args)
            .current_dir(&env.current_dir)
            .spawn()
            .map_err(|source| ShellError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        log::debug!(
            "spawned {} as pid {} ({:?})",
            self.program.display(),
            child.id(),
            self.args
        );
        Ok(Launched::Spawned(SpawnedProcess::new(self.name, child)))
    }
}

#[cfg(unix)]
fn set_arg0(cmd: &mut Command, name: &str) {
    use std::os::unix::process::CommandExt;
    cmd.arg0(name);
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut Command, _name: &str) {}

/// Resolve a command name against the search path.
///
/// Each directory is tried in order by appending `/` and the name to it; the first
/// candidate that is an executable file wins. Names are never looked up anywhere
/// else, so an empty registry resolves nothing and a name containing `/` is still
/// taken relative to each directory.
pub fn find_in_registry(registry: &PathRegistry, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let found = registry.iter().find_map(|dir| {
        let mut candidate = OsString::from(dir.as_os_str());
        candidate.push("/");
        candidate.push(name);
        let candidate = PathBuf::from(candidate);
        is_executable(&candidate).then_some(candidate)
    });
    log::debug!("resolve {name}: {found:?}");
    found
}

/// Whether `path` is a regular file the shell may try to run.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
