use crate::env::Environment;
use crate::error::ShellError;
use crate::process::SpawnedProcess;

/// What running a single subcommand left behind.
#[derive(Debug)]
pub enum Launched {
    /// The command ran in-process and is already finished.
    Completed,
    /// An external process was started and still has to be reaped.
    Spawned(SpawnedProcess),
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// This is implemented by built-ins via a blanket impl and by external commands.
/// External commands must not wait for their process: the interpreter collects the
/// handles of a whole line and reaps them together.
pub trait ExecutableCommand {
    /// Executes the command.
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<Launched, ShellError>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
/// Implementations can use the environment to resolve executables (e.g., using the
/// search path).
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
