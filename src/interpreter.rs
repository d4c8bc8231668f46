use crate::command::{CommandFactory, Launched};
use crate::env::Environment;
use crate::error::{ERROR_MESSAGE, ShellError};
use crate::input::LineSource;
use crate::lexer::{split_parallel, tokenize};
use crate::process::{SpawnedProcess, wait_all};
use crate::registry::PathRegistry;
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only commands defined in this crate (builtins and `ExternalCommand`) are supported.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Why [`Interpreter::run`] stopped reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// The line source ran dry.
    EndOfInput,
    /// The `exit` builtin ran. Processes spawned earlier on the same line were not
    /// waited for.
    Exit,
}

/// The command execution engine.
///
/// The interpreter maintains an [`Environment`] and a list of [`CommandFactory`] objects
/// that are queried in order to create commands by name. See [`Default`] for the
/// factories included out of the box. Failures are written to the diagnostic stream as
/// the fixed [`ERROR_MESSAGE`] and never stop the engine.
///
/// Example
/// ```
/// use wish::{Interpreter, Stop};
/// use wish::io_adapters::MemWriter;
///
/// let (errors, captured) = MemWriter::with_handle();
/// let mut sh = Interpreter::default().with_diagnostics(errors);
/// assert_eq!(sh.execute_line("path"), None);
/// assert_eq!(sh.execute_line("ls"), None);
/// assert_eq!(captured.borrow().as_slice(), b"An error has occurred\n");
/// assert_eq!(sh.execute_line("exit"), Some(Stop::Exit));
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
    diagnostics: Box<dyn Write>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
            diagnostics: Box::new(std::io::stderr()),
        }
    }

    /// Search `path` for external commands instead of the default directory.
    pub fn with_path(mut self, path: PathRegistry) -> Self {
        self.env.path = path;
        self
    }

    /// Send error reports to `out` instead of standard error.
    pub fn with_diagnostics(mut self, out: impl Write + 'static) -> Self {
        self.diagnostics = Box::new(out);
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Read and execute lines until the source is exhausted or `exit` runs.
    ///
    /// Only a failing line source is returned as an error.
    pub fn run(&mut self, source: &mut dyn LineSource) -> anyhow::Result<Stop> {
        while let Some(line) = source.next_line()? {
            if let Some(stop) = self.execute_line(&line) {
                return Ok(stop);
            }
        }
        Ok(Stop::EndOfInput)
    }

    /// Execute every `&`-separated subcommand of `line`.
    ///
    /// All external commands are started before any of them is waited for, and all
    /// of them have exited by the time this returns. Returns `Some(Stop::Exit)` as
    /// soon as `exit` runs, leaving the rest of the line unprocessed.
    pub fn execute_line(&mut self, line: &str) -> Option<Stop> {
        let mut handles: Vec<SpawnedProcess> = Vec::new();
        for piece in split_parallel(line) {
            let args = tokenize(piece);
            let Some((name, rest)) = args.split_first() else {
                continue;
            };
            log::trace!("tokens: {args:?}");

            let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
            match self.dispatch(name, &rest) {
                Ok(Launched::Completed) => {
                    if self.env.should_exit {
                        log::debug!("exit requested, abandoning {} process(es)", handles.len());
                        return Some(Stop::Exit);
                    }
                }
                Ok(Launched::Spawned(handle)) => handles.push(handle),
                Err(e) => self.report(&e),
            }
        }
        wait_all(handles);
        None
    }

    /// Run a single command by name, returning the process it started, if any.
    ///
    /// Builtins are tried before the search path, so a builtin name can never be
    /// shadowed by an executable.
    pub fn dispatch(&mut self, name: &str, args: &[&str]) -> Result<Launched, ShellError> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                return cmd.execute(&mut self.env);
            }
        }
        Err(ShellError::NotFound {
            name: name.to_owned(),
        })
    }

    fn report(&mut self, err: &ShellError) {
        log::debug!("{err}");
        if let Err(e) = self
            .diagnostics
            .write_all(ERROR_MESSAGE.as_bytes())
            .and_then(|()| self.diagnostics.flush())
        {
            log::error!("failed to write diagnostic: {e}");
        }
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// - built-ins: `exit`, `cd`, `path`
    /// - external command launcher
    fn default() -> Self {
        use crate::builtin::*;
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Path>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
