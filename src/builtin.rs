use crate::command::{CommandFactory, ExecutableCommand, Launched};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process. They never produce a process handle,
/// so anything they change in the [`Environment`] is visible to every command launched
/// after them.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "exit" or "cd".
    fn name() -> &'static str;

    /// Exact number of arguments the command takes, or `None` for any number.
    const ARITY: Option<usize>;

    /// Build the command from the arguments following its name.
    ///
    /// The count is checked on the raw words and every word is handed to argh as a
    /// positional, so `--`, `-x` and `--help` are plain arguments here.
    fn parse(args: &[&str]) -> Result<Self, EarlyExit> {
        if let Some(expected) = Self::ARITY {
            if args.len() != expected {
                return Err(EarlyExit {
                    output: format!("expected {expected} argument(s), got {}", args.len()),
                    status: Err(()),
                });
            }
        }
        let positionals: Vec<&str> = std::iter::once("--").chain(args.iter().copied()).collect();
        Self::from_args(&[Self::name()], &positionals)
    }

    /// Executes the command against the interpreter's environment.
    fn execute(self, env: &mut Environment) -> Result<(), ShellError>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<Launched, ShellError> {
        T::execute(*self, env).map(|()| Launched::Completed)
    }
}

/// Stand-in for a builtin whose arguments were rejected.
///
/// Running it only reports the usage error, so the name still counts as handled and
/// nothing is looked up on the search path.
struct InvalidArgs {
    command: &'static str,
    output: String,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, _env: &mut Environment) -> Result<Launched, ShellError> {
        Err(ShellError::usage(self.command, self.output.trim()))
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::parse(args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, .. }) => Box::new(InvalidArgs {
                    command: T::name(),
                    output,
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Exit the shell. Takes no arguments.
pub struct Exit {}

impl BuiltinCommand for Exit {
    const ARITY: Option<usize> = Some(0);

    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, env: &mut Environment) -> Result<(), ShellError> {
        env.should_exit = true;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: String,
}

impl BuiltinCommand for Cd {
    const ARITY: Option<usize> = Some(1);

    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, env: &mut Environment) -> Result<(), ShellError> {
        let target = PathBuf::from(&self.target);
        let new_dir = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        let canonical = fs::canonicalize(&new_dir).map_err(|source| ShellError::ChangeDir {
            target: new_dir.clone(),
            source,
        })?;

        env::set_current_dir(&canonical).map_err(|source| ShellError::ChangeDir {
            target: canonical.clone(),
            source,
        })?;
        log::debug!("cd: now in {}", canonical.display());
        env.current_dir = canonical;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Replace the list of directories searched for commands.
pub struct Path {
    #[argh(positional, greedy)]
    /// directories to search, in order. No directories disables external commands.
    pub dirs: Vec<String>,
}

impl BuiltinCommand for Path {
    const ARITY: Option<usize> = None;

    fn name() -> &'static str {
        "path"
    }

    fn execute(self, env: &mut Environment) -> Result<(), ShellError> {
        log::debug!("path: {:?}", self.dirs);
        env.path.set(self.dirs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PathRegistry;
    use crate::test_support::lock_current_dir;
    use std::env as stdenv;

    fn fresh_env() -> Environment {
        Environment {
            path: PathRegistry::default(),
            current_dir: stdenv::current_dir().unwrap(),
            should_exit: false,
        }
    }

    fn create<T: BuiltinCommand + 'static>(args: &[&str]) -> Box<dyn ExecutableCommand> {
        Factory::<T>::default()
            .try_create(&fresh_env(), T::name(), args)
            .expect("builtin should recognise its own name")
    }

    #[test]
    fn test_factory_ignores_other_names() {
        let env = fresh_env();
        assert!(Factory::<Cd>::default().try_create(&env, "ls", &[]).is_none());
        assert!(Factory::<Exit>::default().try_create(&env, "exit2", &[]).is_none());
    }

    #[test]
    fn test_exit_sets_flag() {
        let mut env = fresh_env();
        let res = create::<Exit>(&[]).execute(&mut env);
        assert!(matches!(res, Ok(Launched::Completed)));
        assert!(env.should_exit);
    }

    #[test]
    fn test_exit_with_arguments_is_usage_error() {
        let mut env = fresh_env();
        let res = create::<Exit>(&["0"]).execute(&mut env);
        assert!(matches!(res, Err(ShellError::Usage { .. })));
        assert!(!env.should_exit);
    }

    #[test]
    fn test_cd_wrong_argument_count_is_usage_error() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let cases: [&[&str]; 2] = [&[], &["/tmp", "/"]];
        for args in cases {
            let mut env = fresh_env();
            let res = create::<Cd>(args).execute(&mut env);
            assert!(matches!(res, Err(ShellError::Usage { .. })), "args {args:?}");
            assert_eq!(env.current_dir, orig);
        }
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_exit_rejects_option_like_arguments() {
        for arg in ["--", "--help", "-x"] {
            let mut env = fresh_env();
            let res = create::<Exit>(&[arg]).execute(&mut env);
            assert!(matches!(res, Err(ShellError::Usage { .. })), "exit {arg}");
            assert!(!env.should_exit, "exit {arg}");
        }
    }

    #[test]
    fn test_cd_counts_double_dash_as_argument() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let mut env = fresh_env();
        let res = create::<Cd>(&["--", "/tmp"]).execute(&mut env);
        assert!(matches!(res, Err(ShellError::Usage { .. })));
        assert_eq!(env.current_dir, orig);
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_cd_into_directory_named_like_a_flag() {
        let _lock = lock_current_dir();
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let base = fs::canonicalize(temp.path()).unwrap();
        fs::create_dir(base.join("-x")).unwrap();
        fs::create_dir(base.join("--help")).unwrap();
        let orig = stdenv::current_dir().unwrap();

        let mut results = Vec::new();
        for dir in ["-x", "--help"] {
            let mut env = fresh_env();
            env.current_dir = base.clone();
            let res = create::<Cd>(&[dir]).execute(&mut env);
            results.push((dir, res.is_ok(), env.current_dir.clone()));
        }
        stdenv::set_current_dir(&orig).expect("failed to restore cwd");

        for (dir, ok, now) in results {
            assert!(ok, "cd {dir}");
            assert_eq!(now, base.join(dir));
        }
    }

    #[test]
    fn test_cd_to_absolute_path() {
        let _lock = lock_current_dir();
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let canonical_temp = fs::canonicalize(temp.path()).expect("canonicalize failed");
        let orig = stdenv::current_dir().unwrap();

        let mut env = fresh_env();
        let cmd = Cd {
            target: canonical_temp.to_string_lossy().to_string(),
        };
        let res = BuiltinCommand::execute(cmd, &mut env);

        let new_cwd = stdenv::current_dir().unwrap();
        stdenv::set_current_dir(&orig).expect("failed to restore cwd");

        assert!(res.is_ok());
        assert_eq!(fs::canonicalize(new_cwd).unwrap(), canonical_temp);
        assert_eq!(env.current_dir, canonical_temp);
    }

    #[test]
    fn test_cd_relative_to_current_dir() {
        let _lock = lock_current_dir();
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir(temp.path().join("inner")).unwrap();
        let orig = stdenv::current_dir().unwrap();

        let mut env = fresh_env();
        env.current_dir = fs::canonicalize(temp.path()).unwrap();
        let res = BuiltinCommand::execute(
            Cd {
                target: "inner".into(),
            },
            &mut env,
        );
        stdenv::set_current_dir(&orig).expect("failed to restore cwd");

        assert!(res.is_ok());
        assert!(env.current_dir.ends_with("inner"));
    }

    #[test]
    fn test_cd_nonexistent_path_errors() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let mut env = fresh_env();
        let target = format!("nonexistent_dir_for_wish_test_{}", std::process::id());
        let res = BuiltinCommand::execute(Cd { target }, &mut env);

        assert!(matches!(res, Err(ShellError::ChangeDir { .. })));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
        assert_eq!(env.current_dir, orig);
    }

    #[test]
    fn test_path_replaces_registry() {
        let mut env = fresh_env();
        create::<Path>(&["/a", "/b", "/c"]).execute(&mut env).unwrap();
        assert_eq!(env.path, PathRegistry::new(["/a", "/b", "/c"]));

        create::<Path>(&[]).execute(&mut env).unwrap();
        assert!(env.path.is_empty());
    }

    #[test]
    fn test_path_accepts_flag_like_directories() {
        let mut env = fresh_env();
        let res = create::<Path>(&["--help", "-x"]).execute(&mut env);
        assert!(res.is_ok());
        assert_eq!(env.path, PathRegistry::new(["--help", "-x"]));
    }
}
