//! A small parallel command shell.
//!
//! Lines are split on `&` into subcommands, each subcommand is tokenized on whitespace
//! and handed to a chain of [`command::CommandFactory`] objects: the in-process
//! builtins (`exit`, `cd`, `path`) come first, then the external launcher which
//! resolves the name against the [`registry::PathRegistry`]. Every external process
//! started for a line is spawned before any of them is waited on, and all of them are
//! reaped before the next line is read.
//!
//! The main entry point is [`Interpreter`]; [`input`] provides the interactive and
//! batch line sources used by the `wish` binary.

mod builtin;
pub mod command;
pub mod env;
pub mod error;
mod external;
pub mod input;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod process;
pub mod registry;

pub use error::{ERROR_MESSAGE, ShellError};
pub use external::{find_in_registry, is_executable};
pub use interpreter::{Interpreter, Stop};
