use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::path::PathBuf;
use std::process;
use wish::input::{Batch, Interactive, LineSource};
use wish::{ERROR_MESSAGE, Interpreter, Stop};

#[derive(FromArgs)]
/// A small shell. Runs commands from a batch file, or interactively when no file is given.
struct Args {
    #[argh(positional)]
    /// file to read commands from, one line per command.
    batch_file: Option<PathBuf>,
}

fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let (cmd, rest) = match argv.split_first() {
        Some((cmd, rest)) => (cmd.as_str(), rest),
        None => ("wish", &[][..]),
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    match Args::from_args(&[cmd], &rest) {
        Ok(args) => args,
        Err(EarlyExit {
            output,
            status: Ok(()),
        }) => {
            println!("{output}");
            process::exit(0);
        }
        Err(EarlyExit { output, .. }) => {
            log::debug!("usage: {output}");
            eprint!("{ERROR_MESSAGE}");
            process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<Stop> {
    let mut source: Box<dyn LineSource> = match &args.batch_file {
        Some(path) => Box::new(Batch::open(path)?),
        None => Box::new(Interactive::new()?),
    };
    Interpreter::default().run(source.as_mut())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("WISH_LOG", "off")).init();

    let args = parse_args();
    match run(args) {
        Ok(stop) => {
            log::debug!("stopping: {stop:?}");
            // Children still running after `exit` are left alone.
            process::exit(0);
        }
        Err(e) => {
            log::error!("{e:#}");
            eprint!("{ERROR_MESSAGE}");
            process::exit(1);
        }
    }
}
