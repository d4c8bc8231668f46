//! Where command lines come from.

use anyhow::{Context, Result, anyhow};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Prompt printed before every interactive read.
pub const PROMPT: &str = "wish> ";

/// A stream of raw command lines.
pub trait LineSource {
    /// Next line without its trailing newline, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Lines typed at the terminal, read through rustyline with the `wish> ` prompt.
pub struct Interactive {
    editor: DefaultEditor,
}

impl Interactive {
    pub fn new() -> Result<Self> {
        let editor =
            DefaultEditor::new().map_err(|e| anyhow!("failed to set up line editor: {e}"))?;
        Ok(Self { editor })
    }
}

impl LineSource for Interactive {
    fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            log::debug!("history: {e}");
                        }
                    }
                    return Ok(Some(line));
                }
                // Ctrl-C drops the half-typed line.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(anyhow!("failed to read from terminal: {err}")),
            }
        }
    }
}

/// Lines read from a file or any other buffered reader, without a prompt.
pub struct Batch<R> {
    reader: R,
}

impl<R: BufRead> Batch<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl Batch<BufReader<File>> {
    /// Open a batch file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("can't open batch file {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource for Batch<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut raw = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut raw)
            .context("failed to read batch input")?;
        if read == 0 {
            return Ok(None);
        }
        if raw.ends_with(b"\n") {
            raw.pop();
            if raw.ends_with(b"\r") {
                raw.pop();
            }
        }
        // Invalid UTF-8 is replaced rather than ending the batch.
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }
}
