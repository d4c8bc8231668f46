use std::cell::RefCell;
use std::io::{Result as IoResult, Write};
use std::rc::Rc;

/// Memory-backed writer for capturing the interpreter's diagnostics.
///
/// Hand it to [`crate::Interpreter::with_diagnostics`] and keep the handle from
/// [`MemWriter::with_handle`] to look at what was reported.
#[derive(Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return inner Rc so caller can read collected bytes after command execution.
    pub fn into_inner(self) -> Rc<RefCell<Vec<u8>>> {
        self.buf
    }

    /// Convenience: create writer and return (writer, rc_handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let mw = MemWriter::new();
        let rc = mw.buf.clone();
        (mw, rc)
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_sees_writes() {
        let (mut writer, handle) = MemWriter::with_handle();
        writer.write_all(b"An error").unwrap();
        writer.write_all(b" has occurred\n").unwrap();
        assert_eq!(handle.borrow().as_slice(), b"An error has occurred\n");
        assert_eq!(writer.into_inner().borrow().len(), 22);
    }
}
