//! Column-aligned text logger.
//!
//! Each check produces one line:
//!
//! ```text
//! JAVA_HOME exists . . . . . . . . . . . . . . . . PASS
//! JAVA_HOME is directory . . . . . . . . . . . . . FAIL
//! JAVA_HOME can write. . . . . . . . . . . . . . . SKIP
//! ```
//!
//! The name and its dot leader are written as soon as the check starts;
//! the status token follows when the check finishes.

use crate::logger::{CheckHandle, CheckLogger};
use crate::types::Outcome;

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Default column at which status tokens are aligned.
pub const DEFAULT_WIDTH: usize = 50;

/// Logger printing one aligned line per check to a writer.
pub struct PrintLogger {
    out: Mutex<Box<dyn Write + Send>>,
    width: usize,
}

impl PrintLogger {
    /// Creates a logger writing to `out`, aligning status tokens at `width`.
    pub fn new(out: impl Write + Send + 'static, width: usize) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            width,
        }
    }

    /// Creates a logger writing to standard output.
    #[must_use]
    pub fn stdout(width: usize) -> Self {
        Self::new(io::stdout(), width)
    }

    /// Creates a logger writing to standard error.
    #[must_use]
    pub fn stderr(width: usize) -> Self {
        Self::new(io::stderr(), width)
    }

    /// Returns the alignment column.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!("Failed to write check output: {}", e);
        }
    }
}

impl CheckLogger for PrintLogger {
    fn log(&self, name: &str) -> CheckHandle<'_> {
        self.write(&leader(name, self.width));
        CheckHandle::from_fn(move |outcome: &Outcome| self.write(&format!("{outcome}\n")))
    }
}

/// Renders `name` followed by its alternating dot leader.
///
/// Position `i` runs from one past the name up to `width`; even positions
/// get a dot, odd positions a space. If the position reached at the end is
/// odd, one more space is added so the status never touches a dot.
#[must_use]
pub fn leader(name: &str, width: usize) -> String {
    let mut line = String::with_capacity(name.len().max(width) + 1);
    line.push_str(name);

    let mut i = name.chars().count() + 1;
    while i < width {
        line.push(if i % 2 == 0 { '.' } else { ' ' });
        i += 1;
    }
    if i % 2 == 1 {
        line.push(' ');
    }

    line
}

/// Cloneable in-memory writer.
///
/// Useful for capturing a [`PrintLogger`]'s report after the logger has
/// been moved into a chain.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, decoded lossily as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
