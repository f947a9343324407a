//! Line oriented access to standard output and standard error.
//!
//! The dispatcher and the session both print user facing lines; they share a
//! `Console` so tests can swap the process streams for in-memory buffers.

use log::warn;
use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::rc::Rc;

#[derive(Clone)]
pub struct Console {
    out: Rc<RefCell<dyn Write>>,
    err: Rc<RefCell<dyn Write>>,
}

impl Console {
    pub fn stdio() -> Self {
        Self {
            out: Rc::new(RefCell::new(io::stdout())),
            err: Rc::new(RefCell::new(io::stderr())),
        }
    }

    pub fn println(&self, line: impl Display) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!("Failed to write to stdout: {e}");
        }
    }

    pub fn eprintln(&self, line: impl Display) {
        let mut err = self.err.borrow_mut();
        if let Err(e) = writeln!(err, "{line}").and_then(|()| err.flush()) {
            warn!("Failed to write to stderr: {e}");
        }
    }
}

#[cfg(test)]
pub use self::captured::Captured;
