//! Destination for `print` statements.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Where printed lines go. Cloning a `Buffer` shares it, so a test can keep
/// a handle while the interpreter owns another.
#[derive(Debug, Clone, Default)]
pub enum Output {
    #[default]
    Stdout,
    Buffer(Rc<RefCell<String>>),
}

impl Output {
    pub fn buffer() -> Self {
        Output::Buffer(Rc::new(RefCell::new(String::new())))
    }

    pub fn println(&self, text: &str) -> io::Result<()> {
        match self {
            Output::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", text)?;
                stdout.flush()
            }
            Output::Buffer(buffer) => {
                let mut buffer = buffer.borrow_mut();
                buffer.push_str(text);
                buffer.push('\n');
                Ok(())
            }
        }
    }

    /// Everything captured so far. Always empty for stdout.
    pub fn contents(&self) -> String {
        match self {
            Output::Stdout => String::new(),
            Output::Buffer(buffer) => buffer.borrow().clone(),
        }
    }

    pub fn clear(&self) {
        if let Output::Buffer(buffer) = self {
            buffer.borrow_mut().clear();
        }
    }
}
