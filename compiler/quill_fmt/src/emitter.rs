//! Output sink for the formatter.

use crate::INDENT_WIDTH;

/// Receives formatted text.
pub trait Emitter {
    fn emit(&mut self, text: &str);

    fn emit_newline(&mut self);

    /// Indentation for `level` nesting levels.
    fn emit_indent(&mut self, level: usize);

    fn emit_space(&mut self) {
        self.emit(" ");
    }
}

/// In-memory emitter.
#[derive(Default, Debug)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// End non-empty output with exactly one newline.
    pub fn ensure_trailing_newline(&mut self) {
        let trimmed = self.buffer.trim_end_matches('\n').len();
        self.buffer.truncate(trimmed);
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
    }

    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    #[inline]
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    #[inline]
    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indent_and_trailing_newline() {
        let mut out = StringEmitter::with_capacity(16);
        out.emit_indent(2);
        out.emit("x");
        out.emit_space();
        out.emit("= 1");
        out.emit_newline();
        out.emit_newline();
        out.ensure_trailing_newline();
        assert_eq!(out.as_str(), "        x = 1\n");
    }

    #[test]
    fn test_empty_output_stays_empty() {
        let mut out = StringEmitter::new();
        out.ensure_trailing_newline();
        assert_eq!(out.output(), "");
    }
}
