//! Literal rendering.

use super::Formatter;
use crate::emitter::Emitter;

impl Formatter<'_> {
    /// Integral values print without a fraction. Rust's float `Display`
    /// never uses exponent notation, so the output always re-lexes.
    pub(super) fn emit_number(&mut self, value: f64) {
        self.out.emit(&format!("{value}"));
    }

    /// Double-quoted, with the escapes the lexer understands.
    pub(super) fn emit_string(&mut self, s: &str) {
        self.out.emit("\"");
        for c in s.chars() {
            match c {
                '\\' => self.out.emit("\\\\"),
                '"' => self.out.emit("\\\""),
                '\n' => self.out.emit("\\n"),
                '\t' => self.out.emit("\\t"),
                '\r' => self.out.emit("\\r"),
                _ => {
                    let mut buf = [0; 4];
                    self.out.emit(c.encode_utf8(&mut buf));
                }
            }
        }
        self.out.emit("\"");
    }
}
