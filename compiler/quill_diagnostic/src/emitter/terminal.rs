//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI colors. When the
//! source text is attached, labels are rendered as `path:line:col` followed
//! by the offending line and a caret underline.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const HELP: &str = "\x1b[1;32m";
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color=` flag value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

struct SourceContext<'src> {
    path: &'src str,
    text: &'src str,
    lines: LineOffsetTable,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceContext<'src>>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Attach the script text so labels render with line, column and snippet.
    #[must_use]
    pub fn with_source(mut self, path: &'src str, text: &'src str) -> Self {
        self.source = Some(SourceContext {
            path,
            text,
            lines: LineOffsetTable::build(text),
        });
        self
    }

    /// Recover the writer, e.g. to inspect a buffer in tests.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_label(&mut self, label: &Label) {
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };

        let Some(src) = &self.source else {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            self.write_colored(&label.message, color);
            let _ = writeln!(self.writer);
            return;
        };

        let (line, col) = src.lines.offset_to_line_col(src.text, label.span.start);
        let line_text = src.lines.line_text(src.text, line).to_owned();
        let path = src.path;
        let gutter = line.to_string().len();
        let pad = " ".repeat(gutter);
        let caret_pad = " ".repeat(col.saturating_sub(1) as usize);
        // Underline at least one column, at most to the end of the line.
        let remaining = line_text
            .chars()
            .count()
            .saturating_sub(col.saturating_sub(1) as usize);
        let width = (label.span.len() as usize).clamp(1, remaining.max(1));
        let marker = if label.is_primary { "^" } else { "-" };

        let _ = writeln!(self.writer, "{pad}--> {path}:{line}:{col}");
        let _ = writeln!(self.writer, "{pad} |");
        let _ = writeln!(self.writer, "{line} | {line_text}");
        let _ = write!(self.writer, "{pad} | {caret_pad}");
        self.write_colored(&marker.repeat(width), color);
        if !label.message.is_empty() {
            let _ = write!(self.writer, " ");
            self.write_colored(&label.message, color);
        }
        let _ = writeln!(self.writer);
    }

    fn write_trailer(&mut self, kind: &str, color: &str, text: &str) {
        let _ = write!(self.writer, "  = ");
        self.write_colored(kind, color);
        let _ = writeln!(self.writer, ": {text}");
    }
}

impl TerminalEmitter<'static, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        if self.colors {
            let _ = write!(
                self.writer,
                "{}[{}]{}",
                colors::BOLD,
                diagnostic.code,
                colors::RESET
            );
        } else {
            let _ = write!(self.writer, "[{}]", diagnostic.code);
        }
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }
        for note in &diagnostic.notes {
            self.write_trailer("note", colors::BOLD, note);
        }
        for suggestion in &diagnostic.suggestions {
            self.write_trailer("help", colors::HELP, suggestion);
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use pretty_assertions::assert_eq;
    use quill_ir::Span;

    fn render(diag: &Diagnostic, source: Option<&str>) -> String {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        if let Some(text) = source {
            emitter = emitter.with_source("main.ql", text);
        }
        emitter.emit(diag);
        emitter.flush();
        String::from_utf8_lossy(&emitter.into_inner()).into_owned()
    }

    #[test]
    fn test_snippet_rendering() {
        let source = "x = 1\nbreak\n";
        let diag = Diagnostic::error(ErrorCode::E2002)
            .with_message("`break` outside of a loop")
            .with_label(Span::new(6, 11), "not inside a loop");

        let expected = "\
error[E2002]: `break` outside of a loop
 --> main.ql:2:1
  |
2 | break
  | ^^^^^ not inside a loop

";
        assert_eq!(render(&diag, Some(source)), expected);
    }

    #[test]
    fn test_without_source_uses_spans() {
        let diag = Diagnostic::error(ErrorCode::E1002)
            .with_message("expected expression")
            .with_label(Span::new(3, 4), "here")
            .with_suggestion("add a value");
        let text = render(&diag, None);
        assert!(text.contains("error[E1002]: expected expression"));
        assert!(text.contains("--> 3..4: here"));
        assert!(text.contains("= help: add a value"));
    }

    #[test]
    fn test_colors_emit_ansi() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
        emitter.emit(&Diagnostic::error(ErrorCode::E0001).with_message("unterminated"));
        let text = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
        assert!(text.contains("\x1b["));
    }

    #[test]
    fn test_summary() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit_summary(2, 1);
        let text = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
        assert_eq!(
            text,
            "error: aborting due to 2 previous errors; 1 warning emitted\n"
        );
    }

    #[test]
    fn test_color_mode_parse() {
        assert_eq!(ColorMode::parse("always"), Some(ColorMode::Always));
        assert_eq!(ColorMode::parse("sometimes"), None);
        assert!(!ColorMode::Auto.should_use_colors(false));
    }
}
