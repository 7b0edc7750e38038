//! The `fmt` command.
//!
//! The formatted script goes to stdout. Comments are not part of the tree,
//! so the file itself is never rewritten.

use quill_diagnostic::Diagnostic;
use quill_fmt::format_program;
use quill_ir::StringInterner;
use quill_parse::parse_source;

use super::{load_script, report, stderr_emitter};
use crate::cli::Options;

/// Canonical layout of `source`, or its parse diagnostics.
pub fn format_source(source: &str) -> Result<String, Vec<Diagnostic>> {
    let interner = StringInterner::new();
    let parsed = parse_source(source, &interner);
    if parsed.has_errors() {
        return Err(parsed.diagnostics());
    }
    Ok(format_program(&parsed.arena, parsed.program, &interner))
}

/// Print the formatted script, or with `check` only compare it.
pub fn format_file(path: &str, check: bool, options: &Options) -> bool {
    let Some(script) = load_script(path) else {
        return false;
    };
    let display = script.display_path();
    let formatted = match format_source(&script.source) {
        Ok(formatted) => formatted,
        Err(diagnostics) => {
            let mut emitter = stderr_emitter(&display, &script.source, options.color);
            report(&mut emitter, &diagnostics);
            return false;
        }
    };

    if !check {
        print!("{formatted}");
        return true;
    }
    if formatted == script.source {
        println!("OK: {display} is formatted");
        true
    } else {
        eprintln!("{display} is not formatted");
        false
    }
}
