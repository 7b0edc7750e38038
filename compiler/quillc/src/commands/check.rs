//! The `check` command: parse a script without running it.

use quill_diagnostic::emitter::DiagnosticEmitter;
use quill_ir::StringInterner;
use quill_parse::parse_source;

use super::{load_script, report, stderr_emitter};
use crate::cli::Options;

/// Parse `source`. Returns the statement count, or `None` after reporting
/// the errors.
pub fn check_source(source: &str, emitter: &mut impl DiagnosticEmitter) -> Option<usize> {
    let interner = StringInterner::new();
    let parsed = parse_source(source, &interner);
    if parsed.has_errors() {
        report(emitter, &parsed.diagnostics());
        return None;
    }
    Some(parsed.statements().len())
}

pub fn check_file(path: &str, options: &Options) -> bool {
    let Some(script) = load_script(path) else {
        return false;
    };
    let display = script.display_path();
    let mut emitter = stderr_emitter(&display, &script.source, options.color);
    match check_source(&script.source, &mut emitter) {
        Some(count) => {
            let plural = if count == 1 { "" } else { "s" };
            println!("OK: {display} ({count} statement{plural})");
            true
        }
        None => false,
    }
}
