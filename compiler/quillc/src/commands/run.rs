//! The `run` command: parse and evaluate a script.

use quill_diagnostic::emitter::DiagnosticEmitter;
use quill_eval::{stdout_handler, SharedPrintHandler};

use super::{load_script, report, stderr_emitter};
use crate::cli::Options;

/// Run the script at `path`, printing to stdout and diagnostics to stderr.
pub fn run_file(path: &str, options: &Options) -> bool {
    let Some(script) = load_script(path) else {
        return false;
    };
    let display = script.display_path();
    let mut emitter = stderr_emitter(&display, &script.source, options.color);
    run_source(&script.source, options, stdout_handler(), &mut emitter)
}

/// Run `source` in a fresh interpreter.
///
/// Parse errors stop the run before anything executes. A runtime error is
/// reported with its backtrace. The value of the last statement is dropped.
pub fn run_source(
    source: &str,
    options: &Options,
    print_handler: SharedPrintHandler,
    emitter: &mut impl DiagnosticEmitter,
) -> bool {
    let mut interpreter = options.interpreter(print_handler);
    match interpreter.interpret(source) {
        Ok(_) => true,
        Err(err) => {
            report(emitter, &err.diagnostics());
            false
        }
    }
}
