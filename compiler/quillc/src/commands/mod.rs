//! Command implementations.
//!
//! Every command reports its own errors and returns `true` on success so
//! `main` can pick the exit code.

mod check;
mod debug;
mod fmt;
mod run;

use std::io::{IsTerminal, Stderr};

use quill_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use quill_diagnostic::Diagnostic;

use crate::cli::{Command, Invocation};
use crate::loader::{self, LoadError, Script};

pub use check::{check_file, check_source};
pub use debug::{lex_file, parse_file, render_parse, render_tokens};
pub use fmt::{format_file, format_source};
pub use run::{run_file, run_source};

/// Run one parsed invocation.
pub fn execute(invocation: &Invocation) -> bool {
    let options = &invocation.options;
    match &invocation.command {
        Command::Run { path } => run_file(path, options),
        Command::Check { path } => check_file(path, options),
        Command::Lex { path } => lex_file(path),
        Command::Parse { path } => parse_file(path),
        Command::Fmt { path, check } => format_file(path, *check, options),
        Command::Help => {
            print_usage();
            true
        }
        Command::Version => {
            println!("{}", version());
            true
        }
    }
}

pub fn version() -> String {
    format!("Quill {}", env!("CARGO_PKG_VERSION"))
}

pub fn usage() -> &'static str {
    "\
Quill script runner

Usage: quill <command> [options]
       quill <file.ql> [options]

Commands:
  run <file.ql>        Run a script
  check <file.ql>      Parse a script without running it
  fmt <file.ql>        Print the formatted script
  parse <file.ql>      Parse and display program info
  lex <file.ql>        Tokenize and display tokens
  help                 Show this help message
  version              Show version information

Options:
  --budget=<n>         Abort after n statements per run
  --max-depth=<n>      Script call depth limit (default 512)
  --color=<mode>       Diagnostic colors: auto, always, never
  --check              With fmt: fail if the file is not formatted

Set RUST_LOG to enable tracing output, and QUILL_LOG_TREE for nested spans."
}

pub fn print_usage() {
    println!("{}", usage());
}

/// Load `path`, printing the error on failure.
fn load_script(path: &str) -> Option<Script> {
    match loader::load(path) {
        Ok(script) => Some(script),
        Err(err) => {
            eprintln!("error: {err}");
            if let LoadError::NotFound { searched, .. } = &err {
                tracing::debug!(?searched, "script lookup failed");
            }
            None
        }
    }
}

/// Terminal emitter on stderr with source snippets for `path`.
fn stderr_emitter<'src>(
    path: &'src str,
    source: &'src str,
    color: ColorMode,
) -> TerminalEmitter<'src, Stderr> {
    let is_tty = std::io::stderr().is_terminal();
    TerminalEmitter::with_color_mode(std::io::stderr(), color, is_tty).with_source(path, source)
}

/// Emit `diagnostics` followed by the summary line.
fn report(emitter: &mut impl DiagnosticEmitter, diagnostics: &[Diagnostic]) {
    emitter.emit_all(diagnostics);
    let errors = diagnostics.iter().filter(|diag| diag.is_error()).count();
    emitter.emit_summary(errors, diagnostics.len() - errors);
    emitter.flush();
}
