//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::fmt::Write;

use quill_fmt::format_program;
use quill_ir::StringInterner;
use quill_lexer::lex;
use quill_parse::parse_source;

use super::load_script;

/// One line per token: position, kind and lexeme, then any lexer errors.
pub fn render_tokens(source: &str) -> String {
    let interner = StringInterner::new();
    let output = lex(source, &interner);

    let mut out = String::new();
    for token in &output.tokens {
        let _ = writeln!(
            out,
            "  {}:{} {} {:?} @ {}",
            token.line,
            token.column,
            token.kind,
            token.lexeme(source),
            token.span
        );
    }
    if output.has_errors() {
        out.push_str("Errors:\n");
        for error in &output.errors {
            let _ = writeln!(out, "  {error}");
        }
    }
    out
}

/// Statement and expression counts, the formatted program and any errors.
pub fn render_parse(path: &str, source: &str) -> String {
    let interner = StringInterner::new();
    let parsed = parse_source(source, &interner);

    let mut out = String::new();
    let _ = writeln!(out, "Parse result for '{path}':");
    let _ = writeln!(out, "  Statements: {}", parsed.statements().len());
    let _ = writeln!(out, "  Expressions: {}", parsed.arena.expr_count());
    let _ = writeln!(out, "  Errors: {}", parsed.errors.len());

    if parsed.has_errors() {
        out.push_str("\nErrors:\n");
        for error in &parsed.errors {
            let _ = writeln!(out, "  {error}");
        }
    } else if !parsed.statements().is_empty() {
        out.push_str("\nProgram:\n");
        out.push_str(&format_program(&parsed.arena, parsed.program, &interner));
    }
    out
}

pub fn lex_file(path: &str) -> bool {
    let Some(script) = load_script(path) else {
        return false;
    };
    let rendered = render_tokens(&script.source);
    println!("Tokens for '{}':", script.display_path());
    print!("{rendered}");
    true
}

pub fn parse_file(path: &str) -> bool {
    let Some(script) = load_script(path) else {
        return false;
    };
    print!("{}", render_parse(&script.display_path(), &script.source));
    true
}
