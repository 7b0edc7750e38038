use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quill_ir::{StringInterner, TokenKind};

use crate::{lex, LexErrorKind, Lexer};

fn kinds(source: &str) -> Vec<TokenKind> {
    let interner = StringInterner::new();
    lex(source, &interner)
        .tokens
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_basic_assignment() {
    let interner = StringInterner::new();
    let out = lex("x = 42", &interner);
    let x = interner.intern("x");
    let got: Vec<_> = out.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        got,
        vec![
            TokenKind::Ident(x),
            TokenKind::Eq,
            TokenKind::number(42.0),
            TokenKind::Eof
        ]
    );
    assert!(!out.has_errors());
}

#[test]
fn test_keywords_and_aliases() {
    assert_eq!(
        kinds("if elif else end match switch function on use"),
        vec![
            TokenKind::If,
            TokenKind::Elif,
            TokenKind::Else,
            TokenKind::End,
            TokenKind::Switch,
            TokenKind::Switch,
            TokenKind::Function,
            TokenKind::On,
            TokenKind::Use,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let interner = StringInterner::new();
    let out = lex("ending format", &interner);
    assert_eq!(
        out.tokens.get(0).map(|t| t.kind),
        Some(TokenKind::Ident(interner.intern("ending")))
    );
    assert_eq!(
        out.tokens.get(1).map(|t| t.kind),
        Some(TokenKind::Ident(interner.intern("format")))
    );
}

#[test]
fn test_multi_char_operators() {
    assert_eq!(
        kinds("== != <= >= += -= %= ++ -- ** << >>"),
        vec![
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::PercentEq,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::StarStar,
            TokenKind::Shl,
            TokenKind::Shr,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_minus_is_never_part_of_a_number() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let out = lex("a -5", &interner);
    let got: Vec<_> = out.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        got,
        vec![
            TokenKind::Ident(a),
            TokenKind::Minus,
            TokenKind::number(5.0),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_fractional_numbers() {
    assert_eq!(
        kinds("3.25 10"),
        vec![
            TokenKind::number(3.25),
            TokenKind::number(10.0),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_comments_and_whitespace_skipped() {
    assert_eq!(
        kinds("# leading comment\n  1 # trailing\n\t2"),
        vec![TokenKind::number(1.0), TokenKind::number(2.0), TokenKind::Eof]
    );
}

#[test]
fn test_string_escapes_are_cooked() {
    let interner = StringInterner::new();
    let out = lex(r#""a\tb\n" 'it\'s'"#, &interner);
    assert_eq!(
        out.tokens.get(0).map(|t| t.kind),
        Some(TokenKind::Str(interner.intern("a\tb\n")))
    );
    assert_eq!(
        out.tokens.get(1).map(|t| t.kind),
        Some(TokenKind::Str(interner.intern("it's")))
    );
}

#[test]
fn test_unterminated_string_is_an_error() {
    let interner = StringInterner::new();
    let out = lex("x = \"never closed", &interner);
    assert_eq!(out.errors.len(), 1);
    let err = &out.errors[0];
    assert_eq!(err.kind, LexErrorKind::UnterminatedString { quote: '"' });
    assert_eq!((err.line, err.column), (1, 5));
    // The partial body is still delivered so parsing can continue.
    assert_eq!(
        out.tokens.get(2).map(|t| t.kind),
        Some(TokenKind::Str(interner.intern("never closed")))
    );
    assert_eq!(out.tokens.get(3).map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_unknown_characters() {
    assert_eq!(
        kinds("a ! @"),
        vec![
            TokenKind::Ident(StringInterner::new().intern("a")),
            TokenKind::Unknown('!'),
            TokenKind::Unknown('@'),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_line_and_column_tracking() {
    let interner = StringInterner::new();
    let out = lex("x = 1\n  print(x)", &interner);
    let positions: Vec<_> = out.tokens.iter().map(|t| (t.line, t.column)).collect();
    assert_eq!(
        positions,
        vec![(1, 1), (1, 3), (1, 5), (2, 3), (2, 8), (2, 9), (2, 10), (2, 11)]
    );
}

#[test]
fn test_long_single_line_lexes_in_linear_time() {
    let interner = StringInterner::new();
    let source = "x = 1 ".repeat(40_000);

    let start = std::time::Instant::now();
    let out = lex(&source, &interner);
    let elapsed = start.elapsed();

    assert_eq!(out.tokens.len(), 120_001);
    let last = out.tokens.get(119_999).map(|t| (t.line, t.column));
    assert_eq!(last, Some((1, 239_999)));
    assert!(
        elapsed < std::time::Duration::from_secs(5),
        "lexing one long line took {elapsed:?}"
    );
}

#[test]
fn test_next_token_on_demand() {
    let interner = StringInterner::new();
    let mut lexer = Lexer::new("break", &interner);
    assert_eq!(lexer.next_token().kind, TokenKind::Break);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert!(lexer.errors().is_empty());
}

#[test]
fn test_lexeme_recovers_source_text() {
    let interner = StringInterner::new();
    let source = "total += 2.5";
    let out = lex(source, &interner);
    let lexemes: Vec<_> = out.tokens.iter().map(|t| t.lexeme(source)).collect();
    assert_eq!(lexemes, vec!["total", "+=", "2.5", ""]);
}

proptest! {
    #[test]
    fn prop_lexing_never_panics_and_ends_with_eof(source in "\\PC{0,64}") {
        let interner = StringInterner::new();
        let out = lex(&source, &interner);
        prop_assert_eq!(out.tokens.as_slice().last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn prop_spans_are_ordered(source in "[a-z0-9 +*()=\"#\n-]{0,64}") {
        let interner = StringInterner::new();
        let out = lex(&source, &interner);
        let spans: Vec<_> = out.tokens.iter().map(|t| t.span).collect();
        for pair in spans.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }
}
