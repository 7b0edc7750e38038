//! Raw logos token definitions, before interning and escape cooking.

use logos::Logos;

fn parse_number(lex: &logos::Lexer<'_, RawToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
pub(crate) enum RawToken {
    // === Keywords ===
    #[token("use")]
    Use,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("elif")]
    Elif,
    #[token("end")]
    End,
    #[token("function")]
    Function,
    #[token("while")]
    While,
    #[token("continue")]
    Continue,
    #[token("break")]
    Break,
    #[token("return")]
    Return,
    #[token("switch")]
    #[token("match")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("on")]
    On,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // === Literals ===
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    #[regex(r#"'([^'\\]|\\(.|\n))*'"#)]
    Str,
    /// A string running to end of input. Only wins when no closing quote
    /// exists, since logos prefers the longer terminated match.
    #[regex(r#""([^"\\]|\\(.|\n))*"#)]
    #[regex(r#"'([^'\\]|\\(.|\n))*"#)]
    UnterminatedStr,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("%=")]
    PercentEq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
}
