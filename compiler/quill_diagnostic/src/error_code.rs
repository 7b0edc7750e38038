use std::fmt;

/// Error codes for Quill diagnostics.
///
/// Format: E#### where the first digit is the phase:
/// - E0xxx: lexer
/// - E1xxx: parser (syntax)
/// - E2xxx: parser (context checks)
/// - E3xxx: evaluator (runtime)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unrecognized character
    E0002,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Invalid assignment target
    E1005,
    /// Missing `end`
    E1006,
    /// `use` without a string path
    E1007,

    // Context Errors (E2xxx)
    /// `return` outside of a function
    E2001,
    /// `break` outside of a loop
    E2002,
    /// `continue` outside of a loop
    E2003,

    // Runtime Errors (E3xxx)
    /// Undefined or duplicate name
    E3001,
    /// Operand or value of the wrong type
    E3002,
    /// Wrong number of arguments
    E3003,
    /// Index out of range or not an integer
    E3004,
    /// Division or modulo by zero
    E3005,
    /// Call depth limit exceeded
    E3006,
    /// Step budget exhausted
    E3007,
    /// Construct not supported by this host
    E3008,
    /// Native function failed
    E3009,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
        }
    }

    /// One-line description for `quill explain`-style listings.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "unrecognized character",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 => "invalid assignment target",
            ErrorCode::E1006 => "missing `end`",
            ErrorCode::E1007 => "`use` requires a string path",
            ErrorCode::E2001 => "`return` outside of a function",
            ErrorCode::E2002 => "`break` outside of a loop",
            ErrorCode::E2003 => "`continue` outside of a loop",
            ErrorCode::E3001 => "name error",
            ErrorCode::E3002 => "type error",
            ErrorCode::E3003 => "wrong number of arguments",
            ErrorCode::E3004 => "index out of range",
            ErrorCode::E3005 => "arithmetic error",
            ErrorCode::E3006 => "call depth limit exceeded",
            ErrorCode::E3007 => "step budget exhausted",
            ErrorCode::E3008 => "unsupported construct",
            ErrorCode::E3009 => "native function failed",
        }
    }

    pub const fn is_lexer_error(self) -> bool {
        matches!(self, ErrorCode::E0001 | ErrorCode::E0002)
    }

    /// Whether this code comes from the parser's context checks rather than
    /// the grammar.
    pub const fn is_context_error(self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003)
    }

    pub const fn is_runtime_error(self) -> bool {
        matches!(
            self,
            ErrorCode::E3001
                | ErrorCode::E3002
                | ErrorCode::E3003
                | ErrorCode::E3004
                | ErrorCode::E3005
                | ErrorCode::E3006
                | ErrorCode::E3007
                | ErrorCode::E3008
                | ErrorCode::E3009
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
