//! Panic-mode error recovery.
//!
//! After a syntax error the parser discards tokens until it reaches a point
//! where a new statement can start or the enclosing body ends.

use quill_ir::TokenKind;

use crate::cursor::Cursor;

/// Bitset of token kinds, indexed by `TokenKind::discriminant_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    #[allow(clippy::needless_pass_by_value)] // const fn builder for static initialization
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: &TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }
}

/// Tokens that close a body.
pub const BODY_END: TokenSet = TokenSet::new()
    .with(TokenKind::End)
    .with(TokenKind::Else)
    .with(TokenKind::Elif)
    .with(TokenKind::Case)
    .with(TokenKind::Default)
    .with(TokenKind::Eof);

/// Keywords that can only begin a statement.
pub const STMT_START: TokenSet = TokenSet::new()
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::For)
    .with(TokenKind::Function)
    .with(TokenKind::On)
    .with(TokenKind::Use)
    .with(TokenKind::Return)
    .with(TokenKind::Break)
    .with(TokenKind::Continue)
    .with(TokenKind::Switch);

/// Where [`synchronize`] stops.
pub const RECOVERY: TokenSet = BODY_END.union(STMT_START);

/// Skip tokens until one in `recovery` (not consumed). Returns the number of
/// tokens skipped.
pub fn synchronize(cursor: &mut Cursor<'_>, recovery: TokenSet) -> usize {
    let mut skipped = 0;
    while !cursor.is_at_end() && !recovery.contains(&cursor.current_kind()) {
        cursor.advance();
        skipped += 1;
    }
    skipped
}
