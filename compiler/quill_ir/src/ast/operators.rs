//! Binary, unary and assignment operators.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    /// Source-level spelling, used by the printer and in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "and",
            Self::Or => "or",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }

    /// Left and right binding power.
    ///
    /// A right power lower than the left one makes the operator
    /// right-associative.
    pub const fn binding_power(self) -> (u8, u8) {
        match self {
            Self::Pow => (160, 159),
            Self::Mul | Self::Div | Self::Mod => (140, 141),
            Self::Add | Self::Sub => (120, 121),
            Self::Shl | Self::Shr => (110, 111),
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => (100, 101),
            Self::BitAnd => (90, 91),
            Self::BitXor => (80, 81),
            Self::BitOr => (70, 71),
            Self::And => (60, 61),
            Self::Or => (50, 51),
        }
    }

    #[inline]
    pub const fn is_right_assoc(self) -> bool {
        matches!(self, Self::Pow)
    }
}

/// Unary prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "not",
            Self::BitNot => "~",
        }
    }

    /// Binding power of the operand parse.
    pub const BINDING_POWER: u8 = 150;
}

/// Assignment forms. `++`/`--` are postfix updates with no right operand.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    ModAssign,
    Increment,
    Decrement,
}

impl AssignOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::ModAssign => "%=",
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }

    /// Whether the form takes a right-hand operand.
    pub const fn has_operand(self) -> bool {
        !matches!(self, Self::Increment | Self::Decrement)
    }

    /// Binding power of the assignment forms (right-associative).
    pub const BINDING_POWER: (u8, u8) = (40, 40);
}

/// Binding power of member access `.`. Wider than `u8` so it sits above
/// every prefix and infix operator.
pub const MEMBER_BINDING_POWER: (u16, u16) = (260, 270);
