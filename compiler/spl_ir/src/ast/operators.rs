//! Binary, unary and compound-assignment operators with their static
//! precedence table.
//!
//! Precedence here is "higher binds tighter"; the builder adds
//! [`GROUP_PRECEDENCE`] for every enclosing parenthesis.

/// Extra precedence added per level of parenthesis nesting.
pub const GROUP_PRECEDENCE: u32 = 1000;

/// Precedence of the `return` prefix, lower than every other operator.
pub const RETURN_PRECEDENCE: u32 = 1;

/// Precedence shared by every compound assignment (`+=`, `<<=`, ...).
pub const COMPOUND_ASSIGN_PRECEDENCE: u32 = 2;

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
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
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            "===" => Self::StrictEq,
            "!==" => Self::StrictNotEq,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            "&&" => Self::And,
            "||" => Self::Or,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            _ => return None,
        })
    }

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }

    /// Returns the precedence level of this operator.
    ///
    /// - 100: `*` `/` `%`
    /// - 50: `+` `-`
    /// - 40: `<<` `>>`
    /// - 25: `<` `>` `<=` `>=`
    /// - 20: `==` `!=` `===` `!==`
    /// - 12: `&`
    /// - 11: `^`
    /// - 10: `|`
    /// - 5: `&&` `||`
    pub const fn precedence(self) -> u32 {
        match self {
            Self::Mul | Self::Div | Self::Mod => 100,
            Self::Add | Self::Sub => 50,
            Self::Shl | Self::Shr => 40,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 25,
            Self::Eq | Self::NotEq | Self::StrictEq | Self::StrictNotEq => 20,
            Self::BitAnd => 12,
            Self::BitXor => 11,
            Self::BitOr => 10,
            Self::And | Self::Or => 5,
        }
    }

    /// Whether the right operand is only evaluated on demand.
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    /// Only `!` is unambiguous; `-` is classified by the builder from the
    /// preceding token.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "!" => Some(Self::Not),
            _ => None,
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
        }
    }

    pub const fn precedence(self) -> u32 {
        match self {
            Self::Not | Self::Neg => 200,
        }
    }
}

/// Compound assignment such as `x += 1`, carrying the underlying binary op.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct AssignOp(pub BinaryOp);

impl AssignOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+=" => BinaryOp::Add,
            "-=" => BinaryOp::Sub,
            "*=" => BinaryOp::Mul,
            "/=" => BinaryOp::Div,
            "%=" => BinaryOp::Mod,
            "&=" => BinaryOp::BitAnd,
            "^=" => BinaryOp::BitXor,
            "|=" => BinaryOp::BitOr,
            "<<=" => BinaryOp::Shl,
            ">>=" => BinaryOp::Shr,
            _ => return None,
        };
        Some(AssignOp(op))
    }

    #[inline]
    pub const fn binary(self) -> BinaryOp {
        self.0
    }

    #[inline]
    pub const fn precedence(self) -> u32 {
        COMPOUND_ASSIGN_PRECEDENCE
    }
}

/// Words the builder never treats as plain identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "class", "function", "def", "if", "else", "new", "extends", "return", "break", "continue",
    "true", "false", "null", "operator", "while", "for", "import", "throw", "try", "catch",
    "finally", "abstract", "const", "var", "let",
];

pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}
