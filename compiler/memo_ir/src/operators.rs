//! Binary and Unary Operators
//!
//! The operator sets mirror what an upstream tree builder can produce, not
//! what the evaluator accepts. The evaluator only reduces the arithmetic
//! subset (`is_arithmetic` / `is_negation`) and rejects everything else.
//!
//! All types are `Copy` and hashable so they can be embedded in error kinds.

/// Binary operators.
///
/// Checked variants (`AddChecked`, ...) exist because host trees distinguish
/// overflow-checked contexts. They fold exactly like their unchecked forms.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    AddChecked,
    Sub,
    SubChecked,
    Mul,
    MulChecked,
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

    // Other
    Coalesce,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used when printing trees and in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            // Arithmetic
            Self::Add | Self::AddChecked => "+",
            Self::Sub | Self::SubChecked => "-",
            Self::Mul | Self::MulChecked => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            // Comparison
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            // Logical
            Self::And => "&&",
            Self::Or => "||",
            // Bitwise
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            // Other
            Self::Coalesce => "??",
        }
    }

    /// Whether the evaluator folds this operator.
    ///
    /// Exactly the five integer kinds (add, subtract, multiply, divide,
    /// modulo) in their checked and unchecked forms.
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::AddChecked
                | Self::Sub
                | Self::SubChecked
                | Self::Mul
                | Self::MulChecked
                | Self::Div
                | Self::Mod
        )
    }

    /// Collapse a checked variant onto its plain form.
    #[must_use]
    pub const fn unchecked(self) -> Self {
        match self {
            Self::AddChecked => Self::Add,
            Self::SubChecked => Self::Sub,
            Self::MulChecked => Self::Mul,
            other => other,
        }
    }

    /// Returns the precedence level of this operator.
    ///
    /// Higher number = lower precedence (binds less tightly).
    /// Used by the tree printer to decide where parentheses are needed.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Pow => 2,
            Self::Mul | Self::MulChecked | Self::Div | Self::Mod => 3,
            Self::Add | Self::AddChecked | Self::Sub | Self::SubChecked => 4,
            Self::Shl | Self::Shr => 5,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 7,
            Self::Eq | Self::NotEq => 8,
            Self::BitAnd => 9,
            Self::BitXor => 10,
            Self::BitOr => 11,
            Self::And => 12,
            Self::Or => 13,
            Self::Coalesce => 14,
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    NegChecked,
    Plus,
    Not,
    BitNot,
}

impl UnaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg | Self::NegChecked => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }

    /// Whether this is arithmetic negation, the only unary form the
    /// evaluator folds.
    pub const fn is_negation(self) -> bool {
        matches!(self, Self::Neg | Self::NegChecked)
    }
}
