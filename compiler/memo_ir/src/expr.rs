//! Expression tree nodes.
//!
//! The tree is built once by the caller and never mutated. It is a plain
//! owned tree (`Box` children) with no arena. Dropping is iterative, so
//! arbitrarily deep chains are released without recursion.

use std::fmt;

use crate::operators::{BinaryOp, UnaryOp};
use crate::value::Value;

/// Node shapes a host tree builder can emit that this model does not
/// support. They are representable so they can be rejected, never coerced.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ForeignKind {
    /// Explicit numeric conversion / cast.
    Convert,
    Conditional,
    Parameter,
    MemberAccess,
    Index,
    Assign,
    Block,
    Loop,
    New,
}

impl ForeignKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Convert => "Convert",
            Self::Conditional => "Conditional",
            Self::Parameter => "Parameter",
            Self::MemberAccess => "MemberAccess",
            Self::Index => "Index",
            Self::Assign => "Assign",
            Self::Block => "Block",
            Self::Loop => "Loop",
            Self::New => "New",
        }
    }
}

impl fmt::Display for ForeignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field-less tag of an [`ExprNode`], carried by errors.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    Constant,
    Unary,
    Binary,
    Call,
    Lambda,
    Foreign(ForeignKind),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Constant => f.write_str("Constant"),
            NodeKind::Unary => f.write_str("Unary"),
            NodeKind::Binary => f.write_str("Binary"),
            NodeKind::Call => f.write_str("Call"),
            NodeKind::Lambda => f.write_str("Lambda"),
            NodeKind::Foreign(kind) => kind.fmt(f),
        }
    }
}

/// Expression tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprNode {
    /// Literal constant.
    Constant(Value),

    /// Unary operation. Only negation is evaluable.
    Unary { op: UnaryOp, operand: Box<ExprNode> },

    /// Binary operation. Only the arithmetic kinds are evaluable.
    Binary {
        op: BinaryOp,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },

    /// Call to a named native function.
    ///
    /// Arity is not bounded here; the evaluator enforces its limit.
    Call { function: String, args: Vec<ExprNode> },

    /// Lambda wrapper. Legal only at the root, and only without parameters.
    Lambda {
        params: Vec<String>,
        body: Box<ExprNode>,
    },

    /// A node shape outside the model.
    Foreign {
        kind: ForeignKind,
        operands: Vec<ExprNode>,
    },
}

impl ExprNode {
    pub fn int(n: i64) -> Self {
        ExprNode::Constant(Value::Int(n))
    }

    pub fn float(x: f64) -> Self {
        ExprNode::Constant(Value::Float(x))
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        ExprNode::Constant(value.into())
    }

    pub fn unary(op: UnaryOp, operand: ExprNode) -> Self {
        ExprNode::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn neg(operand: ExprNode) -> Self {
        Self::unary(UnaryOp::Neg, operand)
    }

    pub fn binary(op: BinaryOp, left: ExprNode, right: ExprNode) -> Self {
        ExprNode::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add(left: ExprNode, right: ExprNode) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    pub fn sub(left: ExprNode, right: ExprNode) -> Self {
        Self::binary(BinaryOp::Sub, left, right)
    }

    pub fn mul(left: ExprNode, right: ExprNode) -> Self {
        Self::binary(BinaryOp::Mul, left, right)
    }

    pub fn div(left: ExprNode, right: ExprNode) -> Self {
        Self::binary(BinaryOp::Div, left, right)
    }

    pub fn rem(left: ExprNode, right: ExprNode) -> Self {
        Self::binary(BinaryOp::Mod, left, right)
    }

    pub fn call(function: impl Into<String>, args: Vec<ExprNode>) -> Self {
        ExprNode::Call {
            function: function.into(),
            args,
        }
    }

    /// Zero-parameter lambda wrapping `body`: the only legal root.
    pub fn lambda(body: ExprNode) -> Self {
        Self::lambda_with_params(Vec::new(), body)
    }

    pub fn lambda_with_params(params: Vec<String>, body: ExprNode) -> Self {
        ExprNode::Lambda {
            params,
            body: Box::new(body),
        }
    }

    pub fn foreign(kind: ForeignKind, operands: Vec<ExprNode>) -> Self {
        ExprNode::Foreign { kind, operands }
    }

    /// Explicit numeric conversion of `operand`.
    pub fn convert(operand: ExprNode) -> Self {
        Self::foreign(ForeignKind::Convert, vec![operand])
    }

    /// The node's tag.
    pub const fn kind(&self) -> NodeKind {
        match self {
            ExprNode::Constant(_) => NodeKind::Constant,
            ExprNode::Unary { .. } => NodeKind::Unary,
            ExprNode::Binary { .. } => NodeKind::Binary,
            ExprNode::Call { .. } => NodeKind::Call,
            ExprNode::Lambda { .. } => NodeKind::Lambda,
            ExprNode::Foreign { kind, .. } => NodeKind::Foreign(*kind),
        }
    }
}

impl From<i64> for ExprNode {
    fn from(n: i64) -> Self {
        ExprNode::int(n)
    }
}

// Printing

impl ExprNode {
    /// Printed form with every subtree deeper than `depth` levels below
    /// this node elided as `…`.
    ///
    /// The full [`Display`](fmt::Display) recurses once per level; use this
    /// for descriptions of nodes that may root deep trees.
    pub fn truncated(&self, depth: usize) -> impl fmt::Display + '_ {
        Printer { node: self, depth }
    }
}

/// Depth-limited printer. `depth == 0` prints `…`.
struct Printer<'a> {
    node: &'a ExprNode,
    depth: usize,
}

impl<'a> Printer<'a> {
    fn child(&self, node: &'a ExprNode) -> Printer<'a> {
        Printer {
            node,
            depth: self.depth.saturating_sub(1),
        }
    }

    /// Write `child` as an operand of a binary operator with precedence
    /// `parent`, adding parentheses only where the grouping would otherwise
    /// be lost.
    fn fmt_operand(
        &self,
        f: &mut fmt::Formatter<'_>,
        child: &'a ExprNode,
        parent: u8,
        right: bool,
    ) -> fmt::Result {
        let printed = self.child(child);
        if let ExprNode::Binary { op, .. } = child {
            let prec = op.precedence();
            if printed.depth > 0 && (prec > parent || (right && prec == parent)) {
                return write!(f, "({printed})");
            }
        }
        write!(f, "{printed}")
    }

    fn fmt_list(&self, f: &mut fmt::Formatter<'_>, items: &'a [ExprNode]) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", self.child(item))?;
        }
        Ok(())
    }
}

/// A unary operand needs grouping when it starts with an operator of its own.
fn needs_unary_parens(operand: &ExprNode) -> bool {
    match operand {
        ExprNode::Unary { .. } | ExprNode::Binary { .. } => true,
        ExprNode::Constant(Value::Int(n)) => *n < 0,
        ExprNode::Constant(Value::Float(x)) => x.is_sign_negative(),
        _ => false,
    }
}

impl fmt::Display for Printer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.depth == 0 {
            return f.write_str("…");
        }
        match self.node {
            ExprNode::Constant(value) => write!(f, "{value}"),
            ExprNode::Unary { op, operand } => {
                f.write_str(op.as_symbol())?;
                let printed = self.child(operand);
                if printed.depth > 0 && needs_unary_parens(operand) {
                    write!(f, "({printed})")
                } else {
                    write!(f, "{printed}")
                }
            }
            ExprNode::Binary { op, left, right } => {
                let prec = op.precedence();
                self.fmt_operand(f, left, prec, false)?;
                write!(f, " {} ", op.as_symbol())?;
                self.fmt_operand(f, right, prec, true)
            }
            ExprNode::Call { function, args } => {
                write!(f, "{function}(")?;
                self.fmt_list(f, args)?;
                f.write_str(")")
            }
            ExprNode::Lambda { params, body } => {
                write!(f, "({}) => {}", params.join(", "), self.child(body))
            }
            ExprNode::Foreign { kind, operands } => {
                write!(f, "{kind}(")?;
                self.fmt_list(f, operands)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer {
            node: self,
            depth: usize::MAX,
        }
        .fmt(f)
    }
}

// Dropping

/// Placeholder left behind in a box whose child was moved out for dropping.
const HOLLOW: ExprNode = ExprNode::Constant(Value::Unit);

impl ExprNode {
    const fn is_leaf(&self) -> bool {
        matches!(self, ExprNode::Constant(_))
    }

    /// Move every non-leaf child of `self` onto `out`.
    fn take_children(&mut self, out: &mut Vec<ExprNode>) {
        let mut take = |slot: &mut ExprNode| {
            if !slot.is_leaf() {
                out.push(std::mem::replace(slot, HOLLOW));
            }
        };
        match self {
            ExprNode::Constant(_) => {}
            ExprNode::Unary { operand: child, .. } | ExprNode::Lambda { body: child, .. } => {
                take(child.as_mut());
            }
            ExprNode::Binary { left, right, .. } => {
                take(left.as_mut());
                take(right.as_mut());
            }
            ExprNode::Call { args: children, .. }
            | ExprNode::Foreign {
                operands: children, ..
            } => children.iter_mut().for_each(take),
        }
    }
}

// Children are released through a worklist; dropping never recurses.
impl Drop for ExprNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}
