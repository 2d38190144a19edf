use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, Position};

/// Node Kinds
///
/// Every kind of node the parser can produce.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum NodeKind {
    Root,
    Identifier,
    Literal,
    Cond,

    Func,
    Param,
    Return,
    ReturnType,
    VarDecl,

    Call,
    Member,
    Index,

    // Binary operators
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,

    // Unary operators
    Not,
    Neg,
    BitwiseNot,

    If,
    Elif,
    Else,
    For,
    While,
    Break,
    Continue,

    Import,
    PkgName,

    Class,
}

impl NodeKind {
    /// Maps an infix operator token to its node kind.
    pub fn from_binary_token(kind: TokenKind) -> Option<NodeKind> {
        let node_kind = match kind {
            TokenKind::Plus => NodeKind::Add,
            TokenKind::Minus => NodeKind::Sub,
            TokenKind::Asterisk => NodeKind::Mul,
            TokenKind::Slash => NodeKind::Div,
            TokenKind::Percent => NodeKind::Mod,
            TokenKind::Assign => NodeKind::Assign,
            TokenKind::PlusAssign => NodeKind::AddAssign,
            TokenKind::MinusAssign => NodeKind::SubAssign,
            TokenKind::AsteriskAssign => NodeKind::MulAssign,
            TokenKind::SlashAssign => NodeKind::DivAssign,
            TokenKind::PercentAssign => NodeKind::ModAssign,
            TokenKind::AndAssign => NodeKind::AndAssign,
            TokenKind::OrAssign => NodeKind::OrAssign,
            TokenKind::XorAssign => NodeKind::XorAssign,
            TokenKind::LeftShiftAssign => NodeKind::ShiftLeftAssign,
            TokenKind::RightShiftAssign => NodeKind::ShiftRightAssign,
            TokenKind::Ampersand => NodeKind::BitwiseAnd,
            TokenKind::Pipe => NodeKind::BitwiseOr,
            TokenKind::Caret => NodeKind::BitwiseXor,
            TokenKind::LeftShift => NodeKind::ShiftLeft,
            TokenKind::RightShift => NodeKind::ShiftRight,
            TokenKind::EqualEqual => NodeKind::Equal,
            TokenKind::NotEqual => NodeKind::NotEqual,
            TokenKind::LessThan => NodeKind::Less,
            TokenKind::LessThanOrEqual => NodeKind::LessEqual,
            TokenKind::GreaterThan => NodeKind::Greater,
            TokenKind::GreaterThanOrEqual => NodeKind::GreaterEqual,
            TokenKind::AndAnd => NodeKind::And,
            TokenKind::OrOr => NodeKind::Or,
            _ => return None,
        };

        Some(node_kind)
    }

    /// Maps a prefix operator token to its node kind.
    pub fn from_unary_token(kind: TokenKind) -> Option<NodeKind> {
        match kind {
            TokenKind::Not => Some(NodeKind::Not),
            TokenKind::Minus => Some(NodeKind::Neg),
            TokenKind::Tilde => Some(NodeKind::BitwiseNot),
            _ => None,
        }
    }

    pub fn is_binary_op(&self) -> bool {
        matches!(
            self,
            NodeKind::Add
                | NodeKind::Sub
                | NodeKind::Mul
                | NodeKind::Div
                | NodeKind::Mod
                | NodeKind::BitwiseAnd
                | NodeKind::BitwiseOr
                | NodeKind::BitwiseXor
                | NodeKind::ShiftLeft
                | NodeKind::ShiftRight
                | NodeKind::Equal
                | NodeKind::NotEqual
                | NodeKind::Less
                | NodeKind::LessEqual
                | NodeKind::Greater
                | NodeKind::GreaterEqual
                | NodeKind::And
                | NodeKind::Or
        ) || self.is_assignment()
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            NodeKind::Assign
                | NodeKind::AddAssign
                | NodeKind::SubAssign
                | NodeKind::MulAssign
                | NodeKind::DivAssign
                | NodeKind::ModAssign
                | NodeKind::AndAssign
                | NodeKind::OrAssign
                | NodeKind::XorAssign
                | NodeKind::ShiftLeftAssign
                | NodeKind::ShiftRightAssign
        )
    }

    pub fn is_unary_op(&self) -> bool {
        matches!(self, NodeKind::Not | NodeKind::Neg | NodeKind::BitwiseNot)
    }
}

/// A syntax tree node.
///
/// A node exclusively owns its children; the tree has no back references.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub label: String,
    pub children: Vec<Node>,
    pub position: Position,
}

impl Node {
    pub fn new(kind: NodeKind, label: impl Into<String>, position: Position) -> Self {
        Node {
            kind,
            label: label.into(),
            children: vec![],
            position,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    /// Searches the subtree below this node for `kind`, not descending into
    /// nested functions.
    pub fn contains_kind(&self, kind: NodeKind) -> bool {
        self.children.iter().any(|child| {
            child.kind == kind || (child.kind != NodeKind::Func && child.contains_kind(kind))
        })
    }

    /// Writes the subtree as an indented outline, one node per line.
    fn write_tree(&self, f: &mut std::fmt::Formatter<'_>, indent: usize) -> std::fmt::Result {
        write!(f, "{}{:?}", "  ".repeat(indent), self.kind)?;
        if !self.label.is_empty() {
            write!(f, "({})", self.label)?;
        }
        writeln!(f)?;

        for child in &self.children {
            child.write_tree(f, indent + 1)?;
        }

        Ok(())
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_tree(f, 0)
    }
}
