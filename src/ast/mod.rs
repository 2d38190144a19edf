/// AST (Abstract Syntax Tree) module
/// Contains the node kinds and the owned tree node produced by the parser
///
/// Submodules:
/// - ast: `NodeKind`, `Node` and tree helpers
pub mod ast;

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::ast::{Node, NodeKind};
    use crate::{lexer::tokens::TokenKind, Position};

    fn at(line: u32) -> Position {
        Position::new(line, 1, Rc::new("test.rook".to_string()))
    }

    #[test]
    fn test_operator_mapping() {
        assert_eq!(NodeKind::from_binary_token(TokenKind::Plus), Some(NodeKind::Add));
        assert_eq!(
            NodeKind::from_binary_token(TokenKind::LeftShiftAssign),
            Some(NodeKind::ShiftLeftAssign)
        );
        assert_eq!(NodeKind::from_binary_token(TokenKind::Comma), None);
        assert_eq!(NodeKind::from_unary_token(TokenKind::Minus), Some(NodeKind::Neg));
        assert!(NodeKind::AddAssign.is_binary_op());
        assert!(NodeKind::AddAssign.is_assignment());
        assert!(!NodeKind::Add.is_assignment());
        assert!(NodeKind::BitwiseNot.is_unary_op());
        assert!(!NodeKind::If.is_binary_op());
    }

    #[test]
    fn test_contains_kind_skips_nested_functions() {
        let inner = Node::new(NodeKind::Func, "inner", at(2))
            .with_children(vec![Node::new(NodeKind::Return, "", at(3))]);
        let branch = Node::new(NodeKind::If, "", at(4))
            .with_children(vec![Node::new(NodeKind::Return, "", at(5))]);

        let outer = Node::new(NodeKind::Func, "outer", at(1)).with_children(vec![inner]);
        assert!(!outer.contains_kind(NodeKind::Return));

        let outer = Node::new(NodeKind::Func, "outer", at(1)).with_children(vec![branch]);
        assert!(outer.contains_kind(NodeKind::Return));
    }

    #[test]
    fn test_tree_display() {
        let mut root = Node::new(NodeKind::Root, "main.rook", at(1));
        let mut add = Node::new(NodeKind::Add, "+", at(1));
        add.push(Node::new(NodeKind::Identifier, "a", at(1)));
        add.push(Node::new(NodeKind::Literal, "1", at(1)));
        root.push(add);

        assert_eq!(
            root.to_string(),
            "Root(main.rook)\n  Add(+)\n    Identifier(a)\n    Literal(1)\n"
        );
        assert_eq!(root.children_of_kind(NodeKind::Add).count(), 1);
        assert_eq!(root.child(0).map(|n| n.children.len()), Some(2));
    }
}
