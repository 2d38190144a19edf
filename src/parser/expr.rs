use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    parser.enter_nesting()?;
    let expr = parse_expr_at_depth(parser, bp);
    parser.leave_nesting();

    expr
}

fn parse_expr_at_depth(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    found: parser.current_token().source_text(),
                },
                parser.position(),
            ))
        }
    };

    let mut left = nud_fn(parser)?;

    // While the lookahead binds tighter than `bp`, keep extending lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led_fn = match parser.get_led_lookup().get(&token_kind) {
            Some(led_fn) => *led_fn,
            None => break,
        };

        let token_bp = parser.current_binding_power();
        left = led_fn(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance();
    let kind = match token.kind {
        TokenKind::Identifier | TokenKind::This | TokenKind::Super => NodeKind::Identifier,
        _ => NodeKind::Literal,
    };

    Ok(Node::new(kind, token.source_text(), token.span.start))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Node, Error> {
    let operator = parser.advance();
    let kind = NodeKind::from_unary_token(operator.kind).ok_or_else(|| unexpected(&operator))?;

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Node::new(kind, operator.value, operator.span.start).with_children(vec![operand]))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_or_assume(TokenKind::RightParen);

    Ok(expr)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, bp: BindingPower) -> Result<Node, Error> {
    let operator = parser.advance();
    let kind = NodeKind::from_binary_token(operator.kind).ok_or_else(|| unexpected(&operator))?;

    let right = parse_expr(parser, bp)?;

    let position = left.position.clone();
    Ok(Node::new(kind, operator.value, position).with_children(vec![left, right]))
}

/// Assignments are right associative, except in uniform mode where every
/// operator chains left to right.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Node,
    bp: BindingPower,
) -> Result<Node, Error> {
    let operator = parser.advance();
    let kind = NodeKind::from_binary_token(operator.kind).ok_or_else(|| unexpected(&operator))?;

    let rhs_bp = if parser.uniform_precedence() {
        bp
    } else {
        BindingPower::Comma
    };
    let value = parse_expr(parser, rhs_bp)?;

    let position = left.position.clone();
    Ok(Node::new(kind, operator.value, position).with_children(vec![left, value]))
}

/// `callee(args...)` becomes `Call(callee)` with the callee as first child.
pub fn parse_call_expr(parser: &mut Parser, callee: Node, _bp: BindingPower) -> Result<Node, Error> {
    parser.advance();

    let mut call = Node::new(NodeKind::Call, callee.label.clone(), callee.position.clone());
    call.push(callee);

    while !matches!(
        parser.current_token_kind(),
        TokenKind::RightParen | TokenKind::EOF
    ) {
        call.push(parse_expr(parser, BindingPower::Comma)?);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect_or_assume(TokenKind::RightParen);

    Ok(call)
}

pub fn parse_member_expr(parser: &mut Parser, object: Node, _bp: BindingPower) -> Result<Node, Error> {
    parser.advance();

    let error = parser.identifier_error("after `.`");
    let member = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let position = object.position.clone();
    Ok(Node::new(NodeKind::Member, ".", position).with_children(vec![
        object,
        Node::new(NodeKind::Identifier, member.value, member.span.start),
    ]))
}

pub fn parse_index_expr(parser: &mut Parser, object: Node, _bp: BindingPower) -> Result<Node, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::RightBracket)?;

    let position = object.position.clone();
    Ok(Node::new(NodeKind::Index, "[]", position).with_children(vec![object, index]))
}

fn unexpected(token: &Token) -> Error {
    Error::new(
        ErrorImpl::UnexpectedToken {
            token: token.value.clone(),
        },
        token.span.start.clone(),
    )
}
