use std::collections::HashMap;

use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Comma,
    Assignment,
    Logical,
    Bitwise,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type LEDHandler = fn(&mut Parser, Node, BindingPower) -> Result<Node, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // In uniform mode every binary and assignment operator shares one level.
    let uniform = parser.uniform_precedence();
    let level = |bp: BindingPower| {
        if uniform {
            BindingPower::Assignment
        } else {
            bp
        }
    };

    // Assignment
    for kind in [
        TokenKind::Assign,
        TokenKind::PlusAssign,
        TokenKind::MinusAssign,
        TokenKind::AsteriskAssign,
        TokenKind::SlashAssign,
        TokenKind::PercentAssign,
        TokenKind::AndAssign,
        TokenKind::OrAssign,
        TokenKind::XorAssign,
        TokenKind::LeftShiftAssign,
        TokenKind::RightShiftAssign,
    ] {
        parser.led(kind, BindingPower::Assignment, parse_assignment_expr);
    }

    // Logical
    parser.led(TokenKind::AndAnd, level(BindingPower::Logical), parse_binary_expr);
    parser.led(TokenKind::OrOr, level(BindingPower::Logical), parse_binary_expr);

    // Bitwise
    parser.led(TokenKind::Ampersand, level(BindingPower::Bitwise), parse_binary_expr);
    parser.led(TokenKind::Pipe, level(BindingPower::Bitwise), parse_binary_expr);
    parser.led(TokenKind::Caret, level(BindingPower::Bitwise), parse_binary_expr);

    // Relational
    parser.led(TokenKind::LessThan, level(BindingPower::Relational), parse_binary_expr);
    parser.led(TokenKind::LessThanOrEqual, level(BindingPower::Relational), parse_binary_expr);
    parser.led(TokenKind::GreaterThan, level(BindingPower::Relational), parse_binary_expr);
    parser.led(TokenKind::GreaterThanOrEqual, level(BindingPower::Relational), parse_binary_expr);
    parser.led(TokenKind::EqualEqual, level(BindingPower::Relational), parse_binary_expr);
    parser.led(TokenKind::NotEqual, level(BindingPower::Relational), parse_binary_expr);

    // Shift
    parser.led(TokenKind::LeftShift, level(BindingPower::Shift), parse_binary_expr);
    parser.led(TokenKind::RightShift, level(BindingPower::Shift), parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, level(BindingPower::Additive), parse_binary_expr);
    parser.led(TokenKind::Minus, level(BindingPower::Additive), parse_binary_expr);
    parser.led(TokenKind::Asterisk, level(BindingPower::Multiplicative), parse_binary_expr);
    parser.led(TokenKind::Slash, level(BindingPower::Multiplicative), parse_binary_expr);
    parser.led(TokenKind::Percent, level(BindingPower::Multiplicative), parse_binary_expr);

    // Call, index and member
    parser.led(TokenKind::LeftParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::LeftBracket, BindingPower::Call, parse_index_expr);
    parser.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);

    // Literals and symbols
    for kind in [
        TokenKind::IntegerLiteral,
        TokenKind::FloatingLiteral,
        TokenKind::StringLiteral,
        TokenKind::CharLiteral,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Null,
        TokenKind::Identifier,
        TokenKind::This,
        TokenKind::Super,
    ] {
        parser.nud(kind, parse_primary_expr);
    }
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Tilde, parse_prefix_expr);
    parser.nud(TokenKind::LeftParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Func, parse_fn_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Continue, parse_continue_stmt);
    parser.stmt(TokenKind::Import, parse_import_stmt);
    parser.stmt(TokenKind::Class, parse_class_decl_stmt);
    for kind in [
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::Bool,
        TokenKind::Char,
        TokenKind::String,
    ] {
        parser.stmt(kind, parse_var_decl_stmt);
    }
    parser.stmt(TokenKind::Elif, parse_dangling_branch_stmt);
    parser.stmt(TokenKind::Else, parse_dangling_branch_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
