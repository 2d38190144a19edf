use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let token_kind = parser.current_token_kind();

    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&token_kind).copied() {
        return stmt_fn(parser);
    }

    if !parser.get_nud_lookup().contains_key(&token_kind) {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().source_text(),
            },
            parser.position(),
        ));
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_or_assume(TokenKind::Semicolon);

    Ok(expr)
}

/// Parses one statement, reporting a failure and skipping past it.
///
/// Returns `None` when the statement was malformed.
pub fn parse_stmt_recovering(parser: &mut Parser) -> Option<Node> {
    let before = parser.consumed();

    match parse_stmt(parser) {
        Ok(stmt) => Some(stmt),
        Err(error) => {
            parser.report_mut().error(error);
            parser.synchronize(before);
            None
        }
    }
}

/// Parses `{ stmt* }`, appending each statement to `owner`.
///
/// A block cut off by the end of input is left to the lexer's unclosed
/// brace check. A block opened past the nesting limit is not entered; the
/// error leaves it to `synchronize`, which skips it whole.
pub fn parse_block_into(parser: &mut Parser, owner: &mut Node) -> Result<(), Error> {
    parser.enter_nesting()?;
    let block = parse_block_body(parser, owner);
    parser.leave_nesting();

    block
}

fn parse_block_body(parser: &mut Parser, owner: &mut Node) -> Result<(), Error> {
    parser.expect(TokenKind::LeftBrace)?;

    while !matches!(
        parser.current_token_kind(),
        TokenKind::RightBrace | TokenKind::EOF
    ) {
        if let Some(stmt) = parse_stmt_recovering(parser) {
            owner.push(stmt);
        }
    }

    if parser.current_token_kind() == TokenKind::RightBrace {
        parser.advance();
    }

    Ok(())
}

/// `func name(params) [: type] { body }`
///
/// Children: `Identifier(name)`, the `Param` list, `ReturnType`, then the
/// body statements.
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();

    let error = parser.identifier_error("after `func`");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let mut func = Node::new(NodeKind::Func, name.value.clone(), start_token.span.start);
    func.push(Node::new(
        NodeKind::Identifier,
        name.value.clone(),
        name.span.start,
    ));

    let mut params = Node::new(NodeKind::Param, "", parser.position());
    parser.expect(TokenKind::LeftParen)?;

    while !matches!(
        parser.current_token_kind(),
        TokenKind::RightParen | TokenKind::LeftBrace | TokenKind::Colon | TokenKind::EOF
    ) {
        let error = parser.identifier_error("in parameter list");
        let param = parser.expect_error(TokenKind::Identifier, Some(error))?;
        params.push(Node::new(NodeKind::Param, param.value, param.span.start));

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect_or_assume(TokenKind::RightParen);
    func.push(params);

    let return_type = parse_return_type(parser, &name.value);
    let return_type_node = match &return_type {
        Some(token) => Node::new(
            NodeKind::ReturnType,
            token.value.clone(),
            token.span.start.clone(),
        ),
        None => Node::new(NodeKind::ReturnType, "", parser.position()),
    };
    func.push(return_type_node);

    parse_block_into(parser, &mut func)?;

    match &return_type {
        None => {
            if let Some(ret) = find_return(&func.children[3..]) {
                let error = Error::new(
                    ErrorImpl::MissingReturnType {
                        function: name.value.clone(),
                    },
                    ret.position.clone(),
                );
                parser.report_mut().error(error);
            }
        }
        Some(return_type) => {
            if !func.contains_kind(NodeKind::Return) {
                let error = Error::new(
                    ErrorImpl::MissingReturn {
                        function: name.value.clone(),
                        return_type: return_type.value.clone(),
                    },
                    func.position.clone(),
                );
                parser.report_mut().warning(error);
            }
        }
    }

    tracing::debug!(
        function = %name.value,
        params = func.children[1].children.len(),
        return_type = return_type.as_ref().map(|t| t.value.as_str()).unwrap_or(""),
        "parsed function"
    );

    Ok(func)
}

/// Reads the optional `: type` after a parameter list.
///
/// A type name without the `:` is accepted after reporting the colon as
/// missing. A `:` with no type is reported and treated as no type.
fn parse_return_type(parser: &mut Parser, function: &str) -> Option<Token> {
    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();

        if parser.current_token_kind().is_type_name() {
            return Some(parser.advance());
        }

        let error = Error::new(
            ErrorImpl::ExpectedReturnType {
                function: function.to_string(),
            },
            parser.position(),
        );
        parser.report_mut().error(error);
        return None;
    }

    if parser.current_token_kind().is_type_name() {
        parser.expect_or_assume(TokenKind::Colon);
        return Some(parser.advance());
    }

    None
}

/// First `return` in a body, not looking inside nested functions.
fn find_return(nodes: &[Node]) -> Option<&Node> {
    for node in nodes {
        match node.kind {
            NodeKind::Func => continue,
            NodeKind::Return => return Some(node),
            _ => {}
        }

        if let Some(found) = find_return(&node.children) {
            return Some(found);
        }
    }

    None
}

/// Reads an expression and wraps it in a `Cond` node labelled with its raw
/// source text.
fn parse_captured_cond(parser: &mut Parser) -> Result<Node, Error> {
    let position = parser.position();

    parser.start_capture();
    let expr = parse_expr(parser, BindingPower::Default);
    let raw = parser.finish_capture();

    Ok(Node::new(NodeKind::Cond, raw, position).with_children(vec![expr?]))
}

/// `( expr )`
fn parse_condition(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::LeftParen)?;
    let cond = parse_captured_cond(parser)?;
    parser.expect_or_assume(TokenKind::RightParen);

    Ok(cond)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();

    let mut if_stmt = Node::new(NodeKind::If, "", start_token.span.start);
    if_stmt.push(parse_condition(parser)?);
    parse_block_into(parser, &mut if_stmt)?;

    while matches!(
        parser.current_token_kind(),
        TokenKind::Elif | TokenKind::Else
    ) {
        let branch = parse_branch(parser)?;
        let is_else = branch.kind == NodeKind::Else;
        if_stmt.push(branch);

        if is_else {
            break;
        }
    }

    Ok(if_stmt)
}

/// `elif ( expr ) { body }` or `else { body }`
fn parse_branch(parser: &mut Parser) -> Result<Node, Error> {
    let keyword = parser.advance();

    let mut branch = if keyword.kind == TokenKind::Elif {
        let mut elif = Node::new(NodeKind::Elif, "", keyword.span.start);
        elif.push(parse_condition(parser)?);
        elif
    } else {
        Node::new(NodeKind::Else, "", keyword.span.start)
    };

    parse_block_into(parser, &mut branch)?;

    Ok(branch)
}

/// An `elif` or `else` with no `if` before it. The branch is parsed so the
/// parser lands after it, then dropped.
pub fn parse_dangling_branch_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let position = parser.position();
    let keyword = parser.current_token().value.clone();

    parse_branch(parser)?;

    Err(Error::new(ErrorImpl::DanglingBranch { keyword }, position))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();

    let mut while_stmt = Node::new(NodeKind::While, "", start_token.span.start);
    while_stmt.push(parse_condition(parser)?);
    parse_block_into(parser, &mut while_stmt)?;

    Ok(while_stmt)
}

/// `for ( init ; cond ; step ) { body }`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();
    let mut for_stmt = Node::new(NodeKind::For, "", start_token.span.start);

    parser.expect(TokenKind::LeftParen)?;

    let init = if parser.current_token_kind().is_type_keyword() {
        parse_var_decl_stmt(parser)?
    } else {
        let init = parse_expr(parser, BindingPower::Default)?;
        parser.expect_or_assume(TokenKind::Semicolon);
        init
    };
    for_stmt.push(init);

    for_stmt.push(parse_captured_cond(parser)?);
    parser.expect_or_assume(TokenKind::Semicolon);

    for_stmt.push(parse_expr(parser, BindingPower::Default)?);
    parser.expect_or_assume(TokenKind::RightParen);

    parse_block_into(parser, &mut for_stmt)?;

    Ok(for_stmt)
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();
    let mut return_stmt = Node::new(NodeKind::Return, "", start_token.span.start);

    if !matches!(
        parser.current_token_kind(),
        TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::EOF
    ) {
        return_stmt.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect_or_assume(TokenKind::Semicolon);

    Ok(return_stmt)
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();
    parser.expect_or_assume(TokenKind::Semicolon);

    Ok(Node::new(NodeKind::Break, "", start_token.span.start))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();
    parser.expect_or_assume(TokenKind::Semicolon);

    Ok(Node::new(NodeKind::Continue, "", start_token.span.start))
}

/// `import a.b.c;`
pub fn parse_import_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();

    let error = parser.identifier_error("after `import`");
    let first = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let mut path = first.value;
    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();

        let error = parser.identifier_error("in package name");
        let segment = parser.expect_error(TokenKind::Identifier, Some(error))?;
        path.push('.');
        path.push_str(&segment.value);
    }

    parser.expect_or_assume(TokenKind::Semicolon);

    let package = Node::new(NodeKind::PkgName, path, first.span.start);
    Ok(Node::new(NodeKind::Import, "", start_token.span.start).with_children(vec![package]))
}

/// `class Name { member* }`, where members are functions and variable
/// declarations.
pub fn parse_class_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance();

    let error = parser.identifier_error("after `class`");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let mut class = Node::new(NodeKind::Class, name.value.clone(), start_token.span.start);
    parser.expect(TokenKind::LeftBrace)?;

    while !matches!(
        parser.current_token_kind(),
        TokenKind::RightBrace | TokenKind::EOF
    ) {
        let token_kind = parser.current_token_kind();

        if token_kind == TokenKind::Func || token_kind.is_type_keyword() {
            if let Some(member) = parse_stmt_recovering(parser) {
                class.push(member);
            }
            continue;
        }

        let before = parser.consumed();
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().source_text(),
            },
            parser.position(),
        );
        parser.report_mut().error(error);
        parser.synchronize(before);
    }

    if parser.current_token_kind() == TokenKind::RightBrace {
        parser.advance();
    }

    tracing::debug!(class = %name.value, members = class.children.len(), "parsed class");

    Ok(class)
}

/// `type name [= expr];`
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let type_token = parser.advance();

    let error = parser.identifier_error(&format!("after `{}`", type_token.value));
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let mut var_decl = Node::new(NodeKind::VarDecl, type_token.value, type_token.span.start);
    var_decl.push(Node::new(NodeKind::Identifier, name.value, name.span.start));

    if parser.current_token_kind() == TokenKind::Assign {
        parser.advance();
        var_decl.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect_or_assume(TokenKind::Semicolon);

    Ok(var_decl)
}
