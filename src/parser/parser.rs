//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the parse entry points.
//! The parser pulls tokens from the lexer one at a time, keeping a single
//! token of lookahead. Expressions use a Pratt parser with NUD/LED handlers;
//! statements dispatch on their leading token.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::{Node, NodeKind},
    config::FrontendConfig,
    errors::{
        errors::{Error, ErrorImpl},
        report::Report,
    },
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt_recovering,
};

/// Deepest combined nesting of blocks and expressions the parser descends
/// into before giving up on the construct.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    lexer: Lexer,
    /// Sink shared by the lexer and the parser
    report: Report,
    /// The lookahead token
    current: Token,
    previous_kind: TokenKind,
    /// Number of tokens consumed so far, used to detect progress
    consumed: usize,
    /// Source text of consumed tokens while a capture is open
    capture: Option<Vec<String>>,
    /// Blocks and expressions currently being parsed
    depth: usize,
    uniform_precedence: bool,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over `source` and reads the first significant token.
    ///
    /// The lookup tables are empty until [`create_token_lookups`] runs.
    pub fn new(source: &str, file: Rc<String>, config: &FrontendConfig) -> Self {
        let start = Position::new(1, 1, Rc::clone(&file));

        let mut parser = Parser {
            lexer: Lexer::new(source, Rc::clone(&file)),
            report: Report::new(Rc::from(source), Rc::clone(&file), config),
            current: MK_TOKEN!(TokenKind::None, String::new(), start.clone(), start),
            previous_kind: TokenKind::None,
            consumed: 0,
            capture: None,
            depth: 0,
            uniform_precedence: config.uniform_precedence,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };

        parser.current = parser.pull();
        parser
    }

    /// Asks the lexer for tokens until one is significant.
    fn pull(&mut self) -> Token {
        loop {
            let token = self.lexer.next_token(&mut self.report);
            if token.kind != TokenKind::None {
                return token;
            }
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Advances to the next token and returns the previous one.
    ///
    /// Once the lookahead is `EOF` this returns `EOF` without asking the
    /// lexer for more.
    pub fn advance(&mut self) -> Token {
        if self.current.kind == TokenKind::EOF {
            return self.current.clone();
        }

        let next = self.pull();
        let token = std::mem::replace(&mut self.current, next);

        self.consumed += 1;
        self.previous_kind = token.kind;
        if let Some(capture) = self.capture.as_mut() {
            capture.push(token.source_text());
        }

        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current.kind == expected_kind {
            return Ok(self.advance());
        }

        match error {
            Some(error) => Err(error),
            None => Err(self.expected_token_error(expected_kind)),
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Consumes the expected token, or reports it missing and carries on as
    /// if it had been there.
    pub fn expect_or_assume(&mut self, expected_kind: TokenKind) -> Option<Token> {
        if self.current.kind == expected_kind {
            return Some(self.advance());
        }

        let error = self.expected_token_error(expected_kind);
        self.report.error(error);
        None
    }

    fn expected_token_error(&self, expected_kind: TokenKind) -> Error {
        Error::new(
            ErrorImpl::ExpectedToken {
                expected: expected_kind.describe(),
                found: self.current.source_text(),
            },
            self.position(),
        )
    }

    pub fn identifier_error(&self, context: &str) -> Error {
        Error::new(
            ErrorImpl::ExpectedIdentifier {
                context: context.to_string(),
                found: self.current.source_text(),
            },
            self.position(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Position of the lookahead token.
    pub fn position(&self) -> Position {
        self.current.span.start.clone()
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn uniform_precedence(&self) -> bool {
        self.uniform_precedence
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Binding power of the lookahead, `Default` when it has no infix role.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current.kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Enters one level of nesting, failing once `MAX_NESTING_DEPTH` levels
    /// are open. Every successful call is paired with [`Parser::leave_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Starts recording the source text of every consumed token.
    pub fn start_capture(&mut self) {
        self.capture = Some(vec![]);
    }

    /// Stops recording and returns the captured tokens joined by spaces.
    pub fn finish_capture(&mut self) -> String {
        self.capture.take().unwrap_or_default().join(" ")
    }

    pub fn report_mut(&mut self) -> &mut Report {
        &mut self.report
    }

    pub fn into_report(self) -> Report {
        self.report
    }

    fn is_statement_start(&self, kind: TokenKind) -> bool {
        self.stmt_lookup.contains_key(&kind) && !matches!(kind, TokenKind::Elif | TokenKind::Else)
    }

    /// Skips tokens after a failed construct so parsing can resume.
    ///
    /// `before` is the consumed count when the construct started. Stops just
    /// past a `;`, before a `}`, before a statement keyword, or at `EOF`.
    /// A `{ ... }` block met on the way is skipped whole, together with any
    /// `elif`/`else` blocks chained to it. At least one token is consumed
    /// unless the lookahead is `EOF`.
    pub fn synchronize(&mut self, before: usize) {
        if self.consumed > before
            && matches!(
                self.previous_kind,
                TokenKind::Semicolon | TokenKind::RightBrace
            )
        {
            return;
        }

        loop {
            match self.current.kind {
                TokenKind::EOF | TokenKind::RightBrace => break,
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::LeftBrace => {
                    self.skip_block();
                    if !matches!(self.current.kind, TokenKind::Elif | TokenKind::Else) {
                        break;
                    }
                }
                kind if self.consumed > before && self.is_statement_start(kind) => break,
                _ => {
                    self.advance();
                }
            }
        }

        if self.consumed == before {
            self.advance();
        }
    }

    /// Skips a balanced `{ ... }` block starting at the lookahead.
    fn skip_block(&mut self) {
        let mut depth = 0usize;

        loop {
            match self.current.kind {
                TokenKind::EOF => return,
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }
}

/// Parses one source buffer with the default configuration.
///
/// Diagnostics are printed as they are found and also returned in the
/// [`Report`].
pub fn parse(source: &str, file: &str) -> (Node, Report) {
    parse_with_config(source, file, &FrontendConfig::default())
}

/// Parses one source buffer into a `Root` node.
///
/// Never fails as a whole: malformed statements are reported, skipped, and
/// parsing carries on with the next one.
#[tracing::instrument(skip_all, fields(file = %file))]
pub fn parse_with_config(source: &str, file: &str, config: &FrontendConfig) -> (Node, Report) {
    let file = Rc::new(file.to_string());
    let mut parser = Parser::new(source, Rc::clone(&file), config);
    create_token_lookups(&mut parser);

    let mut root = Node::new(
        NodeKind::Root,
        file.as_str(),
        Position::new(1, 1, Rc::clone(&file)),
    );

    while parser.has_tokens() {
        if let Some(stmt) = parse_stmt_recovering(&mut parser) {
            tracing::debug!(kind = ?stmt.kind, label = %stmt.label, "parsed top-level item");
            root.push(stmt);
        }
    }

    let report = parser.into_report();
    tracing::debug!(
        items = root.children.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "parse finished"
    );

    (root, report)
}
