use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    config::FrontendConfig,
    errors::{
        errors::{Error, ErrorImpl},
        report::Report,
    },
    Position, Span, MK_TOKEN,
};

use super::tokens::{
    Token, TokenKind, MAX_OPERATOR_LEN, OPERATOR_LOOKUP, PUNCTUATION, RESERVED_LOOKUP,
};

lazy_static! {
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"^-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?$").unwrap();
    static ref MULTIPLE_EXPONENT_PATTERN: Regex =
        Regex::new(r"^-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]*){2,}$").unwrap();
}

/// Pull-based tokenizer over one in-memory source buffer.
///
/// Each call to [`Lexer::next_token`] consumes at least one character unless
/// the end of input has been reached, so callers that loop until `EOF`
/// always terminate.
#[derive(Clone)]
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    paren_depth: u32,
    brace_depth: u32,
    last_kind: TokenKind,
    finished: bool,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Rc<String>) -> Lexer {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            paren_depth: 0,
            brace_depth: 0,
            last_kind: TokenKind::None,
            finished: false,
            file,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn paren_depth(&self) -> u32 {
        self.paren_depth
    }

    pub fn brace_depth(&self) -> u32 {
        self.brace_depth
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    /// Consumes one character, keeping line and column in step.
    fn bump(&mut self) -> Option<char> {
        let c = *self.source.get(self.pos)?;
        self.pos += 1;

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    fn slice(&self, from: usize) -> String {
        self.source[from..self.pos].iter().collect()
    }

    fn none(&self, from: usize, start: Position) -> Token {
        MK_TOKEN!(TokenKind::None, self.slice(from), start, self.position())
    }

    /// Produces the next token.
    ///
    /// Whitespace, newlines, comments and malformed input yield a token of
    /// kind `TokenKind::None`. `EOF` is returned forever once the input is
    /// exhausted; the unclosed-bracket check runs only the first time.
    pub fn next_token(&mut self, report: &mut Report) -> Token {
        let start = self.position();
        let from = self.pos;

        let Some(c) = self.peek(0) else {
            if !self.finished {
                self.finished = true;

                if self.paren_depth > 0 {
                    report.error(Error::new(ErrorImpl::UnclosedParentheses, start.clone()));
                }
                if self.brace_depth > 0 {
                    report.error(Error::new(ErrorImpl::UnclosedBraces, start.clone()));
                }
            }

            return MK_TOKEN!(TokenKind::EOF, String::from("EOF"), start.clone(), start);
        };

        let token = match c {
            ' ' | '\r' | '\t' | '\n' => {
                self.bump();
                self.none(from, start)
            }
            '/' if self.peek(1) == Some('/') => {
                self.skip_comment();
                self.none(from, start)
            }
            '"' => self.string(start, report),
            '\'' => self.char_literal(start, report),
            '-' if self.peek(1).is_some_and(|c| c.is_ascii_digit())
                && !self.last_kind.ends_operand() =>
            {
                self.number(start, report)
            }
            c if c.is_ascii_digit() => self.number(start, report),
            c if is_word_start(c) => self.word(start),
            c if PUNCTUATION.contains(c) => self.operator(start, report),
            c => {
                self.bump();
                report.error(Error::new(
                    ErrorImpl::UnexpectedCharacter { character: c },
                    start.clone(),
                ));
                self.none(from, start)
            }
        };

        if token.kind != TokenKind::None {
            self.last_kind = token.kind;
            tracing::trace!(
                kind = %token.kind,
                value = %token.value,
                line = token.line(),
                column = token.column(),
                "token"
            );
        }

        token
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn string(&mut self, start: Position, report: &mut Report) -> Token {
        self.bump();

        let mut value = String::new();
        let mut closed = false;

        while let Some(c) = self.peek(0) {
            match c {
                '"' => {
                    self.bump();
                    closed = true;
                    break;
                }
                '\\' => {
                    value.push(c);
                    self.bump();
                    if let Some(escaped) = self.bump() {
                        value.push(escaped);
                    }
                }
                _ => {
                    value.push(c);
                    self.bump();
                }
            }
        }

        if !closed {
            report.error(Error::new(ErrorImpl::UnclosedString, start.clone()));
        }

        MK_TOKEN!(TokenKind::StringLiteral, value, start, self.position())
    }

    fn char_literal(&mut self, start: Position, report: &mut Report) -> Token {
        let from = self.pos;
        self.bump();

        let mut value = String::new();
        match self.peek(0) {
            Some('\\') => {
                value.push('\\');
                self.bump();
                if let Some(c) = self.peek(0).filter(|c| *c != '\n') {
                    value.push(c);
                    self.bump();
                }
            }
            Some(c) if c != '\'' && c != '\n' => {
                value.push(c);
                self.bump();
            }
            _ => {}
        }

        if self.peek(0) == Some('\'') {
            self.bump();
            if !value.is_empty() {
                return MK_TOKEN!(TokenKind::CharLiteral, value, start, self.position());
            }
        }

        report.error(Error::new(ErrorImpl::UnclosedChar, start.clone()));
        self.none(from, start)
    }

    /// Scans the whole numeric run, then validates it in one go.
    ///
    /// The run takes letters, digits and `_` (so `12abc` is reported as one
    /// bad number), a `.` followed by a digit, and a sign right after an
    /// exponent marker.
    fn number(&mut self, start: Position, report: &mut Report) -> Token {
        let from = self.pos;
        self.bump();

        while let Some(c) = self.peek(0) {
            let previous = self.source[self.pos - 1];
            let take = c.is_ascii_alphanumeric()
                || c == '_'
                || (c == '.' && self.peek(1).is_some_and(|n| n.is_ascii_digit()))
                || ((c == '+' || c == '-') && matches!(previous, 'e' | 'E'));

            if !take {
                break;
            }
            self.bump();
        }

        let literal = self.slice(from);

        if NUMBER_PATTERN.is_match(&literal) {
            let kind = if literal.contains('.') {
                TokenKind::FloatingLiteral
            } else {
                TokenKind::IntegerLiteral
            };
            return MK_TOKEN!(kind, literal, start, self.position());
        }

        let error = if MULTIPLE_EXPONENT_PATTERN.is_match(&literal) {
            ErrorImpl::MultipleExponents { literal }
        } else {
            ErrorImpl::InvalidNumber { literal }
        };
        report.error(Error::new(error, start.clone()));

        self.none(from, start)
    }

    fn word(&mut self, start: Position) -> Token {
        let from = self.pos;

        while self.peek(0).is_some_and(is_word_char) {
            self.bump();
        }

        let value = self.slice(from);
        let kind = if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
            *kind
        } else {
            TokenKind::Identifier
        };

        MK_TOKEN!(kind, value, start, self.position())
    }

    fn operator(&mut self, start: Position, report: &mut Report) -> Token {
        let from = self.pos;
        let longest = MAX_OPERATOR_LEN.min(self.source.len() - self.pos);

        for len in (1..=longest).rev() {
            let candidate: String = self.source[self.pos..self.pos + len].iter().collect();

            if let Some(kind) = OPERATOR_LOOKUP.get(candidate.as_str()).copied() {
                for _ in 0..len {
                    self.bump();
                }
                self.track_nesting(kind, &start, report);

                return MK_TOKEN!(kind, candidate, start, self.position());
            }
        }

        // Only reachable if PUNCTUATION and OPERATOR_LOOKUP disagree.
        let Some(c) = self.peek(0) else {
            return self.none(from, start);
        };
        self.bump();
        report.error(Error::new(
            ErrorImpl::UnexpectedCharacter { character: c },
            start.clone(),
        ));
        self.none(from, start)
    }

    fn track_nesting(&mut self, kind: TokenKind, start: &Position, report: &mut Report) {
        match kind {
            TokenKind::LeftParen => self.paren_depth += 1,
            TokenKind::LeftBrace => self.brace_depth += 1,
            TokenKind::RightParen => {
                if self.paren_depth == 0 {
                    report.error(Error::new(
                        ErrorImpl::UnmatchedClosing {
                            token: String::from(")"),
                        },
                        start.clone(),
                    ));
                } else {
                    self.paren_depth -= 1;
                }
            }
            TokenKind::RightBrace => {
                if self.brace_depth == 0 {
                    report.error(Error::new(
                        ErrorImpl::UnmatchedClosing {
                            token: String::from("}"),
                        },
                        start.clone(),
                    ));
                } else {
                    self.brace_depth -= 1;
                }
            }
            _ => {}
        }
    }
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenizes a whole buffer, printing diagnostics as they occur.
///
/// The returned vector holds every significant token and ends with `EOF`.
pub fn tokenize(source: &str, file: Option<String>) -> (Vec<Token>, Report) {
    tokenize_with_config(source, file, &FrontendConfig::default())
}

pub fn tokenize_with_config(
    source: &str,
    file: Option<String>,
    config: &FrontendConfig,
) -> (Vec<Token>, Report) {
    let file_name = if let Some(file) = file {
        Rc::new(file)
    } else {
        Rc::new(String::from("shell"))
    };

    let mut report = Report::new(Rc::from(source), Rc::clone(&file_name), config);
    let mut lex = Lexer::new(source, file_name);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token(&mut report);

        match token.kind {
            TokenKind::None => continue,
            TokenKind::EOF => {
                tokens.push(token);
                break;
            }
            _ => tokens.push(token),
        }
    }

    (tokens, report)
}
