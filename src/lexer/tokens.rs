use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("bool", TokenKind::Bool);
        map.insert("break", TokenKind::Break);
        map.insert("char", TokenKind::Char);
        map.insert("class", TokenKind::Class);
        map.insert("continue", TokenKind::Continue);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("false", TokenKind::False);
        map.insert("float", TokenKind::Float);
        map.insert("for", TokenKind::For);
        map.insert("func", TokenKind::Func);
        map.insert("if", TokenKind::If);
        map.insert("import", TokenKind::Import);
        map.insert("int", TokenKind::Int);
        map.insert("null", TokenKind::Null);
        map.insert("pub", TokenKind::Pub);
        map.insert("return", TokenKind::Return);
        map.insert("string", TokenKind::String);
        map.insert("super", TokenKind::Super);
        map.insert("switch", TokenKind::Switch);
        map.insert("this", TokenKind::This);
        map.insert("true", TokenKind::True);
        map.insert("while", TokenKind::While);
        map
    };

    /// Every operator and structural lexeme, matched longest first.
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("(", TokenKind::LeftParen);
        map.insert(")", TokenKind::RightParen);
        map.insert("{", TokenKind::LeftBrace);
        map.insert("}", TokenKind::RightBrace);
        map.insert("[", TokenKind::LeftBracket);
        map.insert("]", TokenKind::RightBracket);
        map.insert(",", TokenKind::Comma);
        map.insert(".", TokenKind::Dot);
        map.insert(";", TokenKind::Semicolon);
        map.insert(":", TokenKind::Colon);

        map.insert("+", TokenKind::Plus);
        map.insert("-", TokenKind::Minus);
        map.insert("*", TokenKind::Asterisk);
        map.insert("/", TokenKind::Slash);
        map.insert("%", TokenKind::Percent);
        map.insert("!", TokenKind::Not);
        map.insert("~", TokenKind::Tilde);
        map.insert("&", TokenKind::Ampersand);
        map.insert("|", TokenKind::Pipe);
        map.insert("^", TokenKind::Caret);
        map.insert("<", TokenKind::LessThan);
        map.insert(">", TokenKind::GreaterThan);
        map.insert("=", TokenKind::Assign);

        map.insert("==", TokenKind::EqualEqual);
        map.insert("!=", TokenKind::NotEqual);
        map.insert("<=", TokenKind::LessThanOrEqual);
        map.insert(">=", TokenKind::GreaterThanOrEqual);
        map.insert("&&", TokenKind::AndAnd);
        map.insert("||", TokenKind::OrOr);
        map.insert("<<", TokenKind::LeftShift);
        map.insert(">>", TokenKind::RightShift);

        map.insert("+=", TokenKind::PlusAssign);
        map.insert("-=", TokenKind::MinusAssign);
        map.insert("*=", TokenKind::AsteriskAssign);
        map.insert("/=", TokenKind::SlashAssign);
        map.insert("%=", TokenKind::PercentAssign);
        map.insert("&=", TokenKind::AndAssign);
        map.insert("|=", TokenKind::OrAssign);
        map.insert("^=", TokenKind::XorAssign);
        map.insert("<<=", TokenKind::LeftShiftAssign);
        map.insert(">>=", TokenKind::RightShiftAssign);
        map
    };
}

/// Longest entry in `OPERATOR_LOOKUP`, in characters.
pub const MAX_OPERATOR_LEN: usize = 3;

/// Characters that may start an operator or structural token.
pub const PUNCTUATION: &str = "!%()*+,-./:;<=>[]{}&|^~";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    /// No token was produced; ask again.
    None,

    IntegerLiteral,
    FloatingLiteral,
    StringLiteral,
    CharLiteral,
    Identifier,

    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,

    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,

    Not,        // !
    Tilde,      // ~
    Ampersand,  // &
    Pipe,       // |
    Caret,      // ^
    AndAnd,     // &&
    OrOr,       // ||
    LeftShift,  // <<
    RightShift, // >>

    Assign,
    PlusAssign,
    MinusAssign,
    AsteriskAssign,
    SlashAssign,
    PercentAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    LeftShiftAssign,
    RightShiftAssign,

    EqualEqual,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Reserved
    Bool,
    Break,
    Char,
    Class,
    Continue,
    Elif,
    Else,
    False,
    Float,
    For,
    Func,
    If,
    Import,
    Int,
    Null,
    Pub,
    Return,
    String,
    Super,
    Switch,
    This,
    True,
    While,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }

    /// Keywords that start a variable declaration.
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::Bool
                | TokenKind::Char
                | TokenKind::String
        )
    }

    /// Tokens accepted as a function's return type.
    pub fn is_type_name(&self) -> bool {
        self.is_type_keyword() || matches!(self, TokenKind::Identifier | TokenKind::Null)
    }

    /// The source spelling of a fixed token kind, or its name otherwise.
    pub fn describe(&self) -> String {
        OPERATOR_LOOKUP
            .iter()
            .chain(RESERVED_LOOKUP.iter())
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| text.to_string())
            .unwrap_or_else(|| format!("{:?}", self))
    }

    /// Whether a token of this kind can be the last token of an operand.
    ///
    /// A `-` directly after such a token is subtraction, not a sign.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::IntegerLiteral
                | TokenKind::FloatingLiteral
                | TokenKind::StringLiteral
                | TokenKind::CharLiteral
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::RightParen
                | TokenKind::RightBracket
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    /// The token as it appears in the source, quotes included.
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::StringLiteral => format!("\"{}\"", self.value),
            TokenKind::CharLiteral => format!("'{}'", self.value),
            _ => self.value.clone(),
        }
    }
}
