use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidNumber { .. } => "InvalidNumber",
            ErrorImpl::MultipleExponents { .. } => "MultipleExponents",
            ErrorImpl::UnclosedString => "UnclosedString",
            ErrorImpl::UnclosedChar => "UnclosedChar",
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnclosedParentheses => "UnclosedParentheses",
            ErrorImpl::UnclosedBraces => "UnclosedBraces",
            ErrorImpl::UnmatchedClosing { .. } => "UnmatchedClosing",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedIdentifier { .. } => "ExpectedIdentifier",
            ErrorImpl::ExpectedReturnType { .. } => "ExpectedReturnType",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::DanglingBranch { .. } => "DanglingBranch",
            ErrorImpl::MissingReturnType { .. } => "MissingReturnType",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidNumber { .. } => ErrorTip::Suggestion(String::from(
                "numbers look like `42`, `-7`, `3.14` or `6.02e23`",
            )),
            ErrorImpl::UnclosedString => {
                ErrorTip::Suggestion(String::from("add a closing `\"`"))
            }
            ErrorImpl::UnexpectedToken { token } if token == "}" => ErrorTip::Suggestion(
                String::from("this brace does not close any open block"),
            ),
            ErrorImpl::ExpectedToken { expected, .. } if expected == ";" => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::MissingReturnType { .. } => {
                ErrorTip::Suggestion(String::from("declare one with `: type` after the parameters"))
            }
            _ => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Invalid number format: `{literal}`")]
    InvalidNumber { literal: String },
    #[error("Multiple 'E'/'e' detected in `{literal}`.")]
    MultipleExponents { literal: String },
    #[error("String literal not closed.")]
    UnclosedString,
    #[error("Char literal not closed.")]
    UnclosedChar,
    #[error("Unexpected character `{character}`")]
    UnexpectedCharacter { character: char },
    #[error("Unclosed parentheses detected.")]
    UnclosedParentheses,
    #[error("Unclosed braces detected.")]
    UnclosedBraces,
    #[error("Unmatched closing `{token}`")]
    UnmatchedClosing { token: String },
    #[error("Unexpected token `{token}`")]
    UnexpectedToken { token: String },
    #[error("Expected `{expected}` but found `{found}`")]
    ExpectedToken { expected: String, found: String },
    #[error("Expected identifier {context} but found `{found}`")]
    ExpectedIdentifier { context: String, found: String },
    #[error("Expected return type after `:` in function `{function}`")]
    ExpectedReturnType { function: String },
    #[error("Expected expression but found `{found}`")]
    ExpectedExpression { found: String },
    #[error("`{keyword}` without a preceding `if`")]
    DanglingBranch { keyword: String },
    #[error("Function `{function}` returns a value but declares no return type")]
    MissingReturnType { function: String },
    #[error("Function `{function}` declares return type `{return_type}` but never returns")]
    MissingReturn { function: String, return_type: String },
    #[error("Nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
