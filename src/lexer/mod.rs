//! Lexical analysis module for the front end.
//!
//! This module contains the tokenizer that converts source text into
//! tokens for parsing, one token per request. It handles:
//!
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line and column tracking for error reporting
//! - Paren and brace nesting checks at end of input
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
