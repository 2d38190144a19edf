//! Parser module for building the syntax tree.
//!
//! This module contains the parser that pulls tokens from the lexer and
//! builds a tree of [`Node`](crate::ast::ast::Node)s. It uses a Pratt parser
//! for expressions with operator precedence and handles:
//!
//! - Statement parsing (variable declarations, functions, classes, control flow)
//! - Expression parsing (binary ops, calls, member access, indexing, literals)
//! - Error reporting and recovery, so one bad statement does not end the parse
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
