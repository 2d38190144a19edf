//! Error types and diagnostic reporting for the front end.
//!
//! This module defines the errors raised while tokenizing and parsing and
//! the sink they are reported through. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexical and syntactic problems
//! - The `Report` sink, which prints and records `ERROR`/`WARNING`/`INFO` diagnostics
//! - Rendering of the offending source line with a caret under the column

pub mod errors;
pub mod report;
