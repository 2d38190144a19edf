//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance from a kind, a lexeme and two positions

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's lexeme
/// * `$start` - Position of the first character
/// * `$end` - Position just past the last character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntegerLiteral, "42".to_string(), start, lexer.position());
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $start:expr, $end:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: Span {
                start: $start,
                end: $end,
            },
        }
    };
}
