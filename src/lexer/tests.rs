//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers, floats, malformed numbers)
//! - String and char literals
//! - Operators and punctuation
//! - Comments, whitespace, line and column tracking
//! - Nesting counters at end of input

use std::rc::Rc;

use crate::{config::FrontendConfig, errors::report::Report};

use super::{
    lexer::{tokenize_with_config, Lexer},
    tokens::{Token, TokenKind},
};

fn lex(source: &str) -> (Vec<Token>, Report) {
    tokenize_with_config(source, Some("test.rook".to_string()), &FrontendConfig::quiet())
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).0.iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "bool break char class continue elif else false float for func if import int null pub return string super switch this true while";
    let (tokens, report) = lex(source);

    let expected = [
        TokenKind::Bool,
        TokenKind::Break,
        TokenKind::Char,
        TokenKind::Class,
        TokenKind::Continue,
        TokenKind::Elif,
        TokenKind::Else,
        TokenKind::False,
        TokenKind::Float,
        TokenKind::For,
        TokenKind::Func,
        TokenKind::If,
        TokenKind::Import,
        TokenKind::Int,
        TokenKind::Null,
        TokenKind::Pub,
        TokenKind::Return,
        TokenKind::String,
        TokenKind::Super,
        TokenKind::Switch,
        TokenKind::This,
        TokenKind::True,
        TokenKind::While,
        TokenKind::EOF,
    ];

    assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), expected);
    assert!(tokens[..tokens.len() - 1].iter().all(|t| t.kind.is_keyword()));
    assert_eq!(report.diagnostics().len(), 0);
}

#[test]
fn test_tokenize_identifiers() {
    let (tokens, report) = lex("foo bar baz_123 _underscore CamelCase funcs");

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        values,
        ["foo", "bar", "baz_123", "_underscore", "CamelCase", "funcs", "EOF"]
    );
    assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Identifier));
    assert!(!report.has_errors());
}

#[test]
fn test_single_punctuation() {
    let cases = [
        ("(", TokenKind::LeftParen),
        (")", TokenKind::RightParen),
        ("{", TokenKind::LeftBrace),
        ("}", TokenKind::RightBrace),
        ("[", TokenKind::LeftBracket),
        ("]", TokenKind::RightBracket),
        (",", TokenKind::Comma),
        (".", TokenKind::Dot),
        (";", TokenKind::Semicolon),
        (":", TokenKind::Colon),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("*", TokenKind::Asterisk),
        ("/", TokenKind::Slash),
        ("%", TokenKind::Percent),
        ("!", TokenKind::Not),
        ("=", TokenKind::Assign),
        ("<", TokenKind::LessThan),
        (">", TokenKind::GreaterThan),
        ("&", TokenKind::Ampersand),
        ("|", TokenKind::Pipe),
        ("^", TokenKind::Caret),
        ("~", TokenKind::Tilde),
    ];

    for (source, kind) in cases {
        let file = Rc::new("test.rook".to_string());
        let mut report = Report::new(Rc::from(source), Rc::clone(&file), &FrontendConfig::quiet());
        let mut lexer = Lexer::new(source, file);

        let token = lexer.next_token(&mut report);
        assert_eq!(token.kind, kind, "tokenizing {:?}", source);
        assert_eq!(token.value, source);
        assert_eq!(lexer.column(), 2, "cursor should be past {:?}", source);
        assert!(lexer.at_eof());
    }
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % == != < > <= >= = && || << >> ! ~";
    assert_eq!(
        kinds(source),
        [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::EqualEqual,
            TokenKind::NotEqual,
            TokenKind::LessThan,
            TokenKind::GreaterThan,
            TokenKind::LessThanOrEqual,
            TokenKind::GreaterThanOrEqual,
            TokenKind::Assign,
            TokenKind::AndAnd,
            TokenKind::OrOr,
            TokenKind::LeftShift,
            TokenKind::RightShift,
            TokenKind::Not,
            TokenKind::Tilde,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_compound_assignments() {
    let source = "+= -= *= /= %= &= |= ^= <<= >>=";
    assert_eq!(
        kinds(source),
        [
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
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_adjacent_punctuation_splits() {
    assert_eq!(
        kinds("add(a,b):int{"),
        [
            TokenKind::Identifier,
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::RightParen,
            TokenKind::Colon,
            TokenKind::Int,
            TokenKind::LeftBrace,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_integers() {
    for source in ["0", "42", "1234567890", "-5", "-0"] {
        let (tokens, report) = lex(source);
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral, "{}", source);
        assert_eq!(tokens[0].value, source);
        assert_eq!(tokens[1].kind, TokenKind::EOF);
        assert!(!report.has_errors());
    }
}

#[test]
fn test_tokenize_floats() {
    for source in ["3.14", "0.5", "-2.75", "1.0e10", "6.02E+23", "1.5e-3"] {
        let (tokens, report) = lex(source);
        assert_eq!(tokens[0].kind, TokenKind::FloatingLiteral, "{}", source);
        assert_eq!(tokens[0].value, source);
        assert!(!report.has_errors());
    }
}

#[test]
fn test_exponent_without_decimal_point_is_integer() {
    let (tokens, _) = lex("1e5");
    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[0].value, "1e5");
}

#[test]
fn test_multiple_exponents() {
    let (tokens, report) = lex("1.5e3e2");

    assert_eq!(tokens.len(), 1);
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        report.diagnostics()[0].name.as_deref(),
        Some("MultipleExponents")
    );
}

#[test]
fn test_missing_exponent_digits() {
    for source in ["1e", "2.5e+", "3E-"] {
        let (tokens, report) = lex(source);
        assert_eq!(tokens.len(), 1, "{}", source);
        assert_eq!(report.error_count(), 1, "{}", source);
        assert!(report.diagnostics()[0]
            .message
            .starts_with("Invalid number format"));
    }
}

#[test]
fn test_number_followed_by_letters() {
    let (tokens, report) = lex("12abc;");

    assert_eq!(tokens[0].kind, TokenKind::Semicolon);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_minus_after_operand_is_subtraction() {
    assert_eq!(
        kinds("x-1"),
        [
            TokenKind::Identifier,
            TokenKind::Minus,
            TokenKind::IntegerLiteral,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("(a)-2"),
        [
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::RightParen,
            TokenKind::Minus,
            TokenKind::IntegerLiteral,
            TokenKind::EOF,
        ]
    );

    let (tokens, _) = lex("x = -1");
    assert_eq!(tokens[2].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[2].value, "-1");
}

#[test]
fn test_dot_without_fraction_digits() {
    assert_eq!(
        kinds("1.x"),
        [
            TokenKind::IntegerLiteral,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_strings() {
    let (tokens, report) = lex(r#""hello" "world" "multiple words""#);

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
    assert!(!report.has_errors());
}

#[test]
fn test_string_is_copied_verbatim() {
    let (tokens, _) = lex(r#""quote\"test" "back\\""#);

    assert_eq!(tokens[0].value, r#"quote\"test"#);
    assert_eq!(tokens[1].value, r#"back\\"#);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_unclosed_string() {
    let (tokens, report) = lex("\"abc");

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "abc");
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.diagnostics()[0].message, "String literal not closed.");
}

#[test]
fn test_string_newlines_advance_line() {
    let (tokens, _) = lex("\"a\nb\" x");

    assert_eq!(tokens[0].value, "a\nb");
    assert_eq!(tokens[1].line(), 2);
    assert_eq!(tokens[1].column(), 4);
}

#[test]
fn test_char_literals() {
    let (tokens, report) = lex(r"'a' '\n'");

    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[1].value, r"\n");
    assert!(!report.has_errors());
}

#[test]
fn test_unclosed_char() {
    let (tokens, report) = lex("'ab'");

    assert_eq!(report.error_count(), 2);
    assert_eq!(report.diagnostics()[0].message, "Char literal not closed.");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
}

#[test]
fn test_comments_are_skipped() {
    let (tokens, _) = lex("a // comment with ( and {\nb");

    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "b");
    assert_eq!(tokens[1].line(), 2);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_comment_does_not_affect_nesting() {
    let (_, report) = lex("// ( {\n");
    assert!(!report.has_errors());
}

#[test]
fn test_line_and_column_tracking() {
    let (tokens, _) = lex("int x\n  = 5;\n\tfoo");

    assert_eq!((tokens[0].line(), tokens[0].column()), (1, 1));
    assert_eq!((tokens[1].line(), tokens[1].column()), (1, 5));
    assert_eq!((tokens[2].line(), tokens[2].column()), (2, 3));
    assert_eq!((tokens[3].line(), tokens[3].column()), (2, 5));
    assert_eq!((tokens[4].line(), tokens[4].column()), (2, 6));
    assert_eq!((tokens[5].line(), tokens[5].column()), (3, 2));
}

#[test]
fn test_newlines_counted_once() {
    let file = Rc::new("test.rook".to_string());
    let source = "\n\n\r\n";
    let mut report = Report::new(Rc::from(source), Rc::clone(&file), &FrontendConfig::quiet());
    let mut lexer = Lexer::new(source, file);

    while lexer.next_token(&mut report).kind != TokenKind::EOF {}
    assert_eq!(lexer.line(), 4);
}

#[test]
fn test_whitespace_yields_none() {
    let file = Rc::new("test.rook".to_string());
    let source = " \t\n";
    let mut report = Report::new(Rc::from(source), Rc::clone(&file), &FrontendConfig::quiet());
    let mut lexer = Lexer::new(source, file);

    assert_eq!(lexer.next_token(&mut report).kind, TokenKind::None);
    assert_eq!(lexer.next_token(&mut report).kind, TokenKind::None);
    assert_eq!(lexer.next_token(&mut report).kind, TokenKind::None);
    assert_eq!(lexer.next_token(&mut report).kind, TokenKind::EOF);
}

#[test]
fn test_unexpected_character() {
    let (tokens, report) = lex("a @ b # é");

    assert_eq!(tokens.len(), 3);
    assert_eq!(report.error_count(), 3);
    assert_eq!(report.diagnostics()[0].message, "Unexpected character `@`");
    assert_eq!(report.diagnostics()[0].position.as_ref().map(|p| p.column), Some(3));
}

#[test]
fn test_balanced_brackets() {
    for source in ["()", "{}", "({})", "{ ( ) { } }", "f(a, (b)) { if (x) { } }"] {
        let (_, report) = lex(source);
        assert!(!report.has_errors(), "{}", source);
    }
}

#[test]
fn test_unclosed_parentheses() {
    let (_, report) = lex("((a)");

    assert_eq!(report.error_count(), 1);
    assert_eq!(report.diagnostics()[0].message, "Unclosed parentheses detected.");
}

#[test]
fn test_unclosed_braces() {
    let (_, report) = lex("if (x > 0) {");

    assert_eq!(report.error_count(), 1);
    assert_eq!(report.diagnostics()[0].message, "Unclosed braces detected.");
}

#[test]
fn test_unclosed_both() {
    let (_, report) = lex("{ (");

    assert_eq!(report.error_count(), 2);
    assert_eq!(report.diagnostics()[0].message, "Unclosed parentheses detected.");
    assert_eq!(report.diagnostics()[1].message, "Unclosed braces detected.");
}

#[test]
fn test_unmatched_closing() {
    let (_, report) = lex(") }");

    assert_eq!(report.error_count(), 2);
    assert_eq!(
        report.diagnostics()[0].name.as_deref(),
        Some("UnmatchedClosing")
    );
}

#[test]
fn test_eof_is_terminal() {
    let file = Rc::new("test.rook".to_string());
    let source = "(";
    let mut report = Report::new(Rc::from(source), Rc::clone(&file), &FrontendConfig::quiet());
    let mut lexer = Lexer::new(source, file);

    assert_eq!(lexer.next_token(&mut report).kind, TokenKind::LeftParen);
    assert_eq!(lexer.next_token(&mut report).kind, TokenKind::EOF);
    assert_eq!(lexer.next_token(&mut report).kind, TokenKind::EOF);
    assert_eq!(report.error_count(), 1);
    assert_eq!(lexer.paren_depth(), 1);
}

#[test]
fn test_empty_and_trailing_operator_input() {
    for source in ["", "x =", "a &&", "-"] {
        let file = Rc::new("test.rook".to_string());
        let mut report = Report::new(Rc::from(source), Rc::clone(&file), &FrontendConfig::quiet());
        let mut lexer = Lexer::new(source, file);

        let mut steps = 0;
        while lexer.next_token(&mut report).kind != TokenKind::EOF {
            steps += 1;
            assert!(steps <= source.len(), "no EOF for {:?}", source);
        }

        assert!(lexer.at_eof(), "cursor should be at the end of {:?}", source);
        assert_eq!(lexer.next_token(&mut report).kind, TokenKind::EOF);
        assert_eq!(report.error_count(), 0, "lexing {:?}", source);
    }
}

#[test]
fn test_tokenize_is_idempotent() {
    let source = "func add(a, b): int {\n  return a + b; // sum\n}\n\"s\" 1.5 -2";

    let (first, _) = lex(source);
    let (second, _) = lex(source);
    assert_eq!(first, second);
}

#[test]
fn test_default_file_name() {
    let (tokens, _) = tokenize_with_config("x", None, &FrontendConfig::quiet());
    assert_eq!(tokens[0].span.start.file.as_str(), "shell");
}
