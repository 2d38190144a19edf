use std::{fmt::Display, rc::Rc};

use crate::{config::FrontendConfig, get_line, Position};

use super::errors::{Error, ErrorTip};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Info,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Error => write!(f, "ERROR"),
            Level::Warning => write!(f, "WARNING"),
            Level::Info => write!(f, "INFO"),
        }
    }
}

/// A diagnostic that has already been reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub position: Option<Position>,
    /// Name of the underlying error variant, when there is one.
    pub name: Option<String>,
}

/// Renders one diagnostic in the human-readable form.
///
/// ```text
/// if (x > 0 {
///           ^
/// ERROR: Expected `)` but found `{`
/// ```
///
/// The caret is padded with `column - 1` spaces. Without a source line only
/// the `LEVEL: message` line is produced.
pub fn render(level: Level, message: &str, source_line: Option<&str>, column: u32) -> String {
    let mut out = String::new();

    if let Some(line) = source_line {
        out.push_str(line);
        out.push('\n');
        out.push_str(&" ".repeat(column.saturating_sub(1) as usize));
        out.push_str("^\n");
    }

    out.push_str(&format!("{}: {}", level, message));
    out
}

/// Collects and prints diagnostics for one source buffer.
#[derive(Debug, Clone)]
pub struct Report {
    file: Rc<String>,
    source: Rc<str>,
    echo: bool,
    show_source_line: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new(source: Rc<str>, file: Rc<String>, config: &FrontendConfig) -> Self {
        Report {
            file,
            source,
            echo: config.echo_diagnostics,
            show_source_line: config.show_source_line,
            diagnostics: vec![],
        }
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    pub fn error(&mut self, error: Error) {
        self.emit(Level::Error, error);
    }

    pub fn warning(&mut self, error: Error) {
        self.emit(Level::Warning, error);
    }

    /// Reports a message that is not tied to a source location.
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();

        if self.echo {
            println!("{}", render(Level::Info, &message, None, 0));
        }

        self.diagnostics.push(Diagnostic {
            level: Level::Info,
            message,
            position: None,
            name: None,
        });
    }

    pub fn emit(&mut self, level: Level, error: Error) {
        let message = match error.get_tip() {
            ErrorTip::None => error.to_string(),
            tip => format!("{} ({})", error, tip),
        };
        let position = error.get_position().clone();

        tracing::debug!(%level, %position, name = error.get_error_name(), "diagnostic");

        if self.echo {
            println!("{}", self.format(level, &message, &position));
        }

        self.diagnostics.push(Diagnostic {
            level,
            message,
            position: Some(position),
            name: Some(error.get_error_name().to_string()),
        });
    }

    /// Formats a located diagnostic, followed by its `-> file:line:column` line.
    pub fn format(&self, level: Level, message: &str, position: &Position) -> String {
        let source_line = if self.show_source_line {
            get_line(&self.source, position.line)
        } else {
            None
        };

        format!(
            "{}\n-> {}",
            render(level, message, source_line, position.column),
            position
        )
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level == Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level == Level::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
