//! Front-end configuration.
//!
//! Everything here is plain data handed to the lexer, parser and report.
//! The binary builds it from the environment; library callers construct it
//! directly.

use std::env;

/// Knobs shared by the tokenizer, the parser and the diagnostics sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Print each diagnostic to stdout as it is reported.
    pub echo_diagnostics: bool,
    /// Print the offending source line and a caret above the message.
    pub show_source_line: bool,
    /// Bind every binary and assignment operator at one level, left to right.
    pub uniform_precedence: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            echo_diagnostics: true,
            show_source_line: true,
            uniform_precedence: false,
        }
    }
}

impl FrontendConfig {
    /// Records diagnostics without printing them.
    pub fn quiet() -> Self {
        FrontendConfig::default().with_echo(false)
    }

    /// Reads `ROOKC_QUIET` and `ROOKC_UNIFORM_PRECEDENCE`.
    ///
    /// A variable counts as set when it holds `1`, `true` or `yes`.
    pub fn from_env() -> Self {
        let mut config = FrontendConfig::default();

        if env_flag("ROOKC_QUIET") {
            config.echo_diagnostics = false;
        }
        if env_flag("ROOKC_UNIFORM_PRECEDENCE") {
            config.uniform_precedence = true;
        }

        config
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_diagnostics = echo;
        self
    }

    pub fn with_source_line(mut self, show: bool) -> Self {
        self.show_source_line = show;
        self
    }

    pub fn with_uniform_precedence(mut self, uniform: bool) -> Self {
        self.uniform_precedence = uniform;
        self
    }
}

fn env_flag(name: &str) -> bool {
    match env::var(name) {
        Ok(value) => parse_flag(&value),
        Err(_) => false,
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
