#![allow(dead_code)]

use console::style;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a missing catalog directory
pub fn catalog_not_found(path: &Path) -> CliError {
    CliError::new("Catalog directory not found")
        .with_context(format!(
            "The catalog data directory does not exist.\n\nPath: {}",
            path.display()
        ))
        .with_suggestion("Check the path and try again")
        .with_suggestion("Point at the directory holding the partition files (spots*.ts)")
        .with_help("Run: spotaudit audit --help")
}

/// Create error for an unreachable lookup service
pub fn lookup_unreachable(error: &str) -> CliError {
    CliError::new("Cannot reach the reverse-geocoding service")
        .with_context(format!("The lookup request did not complete.\n\nError: {}", error))
        .with_suggestion("Check network connectivity")
        .with_suggestion("Or point at a different instance: --base-url <url>")
        .with_help("Run: spotaudit verify --help")
}
