use console::style;
use geodrill_core::error::GeodrillError;
use std::fmt;

use crate::config_loader::DEFAULT_CONFIG_FILE;

/// Enhanced error type with suggestions
#[derive(Clone)]
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

/// Create error for an invalid configuration value
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion(format!("Check {} for typos", DEFAULT_CONFIG_FILE))
        .with_suggestion("Check GEODRILL_API_BASE, GEODRILL_TIMEOUT_MS and GEODRILL_NAME_MAP")
        .with_help("Run: geodrill config")
}

/// Create error for a name table that cannot be loaded or is not closed
pub fn name_map_invalid(reason: &str) -> CliError {
    CliError::new("Name mapping table is invalid")
        .with_context(format!(
            "Every label must map onto a canonical region name.\n\nReason: {}",
            reason
        ))
        .with_suggestion("List the offending entries: geodrill names check")
        .with_suggestion("Or drop --name-map to use the built-in table")
        .with_help("Run: geodrill names --help")
}

/// Create error for unreadable boundary geometry
pub fn geometry_unreadable(reason: &str) -> CliError {
    CliError::new("Cannot read boundary geometry")
        .with_context(format!("Error: {}", reason))
        .with_suggestion("Pass a GeoJSON FeatureCollection with a state name property")
        .with_suggestion("Supported label properties: st_nm, ST_NM, NAME_1, name")
        .with_help("Run: geodrill map --help")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return cli_error.clone();
    }

    if let Some(geodrill_error) = error.chain().find_map(|e| e.downcast_ref::<GeodrillError>()) {
        match geodrill_error {
            GeodrillError::ConfigInvalid { key, reason } => return invalid_config(key, reason),
            GeodrillError::MappingInvalid { .. } | GeodrillError::MappingLoad { .. } => {
                return name_map_invalid(&geodrill_error.to_string())
            }
            GeodrillError::GeometryLoad { .. } => {
                return geometry_unreadable(&geodrill_error.to_string())
            }
            _ => {}
        }
    }

    let message = format!("{:#}", error);
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}
