use console::style;
use solene_core::SoleneError;
use std::fmt;

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

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": "error",
            "message": self.message,
            "context": self.context,
            "suggestions": self.suggestions,
        })
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

/// Print a failed command to stderr, human or JSON
pub fn report(error: anyhow::Error, json: bool) {
    let cli_error = from_anyhow(error);
    if json {
        match serde_json::to_string_pretty(&cli_error.to_json()) {
            Ok(text) => eprintln!("{}", text),
            Err(_) => eprintln!("{}", cli_error.message),
        }
    } else {
        cli_error.display();
    }
}

/// Create error for a geometry the CIR format cannot hold
pub fn unsupported_geometry(row: u64, geometry_type: &str) -> CliError {
    CliError::new("Unsupported geometry")
        .with_context(format!(
            "Row index {} holds a {}; only polygons and multi-polygons can be exported.\n\nThe output file is incomplete.",
            row, geometry_type
        ))
        .with_suggestion("Remove or convert the non-surface rows before exporting")
        .with_help("Run: solene export --help")
}

/// Create error for an unknown file extension
pub fn unsupported_format(extension: &str, supported: &[String]) -> CliError {
    CliError::new("Unsupported format")
        .with_context(format!(
            "No registered driver handles '{}'.\n\nSupported: {}",
            extension,
            supported.join(", ")
        ))
        .with_suggestion("Use one of the supported extensions for the output file")
        .with_suggestion("Or pass --format for an output path without extension")
        .with_help("Run: solene formats")
}

/// Create error for a driver that cannot read its format
pub fn unsupported_direction(driver: &str) -> CliError {
    CliError::new("Import not supported")
        .with_context(format!("{} can only write files.", driver))
        .with_suggestion("Export tables with: solene export <INPUT> <OUTPUT>.cir")
        .with_help("Run: solene formats")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check solene.toml for syntax errors")
        .with_suggestion("Or check SOLENE_* environment variables")
        .with_help("Run: solene config")
}

/// Create error for an unreadable input table
pub fn source_failed(source_name: &str, reason: &str) -> CliError {
    CliError::new("Cannot read input table")
        .with_context(format!("Table: {}\n\nError: {}", source_name, reason))
        .with_suggestion("Check that the file holds one WKT geometry per line, or valid GeoJSON")
        .with_suggestion("Or pass --input-format explicitly")
        .with_help("Run: solene export --help")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(solene) = error.downcast_ref::<SoleneError>() {
        return from_solene(solene);
    }

    let message = format!("{:#}", error);
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.to_lowercase().contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or run with appropriate privileges")
    } else {
        CliError::new(message)
    }
}

fn from_solene(error: &SoleneError) -> CliError {
    match error {
        SoleneError::UnsupportedGeometry { row, geometry_type } => {
            unsupported_geometry(*row, &geometry_type.to_string())
        }
        SoleneError::UnsupportedDirection { driver } => unsupported_direction(driver),
        SoleneError::UnsupportedFormat {
            extension,
            supported,
        } => unsupported_format(extension, supported),
        SoleneError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        SoleneError::Source {
            source_name,
            reason,
        } => source_failed(source_name, reason),
        other => CliError::new(other.to_string()),
    }
}
