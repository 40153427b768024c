//! Error types for the datasource layer.

use thiserror::Error;

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// The offending field, e.g. `host` or `extra.allowMultiQueries`.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulated validation failures for one set of raw parameters.
///
/// Validation collects every offending field before reporting, so a
/// configuration UI can mark all bad inputs in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of all offending fields, in the order they were recorded.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    /// Convert into `Err(DataSourceError::Validation)` if anything was recorded.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DataSourceError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for v in &self.violations {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", v)?;
            first = false;
        }
        Ok(())
    }
}

/// Main error type for datasource operations.
///
/// Config-time failures (`Validation`, `UnsupportedEngine`, `Config`) are
/// raised before any I/O. `Connectivity` and `Query` come out of the
/// introspection path and propagate unchanged so callers can distinguish
/// transient infrastructure failures from bad configuration. Resource release
/// failures are never represented here: they are logged and absorbed.
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// One or more raw parameter fields are missing or malformed.
    #[error("invalid datasource parameters: {0}")]
    Validation(ValidationErrors),

    /// Engine kind outside the closed supported set.
    #[error("unsupported engine kind: '{0}'")]
    UnsupportedEngine(String),

    /// Descriptor/URL construction or persisted-form parsing failed on input
    /// that passed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// A physical connection could not be established.
    #[error("connectivity error: {0}")]
    Connectivity(String),

    /// The metadata query failed after a connection was obtained.
    #[error("metadata query failed: {0}")]
    Query(String),

    /// IO error (file operations).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DataSourceError {
    /// Create a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        DataSourceError::Config(message.into())
    }

    /// Create a `Connectivity` error.
    pub fn connectivity(message: impl Into<String>) -> Self {
        DataSourceError::Connectivity(message.into())
    }

    /// Create a `Query` error.
    pub fn query(message: impl Into<String>) -> Self {
        DataSourceError::Query(message.into())
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for CLI use.
    ///
    /// Config-time problems map to 1, so scripts can tell "fix your input"
    /// apart from "retry later" (connectivity, 3) and "the scan itself
    /// failed" (query, 4).
    pub fn exit_code(&self) -> u8 {
        match self {
            DataSourceError::Validation(_)
            | DataSourceError::Config(_)
            | DataSourceError::Json(_)
            | DataSourceError::Yaml(_) => 1,
            DataSourceError::UnsupportedEngine(_) => 2,
            DataSourceError::Connectivity(_) => 3,
            DataSourceError::Query(_) => 4,
            DataSourceError::Io(_) => 7,
        }
    }
}

/// Result type alias for datasource operations.
pub type Result<T> = std::result::Result<T, DataSourceError>;
