use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Matrix must have at least one row and one column")]
    EmptyMatrix,

    #[error("Ragged matrix: row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Non-finite value at [{row}][{col}] has no C literal form")]
    NonFinite { row: usize, col: usize },

    #[error("Matrix data has {found} elements, expected {rows}x{cols}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        found: usize,
    },

    #[error("Matrix of {rows}x{cols} exceeds the limit of {max} elements")]
    TooLarge { rows: usize, cols: usize, max: usize },

    #[error("Invalid size range: min_size {min} > max_size {max}")]
    InvalidSizeRange { min: u32, max: u32 },

    #[error("Size exponent {0} is too large for a column vector")]
    SizeTooLarge(u32),

    #[error("Invalid C identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Kernel blocking parameter must be at least 1")]
    InvalidBlocking,

    #[error("Malformed matrix literal: {0}")]
    Literal(String),

    #[error("Invalid plan: {0}")]
    Plan(String),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Violation {
    pub severity: Severity,
    pub rule: String,
    pub message: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Violation {
    pub(crate) fn new(severity: Severity, rule: &str, message: String, location: &str) -> Self {
        Self {
            severity,
            rule: rule.to_string(),
            message,
            location: Some(location.to_string()),
        }
    }
}

/// Count violations with [`Severity::Error`].
pub fn error_count(violations: &[Violation]) -> usize {
    violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .count()
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
        };
        write!(f, "[{prefix}] {}: {}", self.rule, self.message)
    }
}
