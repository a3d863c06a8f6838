use thiserror::Error;

/// Errors that can occur while loading a dataset document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VatRatesError {
    /// The document is not valid JSON or does not match the dataset schema.
    #[error("dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but breaks one or more dataset invariants.
    #[error("dataset validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "rates.DE.reduced").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Identifier of the broken dataset rule, if any (e.g. "reduced-sorted").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error tied to a named dataset rule.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
