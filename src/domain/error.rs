//! Domain error types.

/// Top-level error type for pairdrill.
#[derive(Debug, thiserror::Error)]
pub enum DrillError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("{name} must be within (0, 1), got {value}")]
    InvalidFraction { name: String, value: f64 },

    #[error("{operation} is not valid in the {phase} phase")]
    InvalidTransition {
        operation: String,
        phase: &'static str,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DrillError {
    pub fn invalid_transition(operation: &str, phase: &'static str) -> Self {
        DrillError::InvalidTransition {
            operation: operation.to_string(),
            phase,
        }
    }
}

impl From<&DrillError> for std::process::ExitCode {
    fn from(err: &DrillError) -> Self {
        let code: u8 = match err {
            DrillError::Io(_) => 1,
            DrillError::ConfigParse { .. }
            | DrillError::ConfigMissing { .. }
            | DrillError::ConfigInvalid { .. }
            | DrillError::InvalidFraction { .. } => 2,
            DrillError::Data { .. } => 3,
            DrillError::InvalidTransition { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
