use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A textual value did not match any member of a closed enumeration.
    #[error("unknown {kind} value: {value:?}")]
    UnknownEnumValue { kind: &'static str, value: String },
}

/// Errors raised while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
