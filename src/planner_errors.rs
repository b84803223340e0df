//! # Planner Error Types Module
//!
//! The nutrition and matching core never fails; it degrades to zero or
//! "missing" instead. Typed errors cover configuration and locale resources;
//! file loading reports through `anyhow` with context.

/// Errors raised at the crate's boundaries
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// A configuration value could not be used
    Config { key: String, value: String },
    /// A locale bundle could not be built
    Localization(String),
}

impl std::fmt::Display for PlannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlannerError::Config { key, value } => {
                write!(f, "Invalid configuration value for {key}: '{value}'")
            }
            PlannerError::Localization(msg) => write!(f, "Localization error: {msg}"),
        }
    }
}

impl std::error::Error for PlannerError {}
