//! Error types for activity-core operations.
//! Keep ActivityFfiError minimal and stable to avoid breaking FFI clients.

use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// FFI-Compatible Error (for Swift/Kotlin)
// ═══════════════════════════════════════════════════════════════════════════════

/// FFI-safe error type for use across language boundaries.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ActivityFfiError {
    #[error("{message}")]
    General { message: String },
}

impl From<String> for ActivityFfiError {
    fn from(message: String) -> Self {
        ActivityFfiError::General { message }
    }
}

impl From<&str> for ActivityFfiError {
    fn from(message: &str) -> Self {
        ActivityFfiError::General {
            message: message.to_string(),
        }
    }
}

impl From<ActivityError> for ActivityFfiError {
    fn from(err: ActivityError) -> Self {
        ActivityFfiError::General {
            message: err.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Internal Error (for Rust-only use)
// ═══════════════════════════════════════════════════════════════════════════════

/// All errors that can occur in activity-core operations.
///
/// Optional fields (progress, eta, file name) never produce an error: they
/// resolve to `None` and render as a placeholder. Unrecognized states never
/// produce one either; they resolve to `PrintState::Unknown`.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    // ─────────────────────────────────────────────────────────────────────
    // Resolution Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Required field `{field}` missing for activity {instance_id}")]
    MissingRequiredField { instance_id: String, field: String },

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Home directory not found")]
    HomeDirNotFound,

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ActivityError {
    pub fn missing(instance_id: &str, field: &str) -> Self {
        ActivityError::MissingRequiredField {
            instance_id: instance_id.to_string(),
            field: field.to_string(),
        }
    }
}

/// Convenience type alias for Results using ActivityError.
pub type Result<T> = std::result::Result<T, ActivityError>;

impl From<ActivityError> for String {
    fn from(err: ActivityError) -> String {
        err.to_string()
    }
}
