//! Snapshot payload types and key conventions for print live activities.
//!
//! This crate is shared by the host-side writer and the rendering core so the
//! pushed payload and the fallback store keys cannot drift apart. The core
//! remains the authority on how values are merged; this crate only defines the
//! shapes and rejects payloads that are malformed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Push payloads above this size are dropped by the host before delivery.
pub const MAX_SNAPSHOT_BYTES: usize = 4 * 1024;

/// Fallback store key names. Every key is scoped per activity instance with
/// [`scoped_key`] before it touches the shared store.
pub mod keys {
    pub const STATE: &str = "state";
    pub const PROGRESS: &str = "progress";
    pub const ETA: &str = "eta";
    pub const FILE: &str = "file";
    pub const MACHINE_NAME: &str = "machine_name";
    pub const PRIMARY_COLOR: &str = "primary_color";
    pub const PRIMARY_COLOR_DARK: &str = "primary_color_dark";
    pub const ETA_LABEL: &str = "eta_label";
    pub const REMAINING_LABEL: &str = "remaining_label";
    /// Appended to a raw state value to form its label key (`paused_label`).
    pub const LABEL_SUFFIX: &str = "_label";
}

/// Builds the namespaced store key for one activity instance.
///
/// Two activities sharing a store never read each other's values because the
/// instance id is always the prefix.
pub fn scoped_key(instance_id: &str, key: &str) -> String {
    format!("{}_{}", instance_id, key)
}

/// Label key for a raw state value, e.g. `complete` -> `complete_label`.
pub fn state_label_key(raw_state: &str) -> String {
    format!("{}{}", raw_state, keys::LABEL_SUFFIX)
}

/// Partial state update pushed for one activity instance.
///
/// Every field is optional: an absent field means "use the fallback store".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    #[serde(default)]
    pub progress: Option<f64>,
    /// Estimated completion, epoch seconds. `0` means "unknown".
    #[serde(default)]
    pub eta: Option<i64>,
    #[serde(default)]
    pub print_state: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
}

impl ContentSnapshot {
    /// True when the snapshot carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.progress.is_none()
            && self.eta.is_none()
            && self.print_state.is_none()
            && self.file.is_none()
    }

    /// The pushed ETA as a timestamp, if it is set and positive.
    pub fn eta_timestamp(&self) -> Option<DateTime<Utc>> {
        self.eta.and_then(epoch_to_timestamp)
    }

    pub fn validate(&self) -> Result<(), ErrorInfo> {
        if let Some(progress) = self.progress {
            if !progress.is_finite() || !(0.0..=1.0).contains(&progress) {
                return Err(ErrorInfo::new(
                    "invalid_progress",
                    format!("progress must be within 0..=1, got {}", progress),
                ));
            }
        }

        if let Some(eta) = self.eta {
            if !(0..=MAX_ETA_EPOCH).contains(&eta) {
                return Err(ErrorInfo::new(
                    "invalid_eta",
                    format!("eta must be epoch seconds up to {} (0 for unknown)", MAX_ETA_EPOCH),
                ));
            }
        }

        if let Some(state) = &self.print_state {
            if state.trim().is_empty() {
                return Err(ErrorInfo::new(
                    "invalid_state",
                    "printState must not be blank when present",
                ));
            }
        }

        Ok(())
    }
}

/// Last representable ETA: 9999-12-31T23:59:59Z.
pub const MAX_ETA_EPOCH: i64 = 253_402_300_799;

/// Converts epoch seconds to a timestamp. Values `<= 0` mean "no date", and
/// so does anything past [`MAX_ETA_EPOCH`].
pub fn epoch_to_timestamp(epoch_secs: i64) -> Option<DateTime<Utc>> {
    if epoch_secs <= 0 || epoch_secs > MAX_ETA_EPOCH {
        return None;
    }
    DateTime::from_timestamp(epoch_secs, 0)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Parses and validates a raw push payload.
pub fn parse_snapshot(raw: &str) -> Result<ContentSnapshot, ErrorInfo> {
    if raw.len() > MAX_SNAPSHOT_BYTES {
        return Err(ErrorInfo::new(
            "payload_too_large",
            format!("snapshot exceeds {} bytes", MAX_SNAPSHOT_BYTES),
        ));
    }
    let value: Value = serde_json::from_str(raw).map_err(|err| {
        ErrorInfo::new(
            "invalid_json",
            format!("snapshot payload is invalid JSON: {}", err),
        )
    })?;
    parse_snapshot_value(value)
}

/// Same as [`parse_snapshot`] for an already decoded JSON value.
pub fn parse_snapshot_value(value: Value) -> Result<ContentSnapshot, ErrorInfo> {
    let snapshot: ContentSnapshot = serde_json::from_value(value).map_err(|err| {
        ErrorInfo::new(
            "invalid_params",
            format!("snapshot payload has wrong field types: {}", err),
        )
    })?;
    snapshot.validate()?;
    Ok(snapshot)
}
