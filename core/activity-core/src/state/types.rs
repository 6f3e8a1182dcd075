//! View model types produced by the resolver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::Argb;

/// Placeholder text for any field that has no value in either source.
pub const PLACEHOLDER: &str = "--";

/// Phase of the print job.
///
/// The set is closed. Anything else the host sends maps to `Unknown`, which
/// every surface renders neutrally instead of failing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, uniffi::Enum,
)]
#[serde(rename_all = "lowercase")]
pub enum PrintState {
    Printing,
    Paused,
    Error,
    Complete,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PrintState {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "printing" => PrintState::Printing,
            "paused" => PrintState::Paused,
            "error" => PrintState::Error,
            "complete" => PrintState::Complete,
            _ => PrintState::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrintState::Printing => "printing",
            PrintState::Paused => "paused",
            PrintState::Error => "error",
            PrintState::Complete => "complete",
            PrintState::Unknown => "unknown",
        }
    }

    pub fn is_printing(self) -> bool {
        self == PrintState::Printing
    }

    pub fn is_complete(self) -> bool {
        self == PrintState::Complete
    }

    pub fn is_recognized(self) -> bool {
        self != PrintState::Unknown
    }
}

/// Fully resolved, render-ready state of one activity at one point in time.
///
/// Built fresh on every render and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedViewModel {
    pub instance_id: String,
    pub state: PrintState,
    /// State string as delivered, kept for label lookup and diagnostics.
    pub raw_state: String,
    /// `0.0..=1.0`; exactly `1.0` whenever `state` is `Complete`.
    pub progress: f64,
    pub eta: Option<DateTime<Utc>>,
    pub file_name: String,
    pub machine_name: String,
    pub primary_color: Argb,
    pub state_label: String,
}

impl ResolvedViewModel {
    /// Progress as a whole percentage, e.g. `"42%"`.
    pub fn progress_percent(&self) -> String {
        format!("{:.0}%", self.progress * 100.0)
    }
}
