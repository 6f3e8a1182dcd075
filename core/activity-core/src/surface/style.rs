//! State → icon / tint mapping shared by every surface.

use serde::{Deserialize, Serialize};

use crate::color::Argb;
use crate::state::PrintState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    Checkmark,
    Pause,
    Warning,
}

impl StatusIcon {
    /// SF Symbol name the host draws for this icon.
    pub fn symbol_name(self) -> &'static str {
        match self {
            StatusIcon::Checkmark => "checkmark.circle",
            StatusIcon::Pause => "pause.circle",
            StatusIcon::Warning => "exclamationmark.triangle",
        }
    }
}

/// Semantic color slot. The host maps the fixed slots to its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", content = "argb", rename_all = "snake_case")]
pub enum Tint {
    /// The machine's own color.
    Theme(Argb),
    Success,
    Danger,
    Neutral,
}

/// Icon, tint and progress treatment for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateStyle {
    pub icon: Option<StatusIcon>,
    pub tint: Tint,
    pub shows_progress_ring: bool,
}

pub fn style_for(state: PrintState, theme_color: Argb) -> StateStyle {
    match state {
        PrintState::Complete => StateStyle {
            icon: Some(StatusIcon::Checkmark),
            tint: Tint::Success,
            shows_progress_ring: false,
        },
        PrintState::Paused => StateStyle {
            icon: Some(StatusIcon::Pause),
            tint: Tint::Neutral,
            shows_progress_ring: false,
        },
        PrintState::Error => StateStyle {
            icon: Some(StatusIcon::Warning),
            tint: Tint::Danger,
            shows_progress_ring: false,
        },
        PrintState::Printing => StateStyle {
            icon: None,
            tint: Tint::Theme(theme_color),
            shows_progress_ring: true,
        },
        PrintState::Unknown => StateStyle {
            icon: None,
            tint: Tint::Neutral,
            shows_progress_ring: true,
        },
    }
}
