//! Concrete layouts, one builder per surface region.
//!
//! Every builder is a pure function of the view model plus the surface's own
//! parameters. Nothing here reads the store or the clock directly.

use print_activity_protocol::keys;
use serde::{Deserialize, Serialize};

use crate::color::Argb;
use crate::error::{ActivityError, Result};
use crate::labels::LabelResolver;
use crate::presentation::{CountdownInterval, PresentationPolicy, TimePresentation};
use crate::state::{PrintState, ResolvedViewModel, PLACEHOLDER};

use super::style::{style_for, StatusIcon, Tint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressBar {
    pub value: f64,
    pub tint: Tint,
}

/// Trailing indicator used by the expanded, compact trailing and minimal regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusIndicator {
    ProgressRing { progress: f64, color: Tint },
    Icon { icon: StatusIcon, tint: Tint },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Headline {
    /// Printing: time on top, file name underneath.
    Eta {
        eta: TimePresentation,
        file_name: String,
    },
    FileName { file_name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FooterTrailing {
    StateLabel { text: String, tint: Tint },
    /// Static ETA, shown when the headline already counts down.
    Timestamp { text: String },
    Percent { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardLockScreen {
    pub headline: Headline,
    pub progress_bar: ProgressBar,
    pub machine_name: String,
    pub trailing: FooterTrailing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallHeaderIcon {
    pub icon: StatusIcon,
    pub tint: Tint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SmallBody {
    Eta { eta: TimePresentation },
    StateLabel { text: String, tint: Tint },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallLockScreen {
    pub icon: Option<SmallHeaderIcon>,
    pub machine_name: String,
    pub body: SmallBody,
    pub progress_bar: Option<ProgressBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaRow {
    /// "Remaining" over a countdown, "ETA" over a timestamp.
    pub label: String,
    pub eta: TimePresentation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedRegion {
    pub machine_name: String,
    pub indicator: StatusIndicator,
    pub file_name: String,
    pub eta_row: Option<EtaRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompactLeading {
    Countdown(CountdownInterval),
    Logo,
}

/// Shown when a required field is missing. Never fails to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderLayout {
    pub text: String,
    pub reason: String,
}

impl PlaceholderLayout {
    pub fn for_error(err: &ActivityError) -> Self {
        Self {
            text: PLACEHOLDER.to_string(),
            reason: err.to_string(),
        }
    }
}

pub fn status_indicator(vm: &ResolvedViewModel) -> StatusIndicator {
    let style = style_for(vm.state, vm.primary_color);
    match style.icon {
        Some(icon) => StatusIndicator::Icon {
            icon,
            tint: style.tint,
        },
        None => StatusIndicator::ProgressRing {
            progress: vm.progress,
            color: style.tint,
        },
    }
}

pub fn standard_lock_screen(
    vm: &ResolvedViewModel,
    policy: &PresentationPolicy<'_>,
    threshold_hours: i64,
) -> StandardLockScreen {
    let style = style_for(vm.state, vm.primary_color);
    let printing = vm.state.is_printing();

    let headline = if printing {
        Headline::Eta {
            eta: policy.present(vm.eta, threshold_hours),
            file_name: vm.file_name.clone(),
        }
    } else {
        Headline::FileName {
            file_name: vm.file_name.clone(),
        }
    };

    let bar_tint = if printing {
        Tint::Theme(vm.primary_color)
    } else {
        style.tint
    };

    let trailing = if !printing {
        FooterTrailing::StateLabel {
            text: vm.state_label.clone(),
            tint: style.tint,
        }
    } else if policy.should_show_countdown(vm.eta, threshold_hours) {
        FooterTrailing::Timestamp {
            text: policy.format_or_placeholder(vm.eta),
        }
    } else {
        FooterTrailing::Percent {
            text: vm.progress_percent(),
        }
    };

    StandardLockScreen {
        headline,
        progress_bar: ProgressBar {
            value: vm.progress,
            tint: bar_tint,
        },
        machine_name: vm.machine_name.clone(),
        trailing,
    }
}

pub fn small_lock_screen(
    vm: &ResolvedViewModel,
    policy: &PresentationPolicy<'_>,
    threshold_hours: i64,
) -> SmallLockScreen {
    let style = style_for(vm.state, vm.primary_color);
    let icon = style.icon.map(|icon| SmallHeaderIcon {
        icon,
        tint: style.tint,
    });

    let body = match (vm.state, vm.eta) {
        (PrintState::Printing, Some(eta)) => SmallBody::Eta {
            eta: policy.present(Some(eta), threshold_hours),
        },
        (PrintState::Printing, None) => SmallBody::Empty,
        _ => SmallBody::StateLabel {
            text: vm.state_label.clone(),
            tint: style.tint,
        },
    };

    let progress_bar = vm.state.is_printing().then(|| ProgressBar {
        value: vm.progress,
        tint: Tint::Theme(vm.primary_color),
    });

    SmallLockScreen {
        icon,
        machine_name: vm.machine_name.clone(),
        body,
        progress_bar,
    }
}

pub fn expanded_region(
    vm: &ResolvedViewModel,
    policy: &PresentationPolicy<'_>,
    labels: &dyn LabelResolver,
    threshold_hours: i64,
) -> Result<ExpandedRegion> {
    let eta_row = if vm.state.is_printing() {
        let eta = policy.present(vm.eta, threshold_hours);
        let label_key = if eta.is_countdown() {
            keys::REMAINING_LABEL
        } else {
            keys::ETA_LABEL
        };
        let label = labels
            .resolve(&vm.instance_id, label_key)
            .ok_or_else(|| ActivityError::missing(&vm.instance_id, label_key))?;
        Some(EtaRow { label, eta })
    } else {
        None
    };

    Ok(ExpandedRegion {
        machine_name: vm.machine_name.clone(),
        indicator: status_indicator(vm),
        file_name: vm.file_name.clone(),
        eta_row,
    })
}

pub fn compact_leading(
    vm: &ResolvedViewModel,
    policy: &PresentationPolicy<'_>,
    threshold_hours: i64,
) -> CompactLeading {
    match vm.eta {
        Some(eta)
            if !vm.state.is_complete() && policy.should_show_countdown(Some(eta), threshold_hours) =>
        {
            CompactLeading::Countdown(CountdownInterval::new(policy.calendar().now(), eta))
        }
        _ => CompactLeading::Logo,
    }
}

/// Keyline tint of the companion region.
pub fn keyline_tint(vm: &ResolvedViewModel) -> Argb {
    vm.primary_color
}
