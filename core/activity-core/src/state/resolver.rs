//! Merges a pushed snapshot with the fallback store into one view model.
//!
//! Each field has exactly one precedence function below. Snapshot values win
//! when present; the store fills the gaps; placeholders cover the rest.

use chrono::{DateTime, Utc};
use print_activity_protocol::{epoch_to_timestamp, keys, state_label_key, ContentSnapshot};
use tracing::debug;

use crate::color::{Argb, ThemeVariant};
use crate::error::{ActivityError, Result};
use crate::labels::LabelResolver;
use crate::store::{InstanceStore, KeyedStore};

use super::types::{PrintState, ResolvedViewModel, PLACEHOLDER};

/// Used when the store has no machine color for the requested variant.
pub const FALLBACK_PRIMARY_COLOR: Argb = Argb::new(0xFF9E9E9E);

/// Resolves view models against an injected, read-only store and label source.
#[derive(Clone, Copy)]
pub struct StateResolver<'a> {
    store: &'a dyn KeyedStore,
    labels: &'a dyn LabelResolver,
    fallback_color: Argb,
}

impl<'a> StateResolver<'a> {
    pub fn new(store: &'a dyn KeyedStore, labels: &'a dyn LabelResolver) -> Self {
        Self {
            store,
            labels,
            fallback_color: FALLBACK_PRIMARY_COLOR,
        }
    }

    pub fn with_fallback_color(mut self, color: Argb) -> Self {
        self.fallback_color = color;
        self
    }

    /// Builds the view model for `instance_id`.
    ///
    /// Fails only when a field documented as always present (state, machine
    /// name, state label) is missing from every source.
    pub fn resolve(
        &self,
        snapshot: Option<&ContentSnapshot>,
        instance_id: &str,
        theme: ThemeVariant,
    ) -> Result<ResolvedViewModel> {
        let store = InstanceStore::new(self.store, instance_id);

        let raw_state = resolve_raw_state(snapshot, &store)?;
        let state = PrintState::parse(&raw_state);
        if !state.is_recognized() {
            debug!(instance_id, raw_state = %raw_state, "Unrecognized print state, rendering neutral");
        }

        let progress = resolve_progress(state, snapshot, &store);
        let eta = resolve_eta(snapshot, &store);
        let file_name = resolve_file_name(snapshot, &store);
        let machine_name = store.require_string(keys::MACHINE_NAME)?;
        let state_label = resolve_state_label(self.labels, instance_id, state, &raw_state)?;
        let primary_color = resolve_primary_color(&store, theme).unwrap_or(self.fallback_color);

        Ok(ResolvedViewModel {
            instance_id: instance_id.to_string(),
            state,
            raw_state,
            progress,
            eta,
            file_name,
            machine_name,
            primary_color,
            state_label,
        })
    }
}

/// Snapshot state, else stored state. Neither is a hard error.
pub fn resolve_raw_state(
    snapshot: Option<&ContentSnapshot>,
    store: &InstanceStore<'_>,
) -> Result<String> {
    snapshot
        .and_then(|s| s.print_state.clone())
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            store
                .get_string(keys::STATE)
                .filter(|s| !s.trim().is_empty())
        })
        .ok_or_else(|| ActivityError::missing(store.instance_id(), keys::STATE))
}

/// `1.0` for complete prints regardless of either source, otherwise snapshot
/// then store then `0.0`, clamped into `0.0..=1.0`.
pub fn resolve_progress(
    state: PrintState,
    snapshot: Option<&ContentSnapshot>,
    store: &InstanceStore<'_>,
) -> f64 {
    if state.is_complete() {
        return 1.0;
    }

    let progress = snapshot
        .and_then(|s| s.progress)
        .or_else(|| store.get_double(keys::PROGRESS));

    match progress {
        Some(p) if p.is_finite() => p.clamp(0.0, 1.0),
        Some(_) | None => {
            debug!(instance_id = store.instance_id(), "Progress absent, using 0");
            0.0
        }
    }
}

/// Snapshot ETA, else stored ETA. Non-positive epochs mean "no date".
pub fn resolve_eta(
    snapshot: Option<&ContentSnapshot>,
    store: &InstanceStore<'_>,
) -> Option<DateTime<Utc>> {
    let epoch = snapshot
        .and_then(|s| s.eta)
        .or_else(|| store.get_int(keys::ETA))?;
    epoch_to_timestamp(epoch)
}

pub fn resolve_file_name(snapshot: Option<&ContentSnapshot>, store: &InstanceStore<'_>) -> String {
    snapshot
        .and_then(|s| s.file.clone())
        .or_else(|| store.get_string(keys::FILE))
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| {
            debug!(instance_id = store.instance_id(), "File name absent, using placeholder");
            PLACEHOLDER.to_string()
        })
}

/// Label for the state. Recognized states require one; unknown states show
/// the raw value when the host has no label for it.
pub fn resolve_state_label(
    labels: &dyn LabelResolver,
    instance_id: &str,
    state: PrintState,
    raw_state: &str,
) -> Result<String> {
    let key = if state.is_recognized() {
        state_label_key(state.as_str())
    } else {
        state_label_key(raw_state.trim())
    };
    match labels.resolve(instance_id, &key) {
        Some(label) => Ok(label),
        None if !state.is_recognized() => Ok(raw_state.trim().to_string()),
        None => Err(ActivityError::missing(instance_id, &key)),
    }
}

pub fn resolve_primary_color(store: &InstanceStore<'_>, theme: ThemeVariant) -> Option<Argb> {
    store.get_int(theme.color_key()).map(Argb::from_stored)
}
