//! Free functions and records exported over UniFFI.
//!
//! Hosts that keep their own store pass its entries in on every call; nothing
//! here holds state between calls. [`crate::engine::ActivityEngine`] covers
//! hosts that let the engine read `store.json` itself.

use chrono::FixedOffset;
use print_activity_protocol::{epoch_to_timestamp, parse_snapshot, ContentSnapshot};
use tracing::warn;

use crate::color::{self, ThemeVariant};
use crate::error::ActivityFfiError;
use crate::labels::StoreLabels;
use crate::presentation::{FixedCalendar, HourCycle, PresentationPolicy};
use crate::state::{PrintState, ResolvedViewModel, StateResolver};
use crate::store::{MemoryStore, StoreValue};
use crate::surface::{CapabilityTier, RenderContext, Surface, SurfaceThresholds};

// ═══════════════════════════════════════════════════════════════════════════════
// Records
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum StoreValueFfi {
    Bool { value: bool },
    Int { value: i64 },
    Double { value: f64 },
    Text { value: String },
}

impl From<StoreValueFfi> for StoreValue {
    fn from(value: StoreValueFfi) -> Self {
        match value {
            StoreValueFfi::Bool { value } => StoreValue::Bool(value),
            StoreValueFfi::Int { value } => StoreValue::Int(value),
            StoreValueFfi::Double { value } => StoreValue::Float(value),
            StoreValueFfi::Text { value } => StoreValue::Text(value),
        }
    }
}

/// One raw store entry. `key` is already instance-scoped (`{instance}_{key}`).
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct StoreEntryFfi {
    pub key: String,
    pub value: StoreValueFfi,
}

#[derive(Debug, Clone, Default, PartialEq, uniffi::Record)]
pub struct SnapshotFfi {
    pub progress: Option<f64>,
    pub eta: Option<i64>,
    pub print_state: Option<String>,
    pub file: Option<String>,
}

impl From<SnapshotFfi> for ContentSnapshot {
    fn from(snapshot: SnapshotFfi) -> Self {
        ContentSnapshot {
            progress: snapshot.progress,
            eta: snapshot.eta,
            print_state: snapshot.print_state,
            file: snapshot.file,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct ColorChannelsFfi {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct ResolvedViewModelFfi {
    pub instance_id: String,
    pub state: PrintState,
    pub raw_state: String,
    pub progress: f64,
    /// Epoch seconds; `None` when no ETA is known.
    pub eta: Option<i64>,
    pub file_name: String,
    pub machine_name: String,
    pub primary_color: u32,
    pub state_label: String,
}

impl From<ResolvedViewModel> for ResolvedViewModelFfi {
    fn from(vm: ResolvedViewModel) -> Self {
        Self {
            instance_id: vm.instance_id,
            state: vm.state,
            raw_state: vm.raw_state,
            progress: vm.progress,
            eta: vm.eta.map(|eta| eta.timestamp()),
            file_name: vm.file_name,
            machine_name: vm.machine_name,
            primary_color: vm.primary_color.value(),
            state_label: vm.state_label,
        }
    }
}

/// Frozen clock supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct ClockFfi {
    pub now_epoch: i64,
    pub utc_offset_seconds: i32,
    pub hour_cycle: HourCycle,
}

impl ClockFfi {
    pub fn calendar(&self) -> Result<FixedCalendar, ActivityFfiError> {
        let now = epoch_to_timestamp(self.now_epoch)
            .ok_or_else(|| format!("now_epoch out of range: {}", self.now_epoch))?;
        let offset = FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or_else(|| format!("utc offset out of range: {}", self.utc_offset_seconds))?;
        Ok(FixedCalendar::new(now, offset, self.hour_cycle))
    }
}

fn memory_store(entries: Vec<StoreEntryFfi>) -> MemoryStore {
    let mut store = MemoryStore::new();
    for entry in entries {
        store.insert(entry.key, entry.value.into());
    }
    store
}

// ═══════════════════════════════════════════════════════════════════════════════
// Exported Functions
// ═══════════════════════════════════════════════════════════════════════════════

#[uniffi::export]
pub fn pack_color(red: u8, green: u8, blue: u8, alpha: u8) -> u32 {
    color::pack(red, green, blue, alpha)
}

#[uniffi::export]
pub fn unpack_color(argb: u32) -> ColorChannelsFfi {
    let (red, green, blue, alpha) = color::unpack(argb);
    ColorChannelsFfi {
        red,
        green,
        blue,
        alpha,
    }
}

/// Merges the snapshot with the store. Labels are read from the same store.
#[uniffi::export]
pub fn resolve_activity(
    entries: Vec<StoreEntryFfi>,
    snapshot: Option<SnapshotFfi>,
    instance_id: String,
    theme: ThemeVariant,
) -> Result<ResolvedViewModelFfi, ActivityFfiError> {
    let snapshot: Option<ContentSnapshot> = snapshot.map(Into::into);
    if let Some(snapshot) = &snapshot {
        snapshot.validate().map_err(|e| e.to_string())?;
    }

    let store = memory_store(entries);
    let labels = StoreLabels::new(&store);
    let vm = StateResolver::new(&store, &labels).resolve(snapshot.as_ref(), &instance_id, theme)?;
    Ok(vm.into())
}

/// Countdown decision for an ETA in epoch seconds. `eta <= 0` never counts down.
#[uniffi::export]
pub fn should_show_countdown_at(
    eta: Option<i64>,
    clock: ClockFfi,
    threshold_hours: i64,
) -> Result<bool, ActivityFfiError> {
    let calendar = clock.calendar()?;
    let target = eta.and_then(epoch_to_timestamp);
    Ok(PresentationPolicy::new(&calendar).should_show_countdown(target, threshold_hours))
}

/// Renders one surface and returns it as JSON.
///
/// A snapshot that fails to parse is dropped with a warning and the surface
/// renders from the store alone.
#[uniffi::export]
pub fn render_activity_surface(
    entries: Vec<StoreEntryFfi>,
    snapshot_json: Option<String>,
    instance_id: String,
    surface: Surface,
    clock: ClockFfi,
    tier: CapabilityTier,
    thresholds: SurfaceThresholds,
) -> Result<String, ActivityFfiError> {
    let calendar = clock.calendar()?;
    let snapshot = snapshot_json.and_then(|raw| match parse_snapshot(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(instance_id = %instance_id, error = %err, "Ignoring malformed snapshot");
            None
        }
    });

    let store = memory_store(entries);
    let labels = StoreLabels::new(&store);
    let ctx = RenderContext {
        resolver: StateResolver::new(&store, &labels),
        policy: PresentationPolicy::new(&calendar),
        labels: &labels,
        tier,
        thresholds,
    };

    let rendered = ctx.render(snapshot.as_ref(), &instance_id, surface);
    serde_json::to_string(&rendered)
        .map_err(|e| ActivityFfiError::from(format!("Failed to serialize surface: {}", e)))
}
