//! # activity-core
//!
//! State resolution and time presentation for a print job's live activity:
//! the lock screen card and the companion region (expanded, compact, minimal).
//!
//! ## Design Principles
//!
//! - **Synchronous and stateless**: every render resolves a fresh view model.
//!   Nothing is cached between calls.
//! - **Snapshot first**: a pushed [`ContentSnapshot`] field wins over the
//!   per-instance fallback store, one precedence function per field.
//! - **Graceful degradation**: a missing required field renders a placeholder
//!   surface, never an error the host has to handle.
//! - **Injected collaborators**: store, labels and calendar are traits, so
//!   tests run against fixtures and a frozen clock.
//! - **FFI-ready**: UniFFI annotations for Swift/Kotlin bindings.
//!   Prefer additive public API changes; removing or renaming breaks FFI clients.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use activity_core::{
//!     FixedCalendar, MapLabels, MemoryStore, PresentationPolicy, RenderContext,
//!     StateResolver, Surface,
//! };
//!
//! let store = MemoryStore::new();
//! let labels = MapLabels::english();
//! let calendar = FixedCalendar::utc(chrono::Utc::now());
//! let ctx = RenderContext {
//!     resolver: StateResolver::new(&store, &labels),
//!     policy: PresentationPolicy::new(&calendar),
//!     labels: &labels,
//!     tier: Default::default(),
//!     thresholds: Default::default(),
//! };
//! let rendered = ctx.render(None, "printer-1", Surface::Expanded);
//! ```

// UniFFI scaffolding for Swift/Kotlin bindings
uniffi::setup_scaffolding!();

pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod labels;
pub mod presentation;
pub mod state;
pub mod storage;
pub mod store;
pub mod surface;

pub use color::{Argb, Rgba, ThemeVariant};
pub use config::{load_config, read_config, save_config, ActivityConfig};
pub use engine::ActivityEngine;
pub use error::{ActivityError, ActivityFfiError, Result};
pub use ffi::*;
pub use labels::{LabelResolver, MapLabels, StoreLabels};
pub use presentation::{
    CountdownInterval, FixedCalendar, HostCalendar, HourCycle, PresentationPolicy,
    SystemCalendar, TimePresentation,
};
pub use print_activity_protocol::{parse_snapshot, scoped_key, ContentSnapshot};
pub use state::{PrintState, ResolvedViewModel, StateResolver, PLACEHOLDER};
pub use storage::StorageConfig;
pub use store::{FileStore, InstanceStore, KeyedStore, MemoryStore, StoreValue};
pub use surface::{
    select_lock_screen_layout, CapabilityTier, LockScreenFamily, LockScreenLayout,
    RenderContext, RenderedSurface, Surface, SurfaceLayout, SurfaceThresholds,
};
