//! ActivityEngine - entry point for hosts that let the engine own its files.
//!
//! Every call re-reads `store.json` and `config.json`: the store is written out
//! of band by the host app and the engine keeps no cache of it.
//!
//! ```rust,ignore
//! use activity_core::{ActivityEngine, LockScreenFamily, Surface};
//!
//! let engine = ActivityEngine::new()?;
//! let json = engine.render_surface(None, "printer-1".into(), Surface::LockScreen {
//!     family: LockScreenFamily::Medium,
//! })?;
//! ```

use print_activity_protocol::{parse_snapshot, ContentSnapshot};
use tracing::warn;

use crate::color::ThemeVariant;
use crate::config::{load_config, save_config, ActivityConfig};
use crate::error::ActivityFfiError;
use crate::ffi::ResolvedViewModelFfi;
use crate::labels::StoreLabels;
use crate::presentation::{HostCalendar, PresentationPolicy};
use crate::state::StateResolver;
use crate::storage::StorageConfig;
use crate::store::FileStore;
use crate::surface::{RenderContext, RenderedSurface, Surface};

#[derive(uniffi::Object)]
pub struct ActivityEngine {
    storage: StorageConfig,
}

impl ActivityEngine {
    /// Used for testing with temp directories. Not exposed to FFI.
    pub fn with_storage(storage: StorageConfig) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn config(&self) -> ActivityConfig {
        load_config(&self.storage)
    }

    pub fn set_config(&self, config: &ActivityConfig) -> Result<(), ActivityFfiError> {
        save_config(&self.storage, config).map_err(ActivityFfiError::from)
    }

    /// Renders every surface against an explicit calendar.
    pub fn render_all_with_calendar(
        &self,
        calendar: &dyn HostCalendar,
        snapshot: Option<&ContentSnapshot>,
        instance_id: &str,
    ) -> Vec<RenderedSurface> {
        let config = load_config(&self.storage);
        self.with_context(&config, calendar, |ctx| ctx.render_all(snapshot, instance_id))
    }

    /// Renders one surface against an explicit calendar.
    pub fn render_with_calendar(
        &self,
        calendar: &dyn HostCalendar,
        snapshot: Option<&ContentSnapshot>,
        instance_id: &str,
        surface: Surface,
    ) -> RenderedSurface {
        let config = load_config(&self.storage);
        self.with_context(&config, calendar, |ctx| {
            ctx.render(snapshot, instance_id, surface)
        })
    }

    fn with_context<T>(
        &self,
        config: &ActivityConfig,
        calendar: &dyn HostCalendar,
        f: impl FnOnce(&RenderContext<'_>) -> T,
    ) -> T {
        let store = self.load_store();
        let labels = StoreLabels::new(&store);
        let ctx = RenderContext {
            resolver: StateResolver::new(&store, &labels).with_fallback_color(config.fallback_color),
            policy: PresentationPolicy::new(calendar),
            labels: &labels,
            tier: config.capability_tier,
            thresholds: config.thresholds,
        };
        f(&ctx)
    }

    fn load_store(&self) -> FileStore {
        let path = self.storage.store_file();
        FileStore::load(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "Falling back to empty store");
            FileStore::empty(&path)
        })
    }
}

#[uniffi::export]
impl ActivityEngine {
    /// Creates an engine rooted at `~/.print-activity/`.
    #[uniffi::constructor]
    pub fn new() -> Result<Self, ActivityFfiError> {
        Ok(Self::with_storage(StorageConfig::from_home()?))
    }

    pub fn root_dir(&self) -> String {
        self.storage.root().to_string_lossy().to_string()
    }

    /// Resolves one instance from `store.json` plus an optional snapshot.
    pub fn resolve(
        &self,
        snapshot_json: Option<String>,
        instance_id: String,
        theme: ThemeVariant,
    ) -> Result<ResolvedViewModelFfi, ActivityFfiError> {
        let snapshot = match snapshot_json {
            Some(raw) => Some(parse_snapshot(&raw).map_err(|e| e.to_string())?),
            None => None,
        };
        let config = load_config(&self.storage);
        let store = self.load_store();
        let labels = StoreLabels::new(&store);
        let vm = StateResolver::new(&store, &labels)
            .with_fallback_color(config.fallback_color)
            .resolve(snapshot.as_ref(), &instance_id, theme)?;
        Ok(vm.into())
    }

    /// Renders one surface with the system clock and returns it as JSON.
    pub fn render_surface(
        &self,
        snapshot_json: Option<String>,
        instance_id: String,
        surface: Surface,
    ) -> Result<String, ActivityFfiError> {
        let snapshot = snapshot_json.and_then(|raw| match parse_snapshot(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(instance_id = %instance_id, error = %err, "Ignoring malformed snapshot");
                None
            }
        });
        let config = load_config(&self.storage);
        let calendar = config.system_calendar();
        let rendered = self.with_context(&config, &calendar, |ctx| {
            ctx.render(snapshot.as_ref(), &instance_id, surface)
        });
        serde_json::to_string(&rendered)
            .map_err(|e| ActivityFfiError::from(format!("Failed to serialize surface: {}", e)))
    }
}
