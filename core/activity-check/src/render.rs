//! Subcommand implementations. Each returns the JSON to print.

use std::path::PathBuf;

use activity_core::{
    load_config, ActivityConfig, CapabilityTier, FileStore, FixedCalendar, HostCalendar,
    InstanceStore, PresentationPolicy, RenderContext, StateResolver, StorageConfig, StoreLabels,
    Surface, SystemCalendar, TimePresentation,
};
use chrono::{DateTime, FixedOffset, Utc};
use print_activity_protocol::{epoch_to_timestamp, parse_snapshot, ContentSnapshot};
use serde::Serialize;
use tracing::{debug, warn};

use crate::ClockArgs;

pub struct RenderArgs {
    pub instance: String,
    pub store: Option<PathBuf>,
    pub snapshot: Option<String>,
    /// `None` renders every surface.
    pub surface: Option<Surface>,
    pub clock: ClockArgs,
    pub tier: Option<CapabilityTier>,
}

pub fn storage(root: Option<PathBuf>) -> Result<StorageConfig, String> {
    match root {
        Some(root) => Ok(StorageConfig::with_root(root)),
        None => StorageConfig::from_home().map_err(|e| e.to_string()),
    }
}

fn load_store(storage: &StorageConfig, path: Option<PathBuf>) -> Result<FileStore, String> {
    let path = path.unwrap_or_else(|| storage.store_file());
    debug!(path = %path.display(), "Loading store");
    FileStore::load(&path).map_err(|e| e.to_string())
}

/// Parses `--snapshot`: inline JSON, or `@path` for a file.
fn load_snapshot(arg: Option<&str>) -> Result<Option<ContentSnapshot>, String> {
    let Some(arg) = arg else {
        return Ok(None);
    };

    let raw = match arg.strip_prefix('@') {
        Some(path) => fs_err::read_to_string(path).map_err(|e| e.to_string())?,
        None => arg.to_string(),
    };

    parse_snapshot(&raw)
        .map(Some)
        .map_err(|e| format!("invalid snapshot: {}", e))
}

fn calendar(clock: &ClockArgs, config: &ActivityConfig) -> Result<Box<dyn HostCalendar>, String> {
    let system = config.system_calendar();
    let hour_cycle = clock
        .hour_cycle
        .map(Into::into)
        .unwrap_or_else(|| system.hour_cycle());

    match clock.now {
        Some(epoch) => {
            let now = DateTime::from_timestamp(epoch, 0)
                .ok_or_else(|| format!("--now out of range: {}", epoch))?;
            let offset = FixedOffset::east_opt(clock.utc_offset)
                .ok_or_else(|| format!("--utc-offset out of range: {}", clock.utc_offset))?;
            Ok(Box::new(FixedCalendar::new(now, offset, hour_cycle)))
        }
        None => Ok(Box::new(SystemCalendar::new(hour_cycle))),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}

pub fn run_render(storage: &StorageConfig, args: RenderArgs) -> Result<String, String> {
    let mut config = load_config(storage);
    if let Some(tier) = args.tier {
        config.capability_tier = tier;
    }

    let store = load_store(storage, args.store)?;
    let snapshot = load_snapshot(args.snapshot.as_deref())?;
    let calendar = calendar(&args.clock, &config)?;
    let labels = StoreLabels::new(&store);

    let ctx = RenderContext {
        resolver: StateResolver::new(&store, &labels).with_fallback_color(config.fallback_color),
        policy: PresentationPolicy::new(calendar.as_ref()),
        labels: &labels,
        tier: config.capability_tier,
        thresholds: config.thresholds,
    };

    match args.surface {
        Some(surface) => to_json(&ctx.render(snapshot.as_ref(), &args.instance, surface)),
        None => to_json(&ctx.render_all(snapshot.as_ref(), &args.instance)),
    }
}

pub fn run_keys(
    storage: &StorageConfig,
    instance: &str,
    store_path: Option<PathBuf>,
) -> Result<String, String> {
    let store = load_store(storage, store_path)?;
    let keys = store.as_memory().keys_for(instance);
    if keys.is_empty() {
        warn!(instance, path = %store.file_path().display(), "No stored values for instance");
    }

    let view = InstanceStore::new(&store, instance);
    let values: serde_json::Map<String, serde_json::Value> = keys
        .into_iter()
        .filter_map(|key| {
            let value = serde_json::to_value(view.get(&key)?).ok()?;
            Some((key, value))
        })
        .collect();

    to_json(&values)
}

#[derive(Debug, Serialize)]
struct TimeReport {
    eta: Option<DateTime<Utc>>,
    hours_until: Option<i64>,
    countdown: bool,
    presentation: TimePresentation,
    text: String,
}

pub fn run_time(
    storage: &StorageConfig,
    eta: i64,
    threshold: i64,
    clock: &ClockArgs,
) -> Result<String, String> {
    let config = load_config(storage);
    let calendar = calendar(clock, &config)?;
    let policy = PresentationPolicy::new(calendar.as_ref());
    let target = epoch_to_timestamp(eta);
    let presentation = policy.present(target, threshold);

    to_json(&TimeReport {
        eta: target,
        hours_until: target.map(|t| policy.hours_until(t)),
        countdown: policy.should_show_countdown(target, threshold),
        text: presentation.text(calendar.now()),
        presentation,
    })
}
