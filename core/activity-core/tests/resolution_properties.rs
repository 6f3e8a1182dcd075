use activity_core::color::{pack, unpack};
use activity_core::{
    scoped_key, CapabilityTier, ContentSnapshot, FixedCalendar, HourCycle, LockScreenFamily,
    MapLabels, MemoryStore, PresentationPolicy, PrintState, RenderContext, StateResolver,
    StoreValue, Surface, SurfaceThresholds, ThemeVariant, TimePresentation,
};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap()
}

fn store_with(instance_id: &str, values: &[(&str, StoreValue)]) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_scoped(instance_id, "machine_name", StoreValue::Text("Voron".into()));
    for (key, value) in values {
        store.insert_scoped(instance_id, key, value.clone());
    }
    store
}

fn snapshot(state: Option<&str>, progress: Option<f64>, eta: Option<i64>) -> ContentSnapshot {
    ContentSnapshot {
        progress,
        eta,
        print_state: state.map(str::to_string),
        file: None,
    }
}

#[test]
fn test_complete_always_resolves_to_full_progress() {
    let labels = MapLabels::english();
    let cases = [
        (Some("complete"), Some(0.0), StoreValue::Float(0.3)),
        (Some("complete"), None, StoreValue::Float(0.99)),
        (None, Some(0.2), StoreValue::Float(0.0)),
    ];

    for (state, progress, stored) in cases {
        let store = store_with(
            "p",
            &[
                ("state", StoreValue::Text("complete".into())),
                ("progress", stored),
            ],
        );
        let snap = snapshot(state, progress, None);
        let vm = StateResolver::new(&store, &labels)
            .resolve(Some(&snap), "p", ThemeVariant::Light)
            .unwrap();
        assert_eq!(vm.state, PrintState::Complete);
        assert_eq!(vm.progress, 1.0);
    }
}

#[test]
fn test_pack_unpack_identity() {
    for argb in [0u32, 1, 0x00FF_FFFF, 0xFF00_0000, 0x8040_20C0, u32::MAX] {
        let (r, g, b, a) = unpack(argb);
        assert_eq!(pack(r, g, b, a), argb);
    }
    for (r, g, b, a) in [(0, 0, 0, 0), (255, 0, 128, 7), (1, 2, 3, 255)] {
        assert_eq!(unpack(pack(r, g, b, a)), (r, g, b, a));
    }
}

#[test]
fn test_difference_equal_to_threshold_is_never_a_countdown() {
    let calendar = FixedCalendar::utc(now());
    let policy = PresentationPolicy::new(&calendar);
    for threshold in 1..=6 {
        let target = now() + Duration::hours(threshold);
        assert!(!policy.should_show_countdown(Some(target), threshold));
        assert!(policy.should_show_countdown(Some(target - Duration::seconds(1)), threshold));
    }
}

#[test]
fn test_one_hour_eta_counts_down_on_large_and_small_surfaces() {
    let labels = MapLabels::english();
    let store = store_with("p", &[]);
    let created = now();
    let snap = snapshot(Some("printing"), Some(0.1), Some(created.timestamp() + 3600));

    let vm = StateResolver::new(&store, &labels)
        .resolve(Some(&snap), "p", ThemeVariant::Light)
        .unwrap();

    // Rendered a moment after the snapshot was built.
    let calendar = FixedCalendar::utc(created + Duration::seconds(1));
    let policy = PresentationPolicy::new(&calendar);
    assert!(policy.should_show_countdown(vm.eta, 3));
    assert!(policy.should_show_countdown(vm.eta, 1));
}

#[test]
fn test_store_alone_resolves_paused_job() {
    let labels = MapLabels::english();
    let store = store_with(
        "p",
        &[
            ("state", StoreValue::Text("paused".into())),
            ("progress", StoreValue::Float(0.5)),
            ("file", StoreValue::Text("benchy.gcode".into())),
        ],
    );

    let vm = StateResolver::new(&store, &labels)
        .resolve(None, "p", ThemeVariant::Light)
        .unwrap();
    assert_eq!(vm.state, PrintState::Paused);
    assert_eq!(vm.progress, 0.5);
    assert_eq!(vm.file_name, "benchy.gcode");
    assert_eq!(vm.state_label, "Paused");
}

#[test]
fn test_zero_eta_renders_placeholder() {
    let labels = MapLabels::english();
    let store = store_with(
        "p",
        &[
            ("state", StoreValue::Text("printing".into())),
            ("eta", StoreValue::Int(0)),
        ],
    );

    let vm = StateResolver::new(&store, &labels)
        .resolve(None, "p", ThemeVariant::Light)
        .unwrap();
    assert_eq!(vm.eta, None);

    let calendar = FixedCalendar::utc(now());
    let policy = PresentationPolicy::new(&calendar);
    assert_eq!(policy.present(vm.eta, 3), TimePresentation::Placeholder);
    assert_eq!(policy.format_or_placeholder(vm.eta), "--");
}

#[test]
fn test_far_future_eta_degrades_to_placeholder() {
    let labels = MapLabels::english();
    let store = store_with(
        "p",
        &[
            ("state", StoreValue::Text("printing".into())),
            ("eta", StoreValue::Int(DateTime::<Utc>::MAX_UTC.timestamp())),
        ],
    );
    let offset = FixedOffset::east_opt(14 * 3600).unwrap();
    let calendar = FixedCalendar::new(now(), offset, HourCycle::H23);
    let ctx = RenderContext {
        resolver: StateResolver::new(&store, &labels),
        policy: PresentationPolicy::new(&calendar),
        labels: &labels,
        tier: CapabilityTier::Legacy,
        thresholds: SurfaceThresholds::default(),
    };

    let rendered = ctx.render(
        None,
        "p",
        Surface::LockScreen {
            family: LockScreenFamily::Medium,
        },
    );
    assert!(!rendered.layout.is_placeholder());
    assert_eq!(rendered.view_model.unwrap().eta, None);
    assert_eq!(ctx.render_all(None, "p").len(), Surface::ALL.len());
}

#[test]
fn test_mixed_case_state_uses_canonical_label() {
    let labels = MapLabels::english();
    let store = store_with("p", &[("state", StoreValue::Text("Paused".into()))]);
    let calendar = FixedCalendar::utc(now());
    let ctx = RenderContext {
        resolver: StateResolver::new(&store, &labels),
        policy: PresentationPolicy::new(&calendar),
        labels: &labels,
        tier: CapabilityTier::Legacy,
        thresholds: SurfaceThresholds::default(),
    };

    let rendered = ctx.render(None, "p", Surface::Minimal);
    assert!(!rendered.layout.is_placeholder());
    let vm = rendered.view_model.unwrap();
    assert_eq!(vm.state, PrintState::Paused);
    assert_eq!(vm.state_label, "Paused");
}

#[test]
fn test_instances_never_share_values() {
    let labels = MapLabels::english();
    let mut store = MemoryStore::new();
    for (id, state, file) in [("a", "printing", "a.gcode"), ("b", "error", "b.gcode")] {
        store.insert(scoped_key(id, "state"), StoreValue::Text(state.into()));
        store.insert(scoped_key(id, "file"), StoreValue::Text(file.into()));
        store.insert(scoped_key(id, "machine_name"), StoreValue::Text(id.into()));
    }

    let resolver = StateResolver::new(&store, &labels);
    let a = resolver.resolve(None, "a", ThemeVariant::Dark).unwrap();
    let b = resolver.resolve(None, "b", ThemeVariant::Dark).unwrap();
    assert_eq!((a.state, a.file_name.as_str()), (PrintState::Printing, "a.gcode"));
    assert_eq!((b.state, b.file_name.as_str()), (PrintState::Error, "b.gcode"));
}

#[test]
fn test_resolution_is_safe_across_threads() {
    let labels = MapLabels::english();
    let store = store_with(
        "p",
        &[
            ("state", StoreValue::Text("printing".into())),
            ("progress", StoreValue::Float(0.25)),
        ],
    );

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let vm = StateResolver::new(&store, &labels)
                    .resolve(None, "p", ThemeVariant::Light)
                    .unwrap();
                assert_eq!(vm.progress, 0.25);
            });
        }
    });
}
