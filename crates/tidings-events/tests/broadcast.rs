//! End-to-end broadcast behaviour through the public API.

use std::rc::Rc;

use tidings_config::Config;
use tidings_events::prelude::*;
use tidings_test::{Recorder, init_test_logging};

category! {
    /// A script file started sourcing.
    SourcingStarted(&str) => SourcingStartedListeners, ScopedSourcingStartedListener;

    /// Same payload, different category.
    SourcingFinished(&str) => SourcingFinishedListeners, ScopedSourcingFinishedListener;

    /// Owned payload shared by every listener.
    ScriptLoaded(Rc<str>) => ScriptLoadedListeners, ScopedScriptLoadedListener;
}

fn explode(_: &str) {
    panic!("listener failure");
}

#[test]
fn two_listeners_then_remove_first() {
    init_test_logging();
    let registries = Registries::new();
    let started: Rc<SourcingStartedListeners> =
        registries.registry::<SourcingStarted, Ref<str>>();
    let recorder = Recorder::<String>::new();

    let a = started.add(recorder.borrowed_sink::<str>("A"));
    let b = started.add(recorder.borrowed_sink::<str>("B"));
    assert_eq!(a, ListenerId::from_raw(1));
    assert_eq!(b, ListenerId::from_raw(2));

    let x = String::from("x.tcl");
    started.invoke((x.as_str(),));
    assert_eq!(recorder.calls(), vec![("A", x.clone()), ("B", x)]);

    assert!(started.remove(ListenerId::from_raw(1)));
    recorder.clear();

    let y = String::from("y.tcl");
    started.invoke((y.as_str(),));
    assert_eq!(recorder.calls(), vec![("B", y)]);

    assert!(!started.remove(ListenerId::from_raw(1)));
}

#[test]
fn categories_with_same_payload_do_not_mix() {
    init_test_logging();
    let registries = Registries::new();
    let recorder = Recorder::<String>::new();

    let _start =
        ScopedSourcingStartedListener::new(&registries, recorder.borrowed_sink::<str>("started"));
    let finish = ScopedSourcingFinishedListener::new(
        &registries,
        recorder.borrowed_sink::<str>("finished"),
    );
    assert_eq!(finish.id(), ListenerId::from_raw(1));

    let finished: Rc<SourcingFinishedListeners> =
        registries.registry::<SourcingFinished, Ref<str>>();
    finished.invoke(("init.tcl",));
    assert_eq!(recorder.labels(), vec!["finished"]);
    assert!(!registries.registry::<SourcingStarted, Ref<str>>().is_empty());
}

#[test]
fn scoped_listener_tracks_registry_size() {
    init_test_logging();
    let registries = Registries::new();
    let started = registries.registry::<SourcingStarted, Ref<str>>();
    let manual = started.add(|_: &str| {});

    let before = started.len();
    let scoped = ScopedSourcingStartedListener::new(&registries, |_: &str| {});
    assert_eq!(started.len(), before.saturating_add(1));

    drop(scoped);
    assert_eq!(started.len(), before);
    assert!(started.remove(manual));
    assert!(started.is_empty());
}

#[test]
fn identifiers_strictly_increase_across_churn() {
    init_test_logging();
    let registries = Registries::new();
    let started = registries.registry::<SourcingStarted, Ref<str>>();

    let mut last = ListenerId::INVALID;
    for round in 0..20_u32 {
        let id = started.add(|_: &str| {});
        assert!(id > last, "round {round}: {id} not above {last}");
        last = id;
        if round.is_multiple_of(3) {
            assert!(started.remove(id));
        }
    }
    assert!(!started.remove(ListenerId::INVALID));
}

#[test]
fn default_context_propagates_listener_panics() {
    init_test_logging();
    let registries = Registries::from_config(&Config::default());
    let recorder = Recorder::<String>::new();

    let _bad = ScopedSourcingStartedListener::new(&registries, explode);
    let _skipped =
        ScopedSourcingStartedListener::new(&registries, recorder.borrowed_sink::<str>("skipped"));

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        registries.invoke::<SourcingStarted, Ref<str>>(("boom.tcl",));
    }));
    assert!(result.is_err());
    assert_eq!(recorder.count(), 0);
}

#[test]
fn configured_context_isolates_listener_panics() {
    init_test_logging();
    let config = Config::from_toml_str(
        r#"
        [registry]
        isolate_panics = true
        "#,
    )
    .unwrap();
    let registries = Registries::from_config(&config);
    let recorder = Recorder::<String>::new();

    let _bad = ScopedSourcingStartedListener::new(&registries, explode);
    let _good =
        ScopedSourcingStartedListener::new(&registries, recorder.borrowed_sink::<str>("good"));

    registries.invoke::<SourcingStarted, Ref<str>>(("ok.tcl",));
    assert_eq!(recorder.labels(), vec!["good"]);
}

#[test]
fn owned_payload_reaches_every_listener() {
    init_test_logging();
    let registries = Registries::new();
    let recorder = Recorder::<Rc<str>>::new();

    let _first = ScopedScriptLoadedListener::new(&registries, recorder.sink("first"));
    let _second = ScopedScriptLoadedListener::new(&registries, recorder.sink("second"));

    let script: Rc<str> = Rc::from("main.tcl");
    let loaded: Rc<ScriptLoadedListeners> = registries.registry::<ScriptLoaded, (Rc<str>,)>();
    loaded.invoke((Rc::clone(&script),));

    assert_eq!(
        recorder.calls(),
        vec![("first", Rc::clone(&script)), ("second", Rc::clone(&script))]
    );
    // one clone per listener, none kept by the registry
    recorder.clear();
    assert_eq!(Rc::strong_count(&script), 1);
}

#[test]
fn callback_wrapper_can_be_shared_between_registries() {
    init_test_logging();
    let registries = Registries::new();
    let recorder = Recorder::<String>::new();
    let shared = Callback::<Ref<str>>::new(recorder.borrowed_sink::<str>("shared"));

    registries
        .registry::<SourcingStarted, Ref<str>>()
        .add_callback(shared.clone());
    registries
        .registry::<SourcingFinished, Ref<str>>()
        .add_callback(shared);

    let path = String::from("a.tcl");
    registries.invoke::<SourcingStarted, Ref<str>>((path.as_str(),));
    registries.invoke::<SourcingFinished, Ref<str>>((path.as_str(),));
    assert_eq!(recorder.count(), 2);
}
