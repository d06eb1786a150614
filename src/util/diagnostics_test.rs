use super::*;

#[test]
fn with_returns_none_before_init() {
    assert_eq!(with(|_| ()), None);
}

#[test]
fn init_installs_and_guard_drop_tears_down() {
    let guard = init(Diagnostics::default());
    assert_eq!(with(|_| 1), Some(1));

    drop(guard);
    assert_eq!(with(|_| 1), None);
}

#[test]
fn reinit_replaces_previous_context() {
    let first = init(Diagnostics::default());
    let second = init(Diagnostics::default());
    assert_eq!(with(|_| ()), Some(()));

    // Dropping either guard tears the context down; scoping is explicit,
    // not reference-counted.
    drop(first);
    assert_eq!(with(|_| ()), None);
    drop(second);
}
