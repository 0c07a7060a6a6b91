use super::*;

fn noop() -> Callback<u8> {
    callback(|_: &u8| {})
}

// =============================================================
// Registry
// =============================================================

#[test]
fn registry_default_is_empty() {
    let registry = Registry::<u8>::default();
    assert!(registry.is_empty());
    assert!(registry.snapshot().is_empty());
}

#[test]
fn registry_keeps_first_registration_order() {
    let mut registry = Registry::default();
    registry.insert(ListenerGroup::new("scroll", vec![noop()]));
    registry.insert(ListenerGroup::new("resize", vec![noop()]));
    registry.insert(ListenerGroup::new("mousemove", vec![noop()]));

    assert_eq!(registry.snapshot().event_types(), vec!["scroll", "resize", "mousemove"]);
}

#[test]
fn registry_remove_returns_group_and_preserves_order() {
    let mut registry = Registry::default();
    registry.insert(ListenerGroup::new("scroll", vec![noop()]));
    registry.insert(ListenerGroup::new("resize", vec![noop()]));
    registry.insert(ListenerGroup::new("mousemove", vec![noop()]));

    let removed = registry.remove("resize").map(|g| g.event_type);
    assert_eq!(removed.as_deref(), Some("resize"));
    assert_eq!(registry.snapshot().event_types(), vec!["scroll", "mousemove"]);
    assert!(registry.remove("resize").is_none());
}

#[test]
fn registry_clear_drains_everything() {
    let mut registry = Registry::default();
    registry.insert(ListenerGroup::new("scroll", vec![noop()]));
    registry.insert(ListenerGroup::new("resize", vec![noop()]));

    let cleared: Vec<String> = registry.clear().into_iter().map(|g| g.event_type).collect();
    assert_eq!(cleared, vec!["scroll".to_owned(), "resize".to_owned()]);
    assert!(registry.is_empty());
}

#[test]
fn registry_get_mut_allows_appending_callbacks() {
    let mut registry = Registry::default();
    registry.insert(ListenerGroup::new("scroll", vec![noop()]));

    if let Some(group) = registry.get_mut("scroll") {
        group.callbacks.push(noop());
    }
    assert_eq!(registry.snapshot().get("scroll").map(|g| g.callbacks().len()), Some(2));
    assert!(registry.get_mut("resize").is_none());
}

// =============================================================
// Snapshot
// =============================================================

#[test]
fn snapshot_reports_pending_state() {
    let mut registry = Registry::default();
    let group = ListenerGroup::new("scroll", vec![noop()]);
    group.pending.store(3);
    registry.insert(group);
    registry.insert(ListenerGroup::new("resize", vec![noop()]));

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.get("scroll").map(GroupView::is_pending), Some(true));
    assert_eq!(snapshot.get("resize").map(GroupView::is_pending), Some(false));
}

#[test]
fn snapshot_is_detached_from_registry() {
    let mut registry = Registry::default();
    registry.insert(ListenerGroup::new("scroll", vec![noop()]));
    let snapshot = registry.snapshot();

    registry.clear();
    assert!(snapshot.contains("scroll"));
    assert_eq!(snapshot.len(), 1);
}

#[test]
fn snapshot_callbacks_are_the_registered_handles() {
    let first = noop();
    let second = noop();
    let mut registry = Registry::default();
    registry.insert(ListenerGroup::new("scroll", vec![Rc::clone(&first), Rc::clone(&second)]));

    let snapshot = registry.snapshot();
    let callbacks = snapshot.get("scroll").map(GroupView::callbacks).unwrap_or_default();
    assert_eq!(callbacks.len(), 2);
    assert!(Rc::ptr_eq(&callbacks[0], &first));
    assert!(Rc::ptr_eq(&callbacks[1], &second));
}

#[test]
fn snapshot_iter_yields_views_in_order() {
    let mut registry = Registry::default();
    registry.insert(ListenerGroup::new("a", vec![noop()]));
    registry.insert(ListenerGroup::new("b", vec![noop(), noop()]));

    let counts: Vec<(String, usize)> =
        registry.snapshot().iter().map(|g| (g.event_type().to_owned(), g.callbacks().len())).collect();
    assert_eq!(counts, vec![("a".to_owned(), 1), ("b".to_owned(), 2)]);
}
