use super::*;

fn recorder() -> (Rc<PendingSlot<i32>>, Recorder<i32>) {
    let slot = Rc::new(PendingSlot::new());
    let recorder = Recorder::new(Rc::clone(&slot));
    (slot, recorder)
}

// =============================================================
// PendingSlot / Recorder
// =============================================================

#[test]
fn slot_starts_empty() {
    let (slot, _) = recorder();
    assert!(!slot.is_pending());
    assert_eq!(slot.take(), None);
}

#[test]
fn record_keeps_only_latest_payload() {
    let (slot, recorder) = recorder();
    recorder.record(1);
    recorder.record(2);
    recorder.record(3);
    assert!(slot.is_pending());
    assert_eq!(slot.take(), Some(3));
}

#[test]
fn take_clears_slot() {
    let (slot, recorder) = recorder();
    recorder.record(7);
    assert_eq!(slot.take(), Some(7));
    assert!(!slot.is_pending());
    assert_eq!(slot.take(), None);
}

#[test]
fn cloned_recorder_writes_same_slot() {
    let (slot, recorder) = recorder();
    let other = recorder.clone();
    other.record(42);
    assert_eq!(slot.take(), Some(42));
}

// =============================================================
// ManualEventSource
// =============================================================

#[test]
fn emit_without_subscription_returns_false() {
    let source = ManualEventSource::<i32>::new();
    assert!(!source.emit("scroll", 1));
}

#[test]
fn emit_records_into_subscribed_slot() {
    let mut source = ManualEventSource::new();
    let (slot, recorder) = recorder();
    source.subscribe("scroll", recorder);

    assert!(source.is_subscribed("scroll"));
    assert!(source.emit("scroll", 5));
    assert_eq!(slot.take(), Some(5));
}

#[test]
fn emit_only_reaches_matching_type() {
    let mut source = ManualEventSource::new();
    let (scroll_slot, scroll) = recorder();
    let (resize_slot, resize) = recorder();
    source.subscribe("scroll", scroll);
    source.subscribe("resize", resize);

    source.emit("resize", 9);
    assert!(!scroll_slot.is_pending());
    assert_eq!(resize_slot.take(), Some(9));
}

#[test]
fn unsubscribe_stops_delivery() {
    let mut source = ManualEventSource::new();
    let (slot, recorder) = recorder();
    source.subscribe("click", recorder);
    source.unsubscribe("click");

    assert!(!source.is_subscribed("click"));
    assert!(!source.emit("click", 1));
    assert!(!slot.is_pending());
}

#[test]
fn clones_share_subscriptions() {
    let source = ManualEventSource::new();
    let mut handle = source.clone();
    let (_, recorder) = recorder();
    handle.subscribe("mousemove", recorder);
    assert_eq!(source.subscriptions(), vec!["mousemove".to_owned()]);
}
