use std::cell::Cell;

use super::*;

#[test]
fn schedule_does_not_run_immediately() {
    let scheduler = ManualScheduler::new();
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);
    scheduler.schedule(Box::new(move || flag.set(true)));

    assert!(!ran.get());
    assert_eq!(scheduler.pending(), 1);
}

#[test]
fn run_frame_runs_queued_callbacks_once() {
    let scheduler = ManualScheduler::new();
    let count = Rc::new(Cell::new(0));
    for _ in 0..3 {
        let count = Rc::clone(&count);
        scheduler.schedule(Box::new(move || count.set(count.get() + 1)));
    }

    assert_eq!(scheduler.run_frame(), 3);
    assert_eq!(count.get(), 3);
    assert_eq!(scheduler.run_frame(), 0);
    assert_eq!(count.get(), 3);
}

#[test]
fn callbacks_scheduled_during_frame_wait_for_next_frame() {
    let scheduler = ManualScheduler::new();
    let count = Rc::new(Cell::new(0));

    let inner_scheduler = scheduler.clone();
    let inner_count = Rc::clone(&count);
    scheduler.schedule(Box::new(move || {
        inner_count.set(inner_count.get() + 1);
        let again = Rc::clone(&inner_count);
        inner_scheduler.schedule(Box::new(move || again.set(again.get() + 10)));
    }));

    assert_eq!(scheduler.run_frame(), 1);
    assert_eq!(count.get(), 1);
    assert_eq!(scheduler.pending(), 1);

    assert_eq!(scheduler.run_frame(), 1);
    assert_eq!(count.get(), 11);
}

#[test]
fn run_frames_advances_n_frames() {
    let scheduler = ManualScheduler::new();
    let count = Rc::new(Cell::new(0));
    scheduler.schedule(Box::new({
        let count = Rc::clone(&count);
        move || count.set(count.get() + 1)
    }));

    scheduler.run_frames(5);
    assert_eq!(count.get(), 1);
    assert_eq!(scheduler.pending(), 0);
}
