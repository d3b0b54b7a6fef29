use super::*;

#[test]
fn new_history_has_empty_stacks() {
    let h = History::new(1);
    assert_eq!(*h.present(), 1);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert_eq!(h.limit(), DEFAULT_HISTORY_LIMIT);
}

#[test]
fn commit_pushes_previous_present() {
    let mut h = History::new(1);
    h.commit(2);
    assert_eq!(*h.present(), 2);
    assert_eq!(h.past(), &[1]);
}

#[test]
fn undo_on_empty_is_noop() {
    let mut h = History::new("a");
    assert!(!h.undo());
    assert_eq!(*h.present(), "a");
    assert!(!h.can_redo());
}

#[test]
fn redo_on_empty_is_noop() {
    let mut h = History::new("a");
    assert!(!h.redo());
    assert_eq!(*h.present(), "a");
    assert!(!h.can_undo());
}

#[test]
fn undo_moves_present_to_front_of_future() {
    let mut h = History::new(1);
    h.commit(2);
    h.commit(3);
    assert!(h.undo());
    assert!(h.undo());
    assert_eq!(*h.present(), 1);
    let future: Vec<i32> = h.future().copied().collect();
    assert_eq!(future, [2, 3]);
}

#[test]
fn redo_restores_in_order() {
    let mut h = History::new(1);
    h.commit(2);
    h.commit(3);
    h.undo();
    h.undo();
    assert!(h.redo());
    assert_eq!(*h.present(), 2);
    assert!(h.redo());
    assert_eq!(*h.present(), 3);
    assert!(!h.redo());
}

#[test]
fn commit_clears_future() {
    let mut h = History::new(1);
    h.commit(2);
    h.undo();
    assert!(h.can_redo());
    h.commit(5);
    assert!(!h.can_redo());
    assert_eq!(h.past(), &[1]);
}

#[test]
fn undo_redo_inverse_law() {
    let mut h = History::new(0);
    for i in 1..=25 {
        h.commit(i);
    }
    for _ in 0..25 {
        assert!(h.undo());
    }
    assert_eq!(*h.present(), 0);
    for _ in 0..25 {
        assert!(h.redo());
    }
    assert_eq!(*h.present(), 25);
}

#[test]
fn limit_drops_oldest_snapshots() {
    let mut h = History::with_limit(0, 3);
    for i in 1..=5 {
        h.commit(i);
    }
    assert_eq!(h.past(), &[2, 3, 4]);
    while h.undo() {}
    assert_eq!(*h.present(), 2);
}

#[test]
fn zero_limit_is_raised_to_one() {
    let mut h = History::with_limit(0, 0);
    assert_eq!(h.limit(), 1);
    h.commit(1);
    h.commit(2);
    assert_eq!(h.past(), &[1]);
}

#[test]
fn reset_clears_both_stacks() {
    let mut h = History::new(1);
    h.commit(2);
    h.commit(3);
    h.undo();
    h.reset(9);
    assert_eq!(*h.present(), 9);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}

#[test]
fn snapshots_are_independent_copies() {
    let mut h = History::new(vec![1, 2]);
    let mut next = h.present().clone();
    next.push(3);
    h.commit(next);
    assert_eq!(h.past()[0], vec![1, 2]);
    assert_eq!(*h.present(), vec![1, 2, 3]);
}
