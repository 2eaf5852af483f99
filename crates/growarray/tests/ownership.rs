//! Construction, clone and drop accounting for elements held in a
//! `GrowableArray`, observed through instrumented element types.

use growarray::{ArrayConfig, GrowableArray, ShrinkPolicy};
use growarray_test_utils::{Counters, MoveOnlyPoint, Tracked};

fn tracked(n: u32, counters: &Counters) -> GrowableArray<Tracked> {
    let mut a = GrowableArray::new();
    for id in 0..n {
        a.push_back(Tracked::new(id, counters)).unwrap();
    }
    a
}

#[test]
fn move_insertion_never_clones() {
    let counters = Counters::new();
    let a = tracked(37, &counters);
    // Seven growth steps: 1, 2, 4, 8, 16, 32, 64.
    assert_eq!(a.capacity(), 64);
    assert_eq!(a.stats().grows, 7);
    assert_eq!(counters.constructed(), 37);
    assert_eq!(counters.cloned(), 0);
    assert_eq!(counters.dropped(), 0);
    assert_eq!(counters.live(), 37);
}

#[test]
fn move_only_elements_survive_reallocation() {
    let mut a = GrowableArray::new();
    let mut addrs = Vec::new();
    for i in 0..10 {
        let p = MoveOnlyPoint::new(i as f32, 0.0, 0.0);
        addrs.push(p.block_addr());
        a.push_back(p).unwrap();
    }
    assert_eq!(a.len(), 10);
    for (i, p) in a.iter().enumerate() {
        assert_eq!(p.x, i as f32);
        // The owned heap block was moved, never duplicated.
        assert_eq!(p.block_addr(), addrs[i]);
    }
}

#[test]
fn copy_insertion_keeps_caller_value() {
    let counters = Counters::new();
    let original = Tracked::new(5, &counters);
    let mut a = GrowableArray::new();
    for _ in 0..3 {
        a.push_back_cloned(&original).unwrap();
    }
    assert_eq!(counters.constructed(), 1);
    assert_eq!(counters.cloned(), 3);
    assert_eq!(original.id, 5);
    assert!(a.iter().all(|t| t.id == 5));
    drop(a);
    assert_eq!(counters.dropped(), 3);
    assert_eq!(counters.live(), 1);
}

#[test]
fn emplace_constructs_exactly_one_instance() {
    let counters = Counters::new();
    let mut a: GrowableArray<Tracked> = GrowableArray::new();
    for id in 0..9 {
        let slot = a.emplace_back((id, &counters)).unwrap();
        assert_eq!(slot.id, id);
    }
    assert_eq!(counters.constructed(), 9);
    assert_eq!(counters.cloned(), 0);
    assert_eq!(counters.dropped(), 0);
}

#[test]
fn emplace_move_only_from_args() {
    let mut a: GrowableArray<MoveOnlyPoint> = GrowableArray::new();
    a.emplace_back((0.0, 0.0, 0.0)).unwrap();
    a.emplace_back((1.0, 2.0, 3.0)).unwrap();
    let p = a.emplace_back((4.0, 5.0, 6.0)).unwrap();
    p.block_mut()[0] = 42;
    assert_eq!(a.len(), 3);
    assert_eq!(a[1].coords(), (1.0, 2.0, 3.0));
    assert_eq!(a[2].block()[0], 42);
}

#[test]
fn drop_destroys_each_element_once() {
    let counters = Counters::new();
    {
        let a = tracked(13, &counters);
        assert_eq!(a.capacity(), 16);
    }
    // Three of the sixteen slots were never constructed and never dropped.
    assert_eq!(counters.dropped(), 13);
    assert_eq!(counters.live(), 0);
}

#[test]
fn clear_drops_in_index_order_and_keeps_capacity() {
    let counters = Counters::new();
    let mut a = tracked(5, &counters);
    a.clear();
    assert_eq!(counters.drop_order(), vec![0, 1, 2, 3, 4]);
    assert_eq!(a.capacity(), 8);
    a.clear();
    drop(a);
    assert_eq!(counters.dropped(), 5);
}

#[test]
fn pop_back_destroys_last_first() {
    let counters = Counters::new();
    let mut a = tracked(4, &counters);
    while a.pop_back().is_some() {}
    assert_eq!(counters.drop_order(), vec![3, 2, 1, 0]);
    assert_eq!(counters.live(), 0);
    drop(a);
    assert_eq!(counters.dropped(), 4);
}

#[test]
fn shrink_moves_without_dropping() {
    let counters = Counters::new();
    let mut a = GrowableArray::with_config(
        ArrayConfig::new().with_shrink_policy(ShrinkPolicy::Eager),
    );
    for id in 0..9 {
        a.push_back(Tracked::new(id, &counters)).unwrap();
    }
    for _ in 0..7 {
        a.pop_back();
    }
    assert!(a.stats().shrinks > 0);
    // Only the seven popped values were dropped; survivors were moved.
    assert_eq!(counters.dropped(), 7);
    assert_eq!(counters.cloned(), 0);
    assert_eq!(a.iter().map(|t| t.id).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn truncate_drops_back_to_front() {
    let counters = Counters::new();
    let mut a = tracked(6, &counters);
    a.truncate(2);
    assert_eq!(counters.drop_order(), vec![5, 4, 3, 2]);
    assert_eq!(a.len(), 2);
}

#[test]
fn clone_clones_each_element_once() {
    let counters = Counters::new();
    let a = tracked(6, &counters);
    let b = a.clone();
    assert_eq!(counters.cloned(), 6);
    assert_eq!(a, b);
    drop(a);
    drop(b);
    assert_eq!(counters.dropped(), 12);
}

#[test]
fn failed_push_drops_only_the_rejected_value() {
    let counters = Counters::new();
    let mut a = GrowableArray::with_config(ArrayConfig::new().with_max_capacity(2));
    a.push_back(Tracked::new(0, &counters)).unwrap();
    a.push_back(Tracked::new(1, &counters)).unwrap();
    assert!(a.push_back(Tracked::new(2, &counters)).is_err());
    assert_eq!(counters.drop_order(), vec![2]);
    let (back, _) = a.try_push_back(Tracked::new(3, &counters)).unwrap_err();
    assert_eq!(back.id, 3);
    assert_eq!(a.len(), 2);
}

#[test]
fn array_moves_across_threads() {
    let counters = Counters::new();
    let a = tracked(8, &counters);
    let handle = std::thread::spawn(move || a.iter().map(|t| t.id).sum::<u32>());
    assert_eq!(handle.join().unwrap(), 28);
    assert_eq!(counters.dropped(), 8);
}
