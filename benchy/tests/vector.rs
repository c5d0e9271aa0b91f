//! Behavior of `Vector` through its public API

use benchy::{Error, Finalizer, Vector};
use std::cell::Cell;
use std::rc::Rc;

/// Counts how many clones of it are dropped
#[derive(Clone, Debug)]
struct Tracked(Rc<Cell<usize>>);

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn push_thousand_integers() {
    let mut v = Vector::new();
    for i in 0..1000 {
        v.push(i);
    }
    assert_eq!(v.len(), 1000);
    assert_eq!(v[500], 500);
    assert_eq!(v.capacity(), 1024);
    assert!(v.capacity().is_power_of_two());
    assert!(v.iter().copied().eq(0..1000));
}

#[test]
fn sized_construction_and_resize() {
    let mut v: Vector<i32> = Vector::with_len(5);
    assert_eq!(v.len(), 5);
    assert_eq!(v.capacity(), 5);
    assert!(v.iter().all(|&x| x == 0));

    v.resize(3, 0);
    assert_eq!(v.len(), 3);
    assert_eq!(v.capacity(), 5);

    v.resize(10, 7);
    assert_eq!(v.len(), 10);
    assert_eq!(v.capacity(), 10);
    assert_eq!(v, [0, 0, 0, 7, 7, 7, 7, 7, 7, 7]);
    assert!(v[5..].iter().all(|&x| x == 7));
}

#[test]
fn resize_shrink_drops_exactly_the_tail() {
    let drops = Rc::new(Cell::new(0));
    let mut v = Vector::new();
    for _ in 0..5 {
        v.push(Tracked(drops.clone()));
    }
    v.resize(3, Tracked(drops.clone()));
    // Two from the tail, plus the unused fill value.
    assert_eq!(drops.get(), 3);
    drop(v);
    assert_eq!(drops.get(), 6);
}

#[test]
fn growth_keeps_contents() {
    let mut v: Vector<String> = (0..10).map(|i| i.to_string()).collect();
    let before: Vec<String> = v.iter().cloned().collect();
    v.reserve(1000);
    assert_eq!(v.capacity(), 1000);
    assert_eq!(v.as_slice(), before.as_slice());
}

#[test]
fn copies_are_deep_and_tight() {
    let mut original: Vector<String> = Vector::new();
    for word in ["alpha", "beta", "gamma"] {
        original.push(word.to_owned());
    }
    assert_eq!(original.capacity(), 8);

    let mut copy = original.clone();
    assert_eq!(copy.capacity(), 3);
    assert_eq!(copy, original);

    copy[0].push_str("-changed");
    original[1].clear();
    assert_eq!(original[0], "alpha");
    assert_eq!(copy[1], "beta");
}

#[test]
fn take_leaves_source_empty() {
    let mut source: Vector<u64> = (0..100).collect();
    let ptr = source.as_ptr();
    let moved = source.take();

    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);
    assert!(source.is_empty());
    assert_eq!(moved.len(), 100);
    assert_eq!(moved.as_ptr(), ptr);
    assert!(moved.iter().copied().eq(0..100));
}

#[test]
fn moved_elements_are_dropped_once() {
    let drops = Rc::new(Cell::new(0));
    let mut source = Vector::new();
    for _ in 0..20 {
        source.push(Tracked(drops.clone()));
    }
    let moved = std::mem::take(&mut source);
    drop(source);
    assert_eq!(drops.get(), 0);
    drop(moved);
    assert_eq!(drops.get(), 20);
}

#[test]
fn reallocation_does_not_drop() {
    let drops = Rc::new(Cell::new(0));
    let mut v = Vector::new();
    for _ in 0..100 {
        v.push(Tracked(drops.clone()));
    }
    assert_eq!(drops.get(), 0);
    assert_eq!(Rc::strong_count(&drops), 101);
    v.clear();
    assert_eq!(drops.get(), 100);
    assert_eq!(Rc::strong_count(&drops), 1);
}

#[test]
fn bounds_checked_access() {
    let v = Vector::from([10, 20, 30]);
    assert_eq!(v.at(0), Ok(&10));
    assert_eq!(v.at(2), Ok(&30));
    let err = v.at(3).unwrap_err();
    assert_eq!(err, Error::OutOfRange { index: 3, len: 3 });
    assert_eq!(err.to_string(), "index 3 is out of range for a vector of length 3");

    let empty: Vector<u8> = Vector::new();
    assert!(matches!(empty.at(0), Err(Error::OutOfRange { index: 0, len: 0 })));
}

#[test]
#[should_panic]
fn index_out_of_range_panics() {
    let v = Vector::from([1, 2, 3]);
    assert_eq!(v[3], 0);
}

#[test]
fn front_and_back() {
    let mut v: Vector<i32> = Vector::new();
    assert_eq!(v.front(), None);
    assert_eq!(v.back(), None);
    v.extend([1, 2, 3]);
    assert_eq!(v.front(), Some(&1));
    assert_eq!(v.back(), Some(&3));
    *v.back_mut().unwrap() = 30;
    *v.front_mut().unwrap() = 10;
    assert_eq!(v, [10, 2, 30]);
}

#[test]
fn clear_resets_to_empty() {
    let mut v: Vector<i32> = (0..50).collect();
    v.clear();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 0);
    v.push(1);
    assert_eq!(v.capacity(), 8);
}

#[test]
fn iteration_and_mutation() {
    let mut v: Vector<i32> = (1..=5).collect();
    for x in &mut v {
        *x *= 10;
    }
    let total: i32 = (&v).into_iter().sum();
    assert_eq!(total, 150);
    v.as_mut_slice().reverse();
    assert_eq!(v, [50, 40, 30, 20, 10]);
}

thread_local! {
    static FINALIZED: Cell<usize> = const { Cell::new(0) };
}

fn finalize(value: Tracked) {
    FINALIZED.with(|n| n.set(n.get() + 1));
    // The finalizer owns the value; dropping it here is its choice.
    drop(value);
}

#[test]
fn finalizer_replaces_default_destruction() {
    let drops = Rc::new(Cell::new(0));
    let before = FINALIZED.with(Cell::get);
    {
        let mut v = Vector::with_finalizer(finalize as Finalizer<Tracked>);
        for _ in 0..4 {
            v.push(Tracked(drops.clone()));
        }
        let copy = v.clone();
        assert!(copy.finalizer().is_some());
    }
    assert_eq!(FINALIZED.with(Cell::get) - before, 8);
    assert_eq!(drops.get(), 8);
}

#[test]
fn vectors_cross_threads() {
    let v: Vector<String> = (0..10).map(|i| format!("item-{i}")).collect();
    let joined = std::thread::spawn(move || v.iter().map(String::len).sum::<usize>())
        .join()
        .unwrap();
    assert_eq!(joined, 6 * 10);
}

#[test]
fn try_reserve_reports_overflow_and_keeps_contents() {
    let mut v: Vector<u64> = Vector::new();
    v.push(1);
    assert_eq!(v.try_reserve(usize::MAX), Err(Error::CapacityOverflow));
    assert_eq!((v.len(), v.capacity()), (1, 8));
    assert_eq!(v, [1]);
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn reserve_panics_on_overflow() {
    let mut v: Vector<u64> = Vector::new();
    v.reserve(usize::MAX);
}

#[test]
fn try_push_grows_like_push() {
    let mut v = Vector::new();
    for i in 0..9u64 {
        v.try_push(i).unwrap();
    }
    assert_eq!(v.len(), 9);
    assert_eq!(v.capacity(), 16);
    assert_eq!(v.back(), Some(&8));
}
