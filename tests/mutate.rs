use orx_sync_seq::prelude::*;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use test_case::test_matrix;

#[test]
fn prepend() {
    let seq = SyncSeq::from_elements(['x', 'y', 'z']);
    seq.prepend('a');
    assert_eq!(seq.snapshot(), vec!['a', 'x', 'y', 'z']);

    let seq = SyncSeq::new();
    seq.prepend('a');
    seq.prepend('b');
    assert_eq!(seq.snapshot(), vec!['b', 'a']);
}

#[test]
fn append() {
    let seq = SyncSeq::new();
    for i in 0..10 {
        seq.append(i);
    }
    assert_eq!(seq.snapshot(), (0..10).collect::<Vec<_>>());
}

#[test]
fn remove_all() {
    let seq = SyncSeq::from_elements([1, 2, 3, 4]);
    seq.remove_all(|x| x % 2 == 0);
    assert_eq!(seq.snapshot(), vec![1, 3]);
}

#[test]
fn remove_all_returns_before_predicate_completes() {
    let seq = SyncSeq::from_elements([1, 2, 3, 4]);
    let release = Arc::new(AtomicBool::new(false));
    let finished = Arc::new(AtomicBool::new(false));

    let (r, f) = (release.clone(), finished.clone());
    seq.remove_all(move |x| {
        while !r.load(Ordering::SeqCst) {
            std::thread::yield_now();
        }
        f.store(true, Ordering::SeqCst);
        x % 2 == 0
    });

    // the predicate cannot complete before it is released
    assert!(!finished.load(Ordering::SeqCst));
    release.store(true, Ordering::SeqCst);

    seq.flush();
    assert!(finished.load(Ordering::SeqCst));
    assert_eq!(seq.snapshot(), vec![1, 3]);
}

#[test]
fn remove_all_evaluates_at_execution() {
    let seq = SyncSeq::from_elements([1, 2, 3]);

    seq.read(|_| {
        seq.remove_all(|x| *x > 2);
        seq.append(5);
        seq.remove_all(|x| *x == 1);
    });

    // the second removal observes the appended element, the first one does not
    assert_eq!(seq.snapshot(), vec![2, 5]);
}

#[test]
fn remove_all_from_empty() {
    let seq: SyncSeq<i32> = SyncSeq::new();
    seq.remove_all(|_| true);
    assert!(seq.is_empty());
}

#[test]
fn set() {
    let seq = SyncSeq::from_elements(["a", "b", "c", "d"]);
    seq.set(2, "z");
    assert_eq!(seq.snapshot(), vec!["a", "b", "z", "d"]);
}

#[test]
fn set_out_of_bounds_is_ignored() {
    let seq = SyncSeq::from_elements(["a", "b"]);
    seq.set(2, "z");
    seq.set(usize::MAX, "z");
    assert_eq!(seq.snapshot(), vec!["a", "b"]);

    let seq: SyncSeq<&str> = SyncSeq::new();
    seq.set(0, "z");
    assert!(seq.is_empty());
}

#[test]
fn set_checks_bounds_at_execution() {
    let seq = SyncSeq::from_elements(["a"]);

    seq.read(|_| {
        seq.set(1, "too early");
        seq.append("b");
        seq.set(1, "c");
    });

    assert_eq!(seq.snapshot(), vec!["a", "c"]);
}

#[test_matrix([
    SplitVec::with_doubling_growth(),
    SplitVec::with_linear_growth(2),
    SplitVec::with_recursive_growth()
])]
fn mixed_mutations<P: PinnedVec<usize> + Send + Sync + 'static>(pinned_vec: P) {
    let seq = SyncSeq::from_pinned(pinned_vec);
    let mut expected = vec![];

    for i in 0..200 {
        match i % 5 {
            0 => {
                seq.prepend(i);
                expected.insert(0, i);
            }
            1 | 2 => {
                seq.append(i);
                expected.push(i);
            }
            3 => {
                let idx = i % (expected.len() + 1);
                seq.set(idx, i * 1000);
                if let Some(x) = expected.get_mut(idx) {
                    *x = i * 1000;
                }
            }
            _ => {
                seq.remove_all(move |x| x % 7 == i % 7);
                expected.retain(|x| x % 7 != i % 7);
            }
        }
    }

    assert_eq!(seq.snapshot(), expected);
}
