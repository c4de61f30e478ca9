use crate::{Discipline, Error, FaultPolicy, Pipeline, Sequence, run};
use std::{panic::panic_any, sync::Mutex};

const WORKER_COUNTS: [usize; 5] = [1, 2, 3, 8, 32];

fn sequence_of<T>(discipline: Discipline, items: impl IntoIterator<Item = T>) -> Sequence<T> {
    let mut sequence = Sequence::new(discipline);
    sequence.extend(items);
    sequence
}

fn is_even(n: &i32) -> bool {
    n % 2 == 0
}

#[test]
fn lifo_integers_count_even() {
    let mut stack = sequence_of(Discipline::Lifo, [5, 12, 19, 26]);
    assert_eq!(run(&mut stack, is_even, 3).unwrap(), 2);
    assert!(stack.is_empty());
}

#[test]
fn fifo_strings_count_world() {
    let mut queue = sequence_of(
        Discipline::Fifo,
        ["Hello World", "Generics", "World Wide Web"].map(String::from),
    );
    let count = run(&mut queue, |s: &String| s.contains("World"), 3).unwrap();
    assert_eq!(count, 2);
}

#[test]
fn count_matches_sequential_filter() {
    let items: Vec<i32> = (0..=20).map(|i| 5 + i * 7).collect();
    let expected = items.iter().filter(|n| is_even(n)).count();

    for discipline in [Discipline::Lifo, Discipline::Fifo] {
        for workers in WORKER_COUNTS {
            let mut sequence = sequence_of(discipline, items.iter().copied());
            let tally = Pipeline::new(workers)
                .unwrap()
                .run(&mut sequence, is_even)
                .unwrap();

            assert_eq!(tally.passed, expected, "{discipline:?} x {workers}");
            assert_eq!(tally.failed, items.len() - expected);
            assert_eq!(tally.faulted, 0);
            assert_eq!(tally.total(), items.len());
        }
    }
}

#[test]
fn repeated_runs_are_deterministic() {
    let pipeline = Pipeline::new(4).unwrap();
    for _ in 0..50 {
        let mut sequence = sequence_of(Discipline::Fifo, 0..200);
        let tally = pipeline.run(&mut sequence, |n: &i32| n % 3 == 0).unwrap();
        assert_eq!(tally.passed, 67);
    }
}

#[test]
fn empty_sequence_yields_zero() {
    for workers in WORKER_COUNTS {
        let mut sequence: Sequence<i32> = Sequence::lifo();
        let tally = Pipeline::new(workers)
            .unwrap()
            .run(&mut sequence, |_| true)
            .unwrap();

        assert_eq!(tally.total(), 0);
        assert_eq!(tally.workers.len(), workers);
        assert!(tally.workers.iter().all(|w| w.processed == 0));
    }
}

#[test]
fn surplus_workers_process_nothing() {
    let mut sequence = sequence_of(Discipline::Fifo, [2, 4]);
    let tally = Pipeline::new(6)
        .unwrap()
        .run(&mut sequence, is_even)
        .unwrap();

    assert_eq!(tally.passed, 2);
    assert_eq!(tally.workers.len(), 6);
    assert_eq!(tally.workers.iter().map(|w| w.processed).sum::<usize>(), 2);
    assert!(tally.workers.iter().filter(|w| w.processed == 0).count() >= 4);
}

#[test]
fn worker_stats_are_ordered_and_sum_to_total() {
    let mut sequence = sequence_of(Discipline::Lifo, 0..100);
    let tally = Pipeline::new(5)
        .unwrap()
        .run(&mut sequence, is_even)
        .unwrap();

    let ids: Vec<_> = tally.workers.iter().map(|w| w.worker_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(tally.workers.iter().map(|w| w.processed).sum::<usize>(), 100);
    assert_eq!(tally.workers.iter().map(|w| w.passed).sum::<usize>(), tally.passed);
}

#[test]
fn zero_workers_is_rejected() {
    assert!(matches!(Pipeline::new(0), Err(Error::InvalidWorkerCount(0))));

    let mut sequence = sequence_of(Discipline::Fifo, [1, 2, 3]);
    let result = run(&mut sequence, is_even, 0);
    assert!(matches!(result, Err(Error::InvalidWorkerCount(0))));
    // Nothing was dispatched.
    assert_eq!(sequence.len(), 3);
}

#[test]
fn every_item_is_validated_once_in_removal_order() {
    for discipline in [Discipline::Lifo, Discipline::Fifo] {
        let seen = Mutex::new(Vec::new());
        let mut sequence = sequence_of(discipline, 1..=30);

        Pipeline::new(4)
            .unwrap()
            .run(&mut sequence, |n: &u32| {
                seen.lock().unwrap().push(*n);
                true
            })
            .unwrap();

        // Only one item is in flight at a time, so validation order follows
        // removal order regardless of which worker picked the item up.
        let seen = seen.into_inner().unwrap();
        let expected: Vec<u32> = match discipline {
            Discipline::Lifo => (1..=30).rev().collect(),
            Discipline::Fifo => (1..=30).collect(),
        };
        assert_eq!(seen, expected);
    }
}

#[test]
fn validator_may_borrow_local_state() {
    let needle = String::from("World");
    let mut queue = sequence_of(Discipline::Fifo, ["World", "word", "Old World"]);
    let count = run(&mut queue, |s: &&str| s.contains(needle.as_str()), 2).unwrap();
    assert_eq!(count, 2);
}

#[test]
fn contained_fault_is_tallied_and_run_continues() {
    let mut sequence = sequence_of(Discipline::Fifo, 1..=10);
    let tally = Pipeline::new(3)
        .unwrap()
        .run(&mut sequence, |n: &i32| {
            assert!(*n != 7, "refusing to validate {n}");
            is_even(n)
        })
        .unwrap();

    assert_eq!(tally.passed, 5);
    assert_eq!(tally.failed, 4);
    assert_eq!(tally.faulted, 1);
    assert_eq!(tally.workers.iter().map(|w| w.faulted).sum::<usize>(), 1);
    assert!(sequence.is_empty());
}

#[test]
fn contained_faults_do_not_count_as_passes() {
    let mut sequence = sequence_of(Discipline::Lifo, [1, 2, 3]);
    let count = run(&mut sequence, |_: &i32| -> bool { panic!("always") }, 2).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn abort_policy_stops_at_first_fault() {
    let mut sequence = sequence_of(Discipline::Fifo, 1..=10);
    let result = Pipeline::new(3)
        .unwrap()
        .with_fault_policy(FaultPolicy::Abort)
        .run(&mut sequence, |n: &i32| {
            assert!(*n != 4, "refusing to validate {n}");
            true
        });

    match result {
        Err(Error::ValidatorFault { worker_id, message }) => {
            assert!((1..=3).contains(&worker_id));
            assert_eq!(message, "refusing to validate 4");
        }
        other => panic!("expected a validator fault, got {other:?}"),
    }
    let remaining: Vec<_> = sequence.drain().collect();
    assert_eq!(remaining, (5..=10).collect::<Vec<_>>());
}

struct PanickyPayload;

impl Drop for PanickyPayload {
    fn drop(&mut self) {
        panic!("payload destructor");
    }
}

#[test]
fn payload_with_panicking_destructor_is_contained() {
    let mut sequence = sequence_of(Discipline::Fifo, [1, 2, 3]);
    let tally = Pipeline::new(2)
        .unwrap()
        .run(&mut sequence, |n: &i32| {
            if *n == 2 {
                panic_any(PanickyPayload);
            }
            true
        })
        .unwrap();

    assert_eq!(tally.passed, 2);
    assert_eq!(tally.faulted, 1);
    assert_eq!(tally.total(), 3);
}

struct FragileItem(i32);

impl Drop for FragileItem {
    fn drop(&mut self) {
        if self.0 == 2 {
            panic!("item destructor");
        }
    }
}

#[test]
fn item_with_panicking_destructor_is_contained() {
    let mut sequence = sequence_of(Discipline::Lifo, (1..=3).map(FragileItem));
    let tally = Pipeline::new(2)
        .unwrap()
        .run(&mut sequence, |_: &FragileItem| true)
        .unwrap();

    assert_eq!(tally.passed, 2);
    assert_eq!(tally.faulted, 1);
    assert!(sequence.is_empty());
}
