//! Integration tests for rxcore
//!
//! Tests operator chains, subject replay rules, disposal and virtual-time
//! behavior through the public API only.

use std::sync::{Arc, Mutex};

use rxcore::prelude::*;

fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnMut(T) + Send + 'static) {
  let store = Arc::new(Mutex::new(Vec::new()));
  let c_store = store.clone();
  (store, move |v| c_store.lock().unwrap().push(v))
}

#[test]
fn test_basic_chain_integration() {
  let (result, push) = recorder();
  observable::from_iter(1..=10)
    .map(|x| x * 2)
    .filter(|&x| x > 10)
    .take(3)
    .subscribe(push);

  assert_eq!(*result.lock().unwrap(), vec![12, 14, 16]);
}

#[test]
fn test_complex_chain_with_multiple_operators() {
  let (result, push) = recorder();
  observable::from_iter(1..=20)
    .filter(|&x| x % 2 == 0)
    .map(|x| x * x)
    .scan(0, |acc, v| acc + v)
    .skip(2)
    .take(3)
    .subscribe(push);

  // Squares of 2, 4, 6, 8, 10 summed: 4, 20, 56, 120, 220.
  assert_eq!(*result.lock().unwrap(), vec![56, 120, 220]);
}

#[test]
fn test_composite_disposes_all_members() {
  let a = Subject::publish();
  let b = Subject::publish();
  let c = Subject::publish();
  let composite = CompositeSubscription::new();
  let members = vec![
    a.clone().subscribe(|_: i32| {}),
    b.clone().subscribe(|_: i32| {}),
    c.clone().subscribe(|_: i32| {}),
  ];
  for member in &members {
    composite.add(member.clone());
  }
  assert_eq!(composite.len(), 3);

  let mut handle = composite.clone();
  handle.unsubscribe();
  handle.unsubscribe();

  assert!(members.iter().all(|m| m.is_closed()));
  assert_eq!(a.subscriber_count() + b.subscriber_count() + c.subscriber_count(), 0);

  // Late additions to a disposed composite are disposed at once.
  let late = Subject::publish();
  let late_subscription = late.clone().subscribe(|_: i32| {});
  composite.add(late_subscription.clone());
  assert!(late_subscription.is_closed());
  assert_eq!(late.subscriber_count(), 0);
}

#[test]
fn test_replay_subject_keeps_last_n() {
  let subject = Subject::replay(3).unwrap();
  for v in 1..=5 {
    subject.next(v);
  }
  let (result, push) = recorder();
  subject.clone().subscribe(push);
  subject.next(6);

  assert_eq!(*result.lock().unwrap(), vec![3, 4, 5, 6]);
}

#[test]
fn test_behavior_subject_latest_value() {
  let subject = Subject::behavior(0);
  subject.next(1);
  subject.next(2);

  let (result, push) = recorder();
  subject.clone().subscribe(push);
  subject.next(3);

  assert_eq!(*result.lock().unwrap(), vec![2, 3]);
  assert_eq!(subject.value(), Some(3));
}

#[test]
fn test_async_subject_last_value_on_complete() {
  let subject = Subject::async_subject();
  let (early, push_early) = recorder();
  subject.clone().subscribe(push_early);
  for v in 1..=3 {
    subject.next(v);
  }
  let (middle, push_middle) = recorder();
  subject.clone().subscribe(push_middle);
  subject.complete();
  let (late, push_late) = recorder();
  subject.clone().subscribe(push_late);

  assert_eq!(*early.lock().unwrap(), vec![3]);
  assert_eq!(*middle.lock().unwrap(), vec![3]);
  assert_eq!(*late.lock().unwrap(), vec![3]);
}

#[test]
fn test_async_subject_error_drops_value() {
  let subject = Subject::async_subject();
  let log = Arc::new(Mutex::new(vec![]));
  let (c_next, c_err) = (log.clone(), log.clone());
  subject.clone().subscribe_err(
    move |v: i32| c_next.lock().unwrap().push(format!("{v}")),
    move |e| c_err.lock().unwrap().push(format!("{e}")),
  );
  subject.next(1);
  subject.error(RxError::upstream("failed"));

  assert_eq!(*log.lock().unwrap(), vec!["upstream error: failed"]);
}

#[test]
fn test_relay_never_terminates() {
  let relay = Relay::new();
  let (result, push) = recorder();
  relay.clone().subscribe(push);
  relay.accept(1);
  relay.accept(2);

  assert_eq!(*result.lock().unwrap(), vec![1, 2]);
  assert_eq!(relay.subscriber_count(), 1);
}

#[test]
fn test_skip_while_is_a_one_shot_gate() {
  let (result, push) = recorder();
  observable::just([1, 2, 3, 1, 2])
    .skip_while(|v| *v < 3)
    .subscribe(push);

  assert_eq!(*result.lock().unwrap(), vec![3, 1, 2]);
}

#[test]
fn test_buffer_count_then_time_trigger() {
  TestScheduler::init();
  let flushes = Arc::new(Mutex::new(vec![]));
  let c_flushes = flushes.clone();
  let ticks = observable::interval(Duration::from_secs(1), TestScheduler).take(3);
  ticks
    .buffer(Duration::from_secs(4), 2, TestScheduler)
    .subscribe(move |v| c_flushes.lock().unwrap().push((TestScheduler::now(), v)));

  // One element per second: the count trigger fires at 2s.
  TestScheduler::advance_by(Duration::from_secs(2));
  assert_eq!(*flushes.lock().unwrap(), vec![(Duration::from_secs(2), vec![0, 1])]);

  // The third element arrives at 3s and the source completes, flushing the
  // remainder without waiting for the timer.
  TestScheduler::advance_by(Duration::from_secs(1));
  assert_eq!(flushes.lock().unwrap().len(), 2);
  assert_eq!(flushes.lock().unwrap()[1], (Duration::from_secs(3), vec![2]));
}

#[test]
fn test_buffer_time_trigger_alone() {
  TestScheduler::init();
  let flushes = Arc::new(Mutex::new(vec![]));
  let c_flushes = flushes.clone();
  let subject = Subject::publish();
  subject
    .clone()
    .buffer(Duration::from_secs(4), 2, TestScheduler)
    .subscribe(move |v: Vec<i32>| c_flushes.lock().unwrap().push((TestScheduler::now(), v)));

  TestScheduler::advance_by(Duration::from_secs(1));
  subject.next(1);
  TestScheduler::advance_by(Duration::from_secs(3));

  assert_eq!(*flushes.lock().unwrap(), vec![(Duration::from_secs(4), vec![1])]);
}

#[test]
fn test_combine_latest_reuses_last_value() {
  let (result, push) = recorder();
  let a = Subject::publish();
  let b = Subject::publish();
  a.clone()
    .combine_latest(b.clone(), |x: &'static str, y: &'static str| format!("{x} {y}"))
    .subscribe(push);

  a.next("Hello");
  b.next("World");
  a.next("Hi");

  assert_eq!(*result.lock().unwrap(), vec!["Hello World", "Hi World"]);
}

#[test]
fn test_zip_pairs_in_order() {
  let (result, push) = recorder();
  let a = Subject::publish();
  let b = Subject::publish();
  a.clone().zip(b.clone()).subscribe(push);

  a.next("a1");
  a.next("a2");
  a.next("a3");
  b.next("b1");
  assert_eq!(result.lock().unwrap().len(), 1);
  b.next("b2");
  b.next("b3");

  assert_eq!(
    *result.lock().unwrap(),
    vec![("a1", "b1"), ("a2", "b2"), ("a3", "b3")]
  );
}

#[test]
fn test_zip_with_and_zip_all_agree() {
  let (pairs, push_pair) = recorder();
  let (rows, push_row) = recorder();
  let a = Subject::publish();
  let b = Subject::publish();
  a.clone().zip_with(b.clone(), |x: i32, y: i32| x * 10 + y).subscribe(push_pair);
  observable::zip_all(vec![a.clone(), b.clone()])
    .map(|row: Vec<i32>| row[0] * 10 + row[1])
    .subscribe(push_row);

  a.next(1);
  a.next(2);
  b.next(3);
  b.next(4);
  b.next(5);

  assert_eq!(*pairs.lock().unwrap(), vec![13, 24]);
  assert_eq!(*pairs.lock().unwrap(), *rows.lock().unwrap());
}

#[test]
fn test_combine_latest_all_reuses_last_values() {
  let (result, push) = recorder();
  let greeting = Subject::publish();
  let name = Subject::publish();
  let punctuation = Subject::publish();
  observable::combine_latest_all(vec![greeting.clone(), name.clone(), punctuation.clone()])
    .map(|parts: Vec<&'static str>| parts.concat())
    .subscribe(push);

  greeting.next("Hello ");
  name.next("World");
  punctuation.next("!");
  greeting.next("Hi ");

  assert_eq!(*result.lock().unwrap(), vec!["Hello World!", "Hi World!"]);
}

#[test]
fn test_subscriber_disposes_itself_from_next() {
  let (result, mut push) = recorder();
  let subject = Subject::publish();
  let subscription = subject.clone().subscribe_with_handle(move |mut handle| {
    ObserverAll::new(
      move |v: i32| {
        push(v);
        if v >= 2 {
          handle.unsubscribe();
        }
      },
      |_| {},
      || {},
    )
  });

  for v in 1..=4 {
    subject.next(v);
  }

  assert_eq!(*result.lock().unwrap(), vec![1, 2]);
  assert!(subscription.is_closed());
  assert_eq!(subject.subscriber_count(), 0);
}

#[test]
fn test_disconnected_replay_still_replays_then_completes() {
  let source = Subject::publish();
  let connectable = source.clone().replay(2).unwrap();
  let mut connection = connectable.clone().connect();
  source.next(1);
  source.next(2);
  source.next(3);
  connection.unsubscribe();

  let log = Arc::new(Mutex::new(vec![]));
  let (c_next, c_complete) = (log.clone(), log.clone());
  connectable.fork().subscribe_complete(
    move |v: i32| c_next.lock().unwrap().push(v.to_string()),
    move || c_complete.lock().unwrap().push("done".to_string()),
  );
  assert_eq!(*log.lock().unwrap(), vec!["2", "3", "done"]);
}

#[test]
fn test_with_latest_from_only_source_drives() {
  let (result, push) = recorder();
  let trigger = Subject::publish();
  let other = Subject::publish();
  trigger.clone().with_latest_from(other.clone()).subscribe(push);

  trigger.next(0);
  other.next("x");
  other.next("y");
  trigger.next(1);

  assert_eq!(*result.lock().unwrap(), vec![(1, "y")]);
}

#[test]
fn test_materialize_filter_dematerialize() {
  let (result, push) = recorder();
  let completed = Arc::new(Mutex::new(false));
  let c_completed = completed.clone();

  // Interleaved events, reified: the errors are carried as plain values.
  observable::just([
    Notification::Next(1),
    Notification::Error(RxError::upstream("first")),
    Notification::Next(2),
    Notification::Error(RxError::upstream("second")),
    Notification::Next(3),
  ])
  .filter(|n| !n.is_error())
  .dematerialize()
  .subscribe_complete(push, move || *c_completed.lock().unwrap() = true);

  assert_eq!(*result.lock().unwrap(), vec![1, 2, 3]);
  assert!(*completed.lock().unwrap());
}

#[test]
fn test_materialize_never_errors() {
  let (result, push) = recorder();
  observable::of(1)
    .concat_with(observable::of(2))
    .map(|v| if v == 2 { Err(RxError::upstream("two")) } else { Ok(v) })
    .try_map(|r| r)
    .materialize()
    .subscribe(push);

  assert_eq!(
    *result.lock().unwrap(),
    vec![
      Notification::Next(1),
      Notification::Error(RxError::operator("upstream error: two")),
    ]
  );
}

#[test]
fn test_take_until_releases_both_sides() {
  let (result, push) = recorder();
  let source = Subject::publish();
  let stop = Subject::publish();
  source.clone().take_until(stop.clone()).subscribe(push);

  source.next(1);
  stop.next(());
  source.next(2);

  assert_eq!(*result.lock().unwrap(), vec![1]);
  assert_eq!(source.subscriber_count(), 0);
  assert_eq!(stop.subscriber_count(), 0);
}

#[test]
fn test_merge_waits_for_every_source() {
  let (result, push) = recorder();
  let completed = Arc::new(Mutex::new(false));
  let c_completed = completed.clone();
  let a = Subject::publish();
  let b = Subject::publish();
  observable::merge(vec![a.clone(), b.clone()])
    .subscribe_complete(push, move || *c_completed.lock().unwrap() = true);

  a.next(1);
  b.next(2);
  a.complete();
  assert!(!*completed.lock().unwrap());
  b.next(3);
  b.complete();

  assert_eq!(*result.lock().unwrap(), vec![1, 2, 3]);
  assert!(*completed.lock().unwrap());
}

#[test]
fn test_sample_reports_only_fresh_values() {
  let (result, push) = recorder();
  let source = Subject::publish();
  let sampler = Subject::publish();
  source.clone().sample(sampler.clone()).subscribe(push);

  source.next(1);
  sampler.next(());
  sampler.next(());
  source.next(2);
  source.next(3);
  sampler.next(());

  assert_eq!(*result.lock().unwrap(), vec![1, 3]);
}

#[test]
fn test_delay_preserves_order_and_spacing() {
  TestScheduler::init();
  let (result, mut push) = recorder();
  let subject = Subject::publish();
  subject
    .clone()
    .delay(Duration::from_millis(500), TestScheduler)
    .subscribe(move |v: i32| push((v, TestScheduler::now())));

  subject.next(1);
  subject.next(2);
  TestScheduler::advance_by(Duration::from_millis(200));
  subject.next(3);
  TestScheduler::flush();

  assert_eq!(
    *result.lock().unwrap(),
    vec![
      (1, Duration::from_millis(500)),
      (2, Duration::from_millis(500)),
      (3, Duration::from_millis(700)),
    ]
  );
}

#[test]
fn test_disposal_cancels_timers() {
  TestScheduler::init();
  let (result, push) = recorder();
  let mut subscription = observable::interval(Duration::from_millis(10), TestScheduler)
    .map(|v| v * 10)
    .delay(Duration::from_millis(5), TestScheduler)
    .subscribe(push);

  TestScheduler::advance_by(Duration::from_millis(25));
  subscription.unsubscribe();
  TestScheduler::advance_by(Duration::from_millis(100));

  assert_eq!(*result.lock().unwrap(), vec![0, 10]);
  assert!(TestScheduler::is_empty());
}

#[test]
fn test_defer_runs_factory_per_subscription() {
  let calls = Arc::new(Mutex::new(0));
  let c_calls = calls.clone();
  let deferred = observable::defer(move || {
    let mut calls = c_calls.lock().unwrap();
    *calls += 1;
    observable::of(*calls)
  });

  let result = Arc::new(Mutex::new(vec![]));
  let (c_first, c_second) = (result.clone(), result.clone());
  deferred.clone().subscribe(move |v| c_first.lock().unwrap().push(v));
  deferred.subscribe(move |v| c_second.lock().unwrap().push(v));

  assert_eq!(*result.lock().unwrap(), vec![1, 2]);
}

#[test]
fn test_subscription_guard_unsubscribes_on_scope_exit() {
  let subject = Subject::publish();
  {
    let _guard = subject.clone().subscribe(|_: i32| {}).unsubscribe_when_dropped();
    assert_eq!(subject.subscriber_count(), 1);
  }
  assert_eq!(subject.subscriber_count(), 0);
}

#[cfg(feature = "futures-scheduler")]
#[test]
fn test_thread_pool_delay() {
  use std::sync::mpsc;

  let (tx, rx) = mpsc::channel();
  observable::from_iter(0..3)
    .delay(Duration::from_millis(10), ThreadPoolScheduler::default())
    .to_vec()
    .subscribe(move |v| tx.send(v).unwrap());

  assert_eq!(rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap(), vec![0, 1, 2]);
}
