//! Virtual-time scheduler for tests.
//!
//! Time only moves when a test says so, which makes `delay`, `buffer`,
//! `window` and `interval` deterministic:
//!
//! ```rust
//! use rxcore::prelude::*;
//!
//! TestScheduler::init();
//! observable::of(42)
//!   .delay(Duration::from_millis(100), TestScheduler)
//!   .subscribe(|v| println!("{}", v));
//!
//! TestScheduler::advance_by(Duration::from_millis(100));
//! ```
//!
//! The clock and queue are thread-local, so tests running in parallel on the
//! harness threads never see each other's tasks.

use std::{cell::RefCell, cmp::Ordering, collections::BinaryHeap};

use super::{Duration, Scheduler, Task, TaskHandle, TaskState};
use crate::subscription::SubscriptionLike;

#[derive(Default)]
struct Clock {
  now: Duration,
  queue: BinaryHeap<Pending>,
  seq: usize,
  initialized: bool,
}

impl Clock {
  fn push(&mut self, at: Duration, task: Task, handle: TaskHandle) {
    let seq = self.seq;
    self.seq += 1;
    self.queue.push(Pending { at, seq, task, handle });
  }

  /// Pops the earliest task due at or before `limit`, moving the clock to
  /// its due time.
  fn pop_due(&mut self, limit: Option<Duration>) -> Option<Pending> {
    let due = self.queue.peek().map_or(false, |p| limit.map_or(true, |limit| p.at <= limit));
    if !due {
      return None;
    }
    let pending = self.queue.pop()?;
    self.now = pending.at;
    Some(pending)
  }
}

struct Pending {
  at: Duration,
  // Insertion order; breaks ties between tasks due at the same instant.
  seq: usize,
  task: Task,
  handle: TaskHandle,
}

impl PartialEq for Pending {
  fn eq(&self, other: &Self) -> bool { self.at == other.at && self.seq == other.seq }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Pending {
  // Reversed: `BinaryHeap` is a max-heap and the earliest task must be on top.
  fn cmp(&self, other: &Self) -> Ordering {
    other.at.cmp(&self.at).then_with(|| other.seq.cmp(&self.seq))
  }
}

thread_local! {
  static CLOCK: RefCell<Clock> = RefCell::new(Clock::default());
}

/// Scheduler driven by a per-thread virtual clock.
///
/// Every `TestScheduler` value on a thread shares the same clock, so the unit
/// struct can be passed to operators freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct TestScheduler;

impl TestScheduler {
  /// Resets the clock to zero and drops every queued task. Call it first in
  /// each test; the other functions panic on an uninitialized clock.
  pub fn init() {
    CLOCK.with(|clock| {
      *clock.borrow_mut() = Clock { initialized: true, ..Clock::default() };
    });
  }

  fn with_clock<R>(f: impl FnOnce(&mut Clock) -> R) -> R {
    CLOCK.with(|clock| {
      let mut clock = clock.borrow_mut();
      assert!(clock.initialized, "TestScheduler::init() must be called before using the scheduler");
      f(&mut clock)
    })
  }

  pub fn now() -> Duration { Self::with_clock(|clock| clock.now) }

  /// Queued tasks, cancelled ones that were not reached yet included.
  pub fn pending_count() -> usize { Self::with_clock(|clock| clock.queue.len()) }

  pub fn is_empty() -> bool { Self::with_clock(|clock| clock.queue.is_empty()) }

  /// Moves the clock forward by `duration`, running every task that falls
  /// due on the way in time order.
  pub fn advance_by(duration: Duration) {
    let target = Self::now() + duration;
    Self::run_until(Some(target));
    Self::with_clock(|clock| clock.now = target);
  }

  /// Runs tasks until the queue is empty, jumping the clock to each due
  /// time. Never call it while an uncancelled `interval` is running.
  pub fn flush() { Self::run_until(None) }

  fn run_until(limit: Option<Duration>) {
    // The clock is released while a task runs: tasks schedule more tasks.
    while let Some(mut pending) = Self::with_clock(|clock| clock.pop_due(limit)) {
      if pending.handle.is_closed() {
        continue;
      }
      let again = match pending.task.step() {
        TaskState::Finished => None,
        TaskState::Yield => Some(Duration::ZERO),
        TaskState::Sleeping(period) => Some(period),
      };
      match again {
        Some(_) if pending.handle.is_closed() => {}
        Some(delay) => Self::with_clock(|clock| {
          let at = clock.now + delay;
          clock.push(at, pending.task, pending.handle)
        }),
        None => pending.handle.mark_finished(),
      }
    }
  }
}

impl Scheduler for TestScheduler {
  fn schedule_task(&self, task: Task, delay: Option<Duration>) -> TaskHandle {
    let handle = TaskHandle::new();
    Self::with_clock(|clock| {
      let at = clock.now + delay.unwrap_or(Duration::ZERO);
      clock.push(at, task, handle.clone());
    });
    handle
  }
}

#[cfg(test)]
mod tests {
  use std::{
    mem,
    sync::{Arc, Mutex},
  };

  use super::*;

  fn recorder() -> (Arc<Mutex<Vec<u64>>>, impl Fn(u64) + Clone + Send + 'static) {
    let log = Arc::new(Mutex::new(vec![]));
    let c_log = log.clone();
    (log, move |v| c_log.lock().unwrap().push(v))
  }

  #[test]
  fn test_zero_sized_and_copy() {
    assert_eq!(mem::size_of::<TestScheduler>(), 0);
    let s1 = TestScheduler;
    let _s2 = s1;
    let _s3 = s1;
  }

  #[test]
  fn test_init_and_reset() {
    TestScheduler::init();
    assert_eq!(TestScheduler::now(), Duration::ZERO);
    assert!(TestScheduler::is_empty());

    TestScheduler::advance_by(Duration::from_millis(100));
    assert_eq!(TestScheduler::now(), Duration::from_millis(100));

    TestScheduler::init();
    assert_eq!(TestScheduler::now(), Duration::ZERO);
  }

  #[test]
  #[should_panic(expected = "TestScheduler::init() must be called")]
  fn test_panics_without_init() {
    CLOCK.with(|clock| clock.borrow_mut().initialized = false);
    TestScheduler::now();
  }

  #[test]
  fn test_delayed_tasks_run_in_time_order() {
    TestScheduler::init();
    let (log, record) = recorder();

    let r = record.clone();
    TestScheduler.schedule(move || r(2), Some(Duration::from_millis(20)));
    let r = record.clone();
    TestScheduler.schedule(move || r(1), Some(Duration::from_millis(10)));
    TestScheduler.schedule(move || record(3), Some(Duration::from_millis(20)));

    TestScheduler::advance_by(Duration::from_millis(10));
    assert_eq!(*log.lock().unwrap(), vec![1]);

    TestScheduler::advance_by(Duration::from_millis(10));
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    assert!(TestScheduler::is_empty());
  }

  #[test]
  fn test_periodic_until_cancelled() {
    TestScheduler::init();
    let (log, record) = recorder();
    let mut tick = 0;
    let mut handle = TestScheduler.schedule_periodic(
      move || {
        tick += 1;
        record(tick)
      },
      Duration::from_millis(100),
    );

    TestScheduler::advance_by(Duration::from_millis(350));
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);

    handle.unsubscribe();
    TestScheduler::advance_by(Duration::from_millis(500));
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
  }

  #[test]
  fn test_cancelled_task_never_runs() {
    TestScheduler::init();
    let (log, record) = recorder();
    let mut handle = TestScheduler.schedule(move || record(1), Some(Duration::from_millis(5)));
    handle.unsubscribe();
    TestScheduler::flush();
    assert!(log.lock().unwrap().is_empty());
  }

  #[test]
  fn test_task_scheduling_task() {
    TestScheduler::init();
    let (log, record) = recorder();
    TestScheduler.schedule(
      move || {
        record(1);
        TestScheduler.schedule(move || record(2), Some(Duration::from_millis(5)));
      },
      Some(Duration::from_millis(5)),
    );
    TestScheduler::flush();
    assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    assert_eq!(TestScheduler::now(), Duration::from_millis(10));
  }
}
