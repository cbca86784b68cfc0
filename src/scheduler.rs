//! Schedulers decide where and when deferred work runs.
//!
//! Every time-based operator (`delay`, `buffer`, `window`, `interval`, ...)
//! takes its scheduler as an explicit argument so tests can substitute
//! [`TestScheduler`] and drive time by hand.
//!
//! | Scheduler | Runs work |
//! |-----------|-----------|
//! | [`ImmediateScheduler`] | synchronously on the calling thread, ignoring delays |
//! | [`TestScheduler`] | when virtual time is advanced |
//! | `ThreadPoolScheduler` | on a futures thread pool, with real timers |
//! | `TokioScheduler` | on a tokio runtime |

use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
  },
};

pub use std::time::Duration;

use crate::subscription::SubscriptionLike;

mod test_scheduler;
pub use test_scheduler::TestScheduler;

#[cfg(all(feature = "futures-scheduler", not(target_arch = "wasm32")))]
mod thread_pool_scheduler;
#[cfg(all(feature = "futures-scheduler", not(target_arch = "wasm32")))]
pub use thread_pool_scheduler::{ThreadPoolScheduler, ThreadPoolSchedulerBuilder};

#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioScheduler;

/// What a task wants after one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
  /// The task is done and is dropped.
  Finished,
  /// Run the task again as soon as possible.
  Yield,
  /// Run the task again after the duration.
  Sleeping(Duration),
}

/// A unit of schedulable work, stepped until it reports
/// [`TaskState::Finished`].
pub struct Task(Box<dyn FnMut() -> TaskState + Send>);

impl Task {
  pub fn new(f: impl FnMut() -> TaskState + Send + 'static) -> Self { Task(Box::new(f)) }

  /// Wraps a one-shot closure.
  pub fn once(f: impl FnOnce() + Send + 'static) -> Self {
    let mut f = Some(f);
    Task::new(move || {
      if let Some(f) = f.take() {
        f();
      }
      TaskState::Finished
    })
  }

  /// Wraps a closure that runs every `period`.
  pub fn periodic(mut f: impl FnMut() + Send + 'static, period: Duration) -> Self {
    Task::new(move || {
      f();
      TaskState::Sleeping(period)
    })
  }

  #[inline]
  pub fn step(&mut self) -> TaskState { (self.0)() }
}

/// Cancellation handle of a scheduled task.
///
/// It is closed once the task finished or was cancelled. Cancelling also
/// aborts the future backing the task on asynchronous schedulers.
#[derive(Clone, Default)]
pub struct TaskHandle(Arc<TaskHandleInner>);

#[derive(Default)]
struct TaskHandleInner {
  closed: AtomicBool,
  canceller: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl TaskHandle {
  pub fn new() -> Self { Self::default() }

  /// A handle for work that already ran.
  pub fn finished() -> Self {
    let handle = Self::default();
    handle.mark_finished();
    handle
  }

  pub(crate) fn mark_finished(&self) {
    self.0.closed.store(true, Ordering::SeqCst);
    self.0.canceller.lock().unwrap_or_else(PoisonError::into_inner).take();
  }

  /// Installs the hook run on cancellation. If the handle is already closed
  /// the hook runs at once.
  pub(crate) fn set_canceller(&self, canceller: impl FnOnce() + Send + 'static) {
    let mut slot = self.0.canceller.lock().unwrap_or_else(PoisonError::into_inner);
    if self.is_closed() {
      drop(slot);
      canceller();
    } else {
      *slot = Some(Box::new(canceller));
    }
  }
}

impl SubscriptionLike for TaskHandle {
  fn unsubscribe(&mut self) {
    if self.0.closed.swap(true, Ordering::SeqCst) {
      return;
    }
    let canceller = self.0.canceller.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(canceller) = canceller {
      tracing::trace!("cancelling scheduled task");
      canceller();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.closed.load(Ordering::SeqCst) }
}

impl Debug for TaskHandle {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TaskHandle").field("closed", &self.is_closed()).finish()
  }
}

/// A Scheduler is an object to order tasks and schedule their execution.
pub trait Scheduler: Clone + Send + Sync + 'static {
  /// Runs `task` after `delay` (or as soon as possible when `None`) and keeps
  /// stepping it as its [`TaskState`] requests.
  fn schedule_task(&self, task: Task, delay: Option<Duration>) -> TaskHandle;

  /// Runs `f` once after `delay`.
  fn schedule<F>(&self, f: F, delay: Option<Duration>) -> TaskHandle
  where
    F: FnOnce() + Send + 'static,
  {
    self.schedule_task(Task::once(f), delay)
  }

  /// Runs `f` every `period`, starting one period from now, until the
  /// returned handle is unsubscribed.
  fn schedule_periodic<F>(&self, f: F, period: Duration) -> TaskHandle
  where
    F: FnMut() + Send + 'static,
  {
    self.schedule_task(Task::periodic(f, period), Some(period))
  }
}

/// Runs every task synchronously on the calling thread with zero delay.
///
/// There is no notion of time here: the delay is ignored and a task that asks
/// to sleep is finished after its first step. A periodic task therefore runs
/// exactly once.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
  fn schedule_task(&self, mut task: Task, _delay: Option<Duration>) -> TaskHandle {
    while let TaskState::Yield = task.step() {}
    TaskHandle::finished()
  }
}
