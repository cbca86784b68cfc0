use tokio::runtime::Handle;

use super::{Duration, Scheduler, Task, TaskHandle, TaskState};
use crate::subscription::SubscriptionLike;

/// Runs tasks on a tokio runtime, using tokio timers for delays.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
  handle: Handle,
}

impl TokioScheduler {
  pub fn new(handle: Handle) -> Self { TokioScheduler { handle } }

  /// Binds to the runtime of the calling context.
  ///
  /// # Panics
  ///
  /// Panics when called outside of a tokio runtime.
  pub fn current() -> Self { Self::new(Handle::current()) }
}

impl Scheduler for TokioScheduler {
  fn schedule_task(&self, mut task: Task, delay: Option<Duration>) -> TaskHandle {
    let handle = TaskHandle::new();
    let task_handle = handle.clone();
    let join = self.handle.spawn(async move {
      if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
      }
      loop {
        if task_handle.is_closed() {
          break;
        }
        match task.step() {
          TaskState::Finished => break,
          TaskState::Yield => tokio::task::yield_now().await,
          TaskState::Sleeping(d) => tokio::time::sleep(d).await,
        }
      }
      task_handle.mark_finished();
    });
    handle.set_canceller(move || join.abort());
    handle
  }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use super::*;

  #[tokio::test(flavor = "multi_thread")]
  async fn runs_delayed_task() {
    let hit = Arc::new(Mutex::new(false));
    let c_hit = hit.clone();
    TokioScheduler::current().schedule(move || *c_hit.lock().unwrap() = true, Some(Duration::from_millis(5)));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(*hit.lock().unwrap());
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn cancelled_task_never_runs() {
    let hit = Arc::new(Mutex::new(false));
    let c_hit = hit.clone();
    let mut handle = TokioScheduler::current()
      .schedule(move || *c_hit.lock().unwrap() = true, Some(Duration::from_millis(50)));
    handle.unsubscribe();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!*hit.lock().unwrap());
  }
}
