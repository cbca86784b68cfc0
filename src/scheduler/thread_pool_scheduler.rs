use futures::{executor::ThreadPool, future::abortable};
use futures_time::task::sleep;
use once_cell::sync::Lazy;

use super::{Duration, Scheduler, Task, TaskHandle, TaskState};
use crate::{error::RxError, subscription::SubscriptionLike};

static DEFAULT_POOL: Lazy<ThreadPool> = Lazy::new(|| {
  tracing::debug!("creating default thread pool scheduler");
  ThreadPool::builder()
    .name_prefix("rxcore-pool-")
    .create()
    .expect("failed to create the default thread pool")
});

/// A timer-based scheduler running tasks on a `futures` thread pool.
///
/// Delays are real time. `Default` shares one lazily created pool across the
/// process; use [`ThreadPoolScheduler::builder`] to size a dedicated one.
#[derive(Clone)]
pub struct ThreadPoolScheduler {
  pool: ThreadPool,
}

/// Configuration of a dedicated [`ThreadPoolScheduler`].
#[derive(Debug, Default, Clone)]
pub struct ThreadPoolSchedulerBuilder {
  pool_size: Option<usize>,
  name_prefix: Option<String>,
}

impl ThreadPoolSchedulerBuilder {
  /// Number of worker threads; defaults to the number of CPUs.
  pub fn pool_size(mut self, size: usize) -> Self {
    self.pool_size = Some(size);
    self
  }

  pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.name_prefix = Some(prefix.into());
    self
  }

  pub fn build(self) -> Result<ThreadPoolScheduler, RxError> {
    if self.pool_size == Some(0) {
      return Err(RxError::precondition("thread pool size must be positive"));
    }
    let mut builder = ThreadPool::builder();
    if let Some(size) = self.pool_size {
      builder.pool_size(size);
    }
    if let Some(prefix) = self.name_prefix {
      builder.name_prefix(prefix);
    }
    let pool = builder.create().map_err(RxError::scheduler)?;
    tracing::debug!(pool_size = ?self.pool_size, "created thread pool scheduler");
    Ok(ThreadPoolScheduler { pool })
  }
}

impl ThreadPoolScheduler {
  pub fn new() -> Result<Self, RxError> { Self::builder().build() }

  pub fn builder() -> ThreadPoolSchedulerBuilder { ThreadPoolSchedulerBuilder::default() }
}

impl Default for ThreadPoolScheduler {
  fn default() -> Self { ThreadPoolScheduler { pool: DEFAULT_POOL.clone() } }
}

impl Scheduler for ThreadPoolScheduler {
  fn schedule_task(&self, mut task: Task, delay: Option<Duration>) -> TaskHandle {
    let handle = TaskHandle::new();
    let task_handle = handle.clone();
    let fut = async move {
      if let Some(delay) = delay {
        sleep(delay.into()).await;
      }
      loop {
        if task_handle.is_closed() {
          break;
        }
        match task.step() {
          TaskState::Finished => break,
          TaskState::Yield => {
            sleep(Duration::ZERO.into()).await;
          }
          TaskState::Sleeping(d) => {
            sleep(d.into()).await;
          }
        }
      }
      task_handle.mark_finished();
    };
    let (fut, abort) = abortable(fut);
    handle.set_canceller(move || abort.abort());
    tracing::trace!(?delay, "spawning task on thread pool");
    self.pool.spawn_ok(async move {
      let _ = fut.await;
    });
    handle
  }
}
