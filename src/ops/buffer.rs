//! Time-and-count buffering.
//!
//! A buffer is flushed when it holds `max_count` values or when `timespan`
//! elapsed since the previous flush. Every timer tick emits, so a quiet
//! period yields empty buffers. The flush timer is a periodic task; a count
//! flush replaces it with a fresh one, so either trigger restarts the
//! countdown.

use crate::prelude::*;

#[derive(Clone)]
pub struct BufferOp<S, SD> {
  source: S,
  timespan: Duration,
  max_count: usize,
  scheduler: SD,
}

impl<S, SD> BufferOp<S, SD> {
  pub(crate) fn new(source: S, timespan: Duration, max_count: usize, scheduler: SD) -> Self {
    BufferOp { source, timespan, max_count, scheduler }
  }
}

impl<Item, S, SD> Observable<Vec<Item>> for BufferOp<S, SD>
where
  S: Observable<Item>,
  SD: Scheduler,
  Item: Send + 'static,
{
  type Unsub = ZipSubscription<Option<S::Unsub>, SerialSubscription>;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Vec<Item>> + Send + 'static,
  {
    let timer = SerialSubscription::new();
    if self.max_count == 0 {
      observer.error(RxError::precondition("buffer needs a max_count greater than zero"));
      return ZipSubscription::new(None, timer);
    }

    let observer = BufferObserver {
      state: MutArc::own(BufferState {
        observer: Some(observer),
        buffer: Vec::with_capacity(self.max_count),
        generation: 0,
      }),
      timespan: self.timespan,
      max_count: self.max_count,
      scheduler: self.scheduler,
      timer: timer.clone(),
    };
    observer.restart_timer(0);
    ZipSubscription::new(Some(self.source.actual_subscribe(observer)), timer)
  }
}

struct BufferState<O, Item> {
  observer: Option<O>,
  buffer: Vec<Item>,
  // Bumped on every count flush; ticks of replaced timers are ignored.
  generation: u64,
}

pub struct BufferObserver<O, SD, Item> {
  state: MutArc<BufferState<O, Item>>,
  timespan: Duration,
  max_count: usize,
  scheduler: SD,
  timer: SerialSubscription,
}

impl<O, SD, Item> BufferObserver<O, SD, Item>
where
  O: Observer<Vec<Item>> + Send + 'static,
  SD: Scheduler,
  Item: Send + 'static,
{
  fn restart_timer(&self, generation: u64) {
    let state = self.state.clone();
    let handle = self.scheduler.schedule_periodic(
      move || {
        let mut state = state.rc_deref_mut();
        if state.generation == generation {
          let values = std::mem::take(&mut state.buffer);
          state.observer.next(values);
        }
      },
      self.timespan,
    );
    self.timer.replace(handle);
  }
}

impl<O, SD, Item> Observer<Item> for BufferObserver<O, SD, Item>
where
  O: Observer<Vec<Item>> + Send + 'static,
  SD: Scheduler,
  Item: Send + 'static,
{
  fn next(&mut self, value: Item) {
    let flushed = {
      let mut state = self.state.rc_deref_mut();
      state.buffer.push(value);
      if state.buffer.len() >= self.max_count {
        let values = std::mem::replace(&mut state.buffer, Vec::with_capacity(self.max_count));
        state.generation += 1;
        state.observer.next(values);
        Some(state.generation)
      } else {
        None
      }
    };
    if let Some(generation) = flushed {
      self.restart_timer(generation);
    }
  }

  fn error(&mut self, err: RxError) {
    self.timer.unsubscribe();
    let mut state = self.state.rc_deref_mut();
    state.buffer.clear();
    state.observer.error(err);
  }

  fn complete(&mut self) {
    self.timer.unsubscribe();
    let mut state = self.state.rc_deref_mut();
    if !state.buffer.is_empty() {
      let values = std::mem::take(&mut state.buffer);
      state.observer.next(values);
    }
    state.observer.complete();
  }

  fn is_finished(&self) -> bool { self.state.rc_deref().observer.is_finished() }
}
