//! Time-and-count windowing. Windows close on the same triggers as
//! [`buffer`](crate::observable::ObservableExt::buffer), but each one is
//! emitted as a [`Window`] observable the moment it opens. Like buffers,
//! every timer tick rotates the window even when it stayed empty.

use crate::prelude::*;

/// One window of a `window` operator.
///
/// It replays every value it received, so subscribing after the window
/// already collected values (or closed) still sees all of them.
pub struct Window<Item>(Subject<Item>);

impl<Item> Clone for Window<Item> {
  fn clone(&self) -> Self { Window(self.0.clone()) }
}

impl<Item: Clone + Send + 'static> Observable<Item> for Window<Item> {
  type Unsub = SubjectSubscription<Item>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.0.actual_subscribe(observer)
  }
}

#[derive(Clone)]
pub struct WindowOp<S, SD> {
  source: S,
  timespan: Duration,
  max_count: usize,
  scheduler: SD,
}

impl<S, SD> WindowOp<S, SD> {
  pub(crate) fn new(source: S, timespan: Duration, max_count: usize, scheduler: SD) -> Self {
    WindowOp { source, timespan, max_count, scheduler }
  }
}

impl<Item, S, SD> Observable<Window<Item>> for WindowOp<S, SD>
where
  S: Observable<Item>,
  SD: Scheduler,
  Item: Clone + Send + 'static,
{
  type Unsub = ZipSubscription<Option<S::Unsub>, SerialSubscription>;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Window<Item>> + Send + 'static,
  {
    let timer = SerialSubscription::new();
    if self.max_count == 0 {
      observer.error(RxError::precondition("window needs a max_count greater than zero"));
      return ZipSubscription::new(None, timer);
    }

    let current = Subject::replay_all();
    observer.next(Window(current.clone()));
    let observer = WindowObserver {
      state: MutArc::own(WindowState { observer: Some(observer), current, count: 0, generation: 0 }),
      timespan: self.timespan,
      max_count: self.max_count,
      scheduler: self.scheduler,
      timer: timer.clone(),
    };
    observer.restart_timer(0);
    ZipSubscription::new(Some(self.source.actual_subscribe(observer)), timer)
  }
}

struct WindowState<O, Item> {
  observer: Option<O>,
  current: Subject<Item>,
  count: usize,
  generation: u64,
}

impl<O, Item> WindowState<O, Item>
where
  O: Observer<Window<Item>>,
  Item: Clone + Send + 'static,
{
  /// Completes the current window and opens the next one.
  fn rotate(&mut self) {
    let next = Subject::replay_all();
    let closed = std::mem::replace(&mut self.current, next.clone());
    self.count = 0;
    closed.complete();
    self.observer.next(Window(next));
  }
}

pub struct WindowObserver<O, SD, Item> {
  state: MutArc<WindowState<O, Item>>,
  timespan: Duration,
  max_count: usize,
  scheduler: SD,
  timer: SerialSubscription,
}

impl<O, SD, Item> WindowObserver<O, SD, Item>
where
  O: Observer<Window<Item>> + Send + 'static,
  SD: Scheduler,
  Item: Clone + Send + 'static,
{
  fn restart_timer(&self, generation: u64) {
    let state = self.state.clone();
    let handle = self.scheduler.schedule_periodic(
      move || {
        let mut state = state.rc_deref_mut();
        if state.generation == generation {
          state.rotate();
        }
      },
      self.timespan,
    );
    self.timer.replace(handle);
  }
}

impl<O, SD, Item> Observer<Item> for WindowObserver<O, SD, Item>
where
  O: Observer<Window<Item>> + Send + 'static,
  SD: Scheduler,
  Item: Clone + Send + 'static,
{
  fn next(&mut self, value: Item) {
    let rotated = {
      let mut state = self.state.rc_deref_mut();
      state.current.next(value);
      state.count += 1;
      if state.count >= self.max_count {
        state.generation += 1;
        state.rotate();
        Some(state.generation)
      } else {
        None
      }
    };
    if let Some(generation) = rotated {
      self.restart_timer(generation);
    }
  }

  fn error(&mut self, err: RxError) {
    self.timer.unsubscribe();
    let mut state = self.state.rc_deref_mut();
    state.current.error(err.clone());
    state.observer.error(err);
  }

  fn complete(&mut self) {
    self.timer.unsubscribe();
    let mut state = self.state.rc_deref_mut();
    state.current.complete();
    state.observer.complete();
  }

  fn is_finished(&self) -> bool { self.state.rc_deref().observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn count_windows() {
    TestScheduler::init();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    observable::from_iter(0..5)
      .window(Duration::from_secs(60), 2, TestScheduler)
      .flat_map(|window: Window<i32>| window.to_vec())
      .subscribe(move |v| c_values.lock().unwrap().push(v));
    assert_eq!(*values.lock().unwrap(), vec![vec![0, 1], vec![2, 3], vec![4]]);
  }

  #[test]
  fn late_window_subscriber_sees_everything() {
    TestScheduler::init();
    let windows = Arc::new(Mutex::new(vec![]));
    let c_windows = windows.clone();
    observable::from_iter(0..3)
      .window(Duration::from_secs(60), 3, TestScheduler)
      .subscribe(move |w| c_windows.lock().unwrap().push(w));

    let windows = windows.lock().unwrap().clone();
    assert_eq!(windows.len(), 2);
    let values = Arc::new(Mutex::new(vec![]));
    for w in windows {
      let c_values = values.clone();
      w.to_vec().subscribe(move |v| c_values.lock().unwrap().push(v));
    }
    assert_eq!(*values.lock().unwrap(), vec![vec![0, 1, 2], vec![]]);
  }

  #[test]
  fn time_closes_window() {
    TestScheduler::init();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let subject = Subject::publish();
    subject
      .clone()
      .window(Duration::from_secs(1), 10, TestScheduler)
      .flat_map(|window: Window<i32>| window.to_vec())
      .subscribe(move |v: Vec<i32>| c_values.lock().unwrap().push(v));

    subject.next(1);
    TestScheduler::advance_by(Duration::from_secs(1));
    assert_eq!(*values.lock().unwrap(), vec![vec![1]]);
    subject.next(2);
    subject.complete();
    assert_eq!(*values.lock().unwrap(), vec![vec![1], vec![2]]);
  }

  #[test]
  fn quiet_period_rotates_empty_windows() {
    TestScheduler::init();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let subject = Subject::publish();
    subject
      .clone()
      .window(Duration::from_secs(1), 10, TestScheduler)
      .flat_map(|window: Window<i32>| window.to_vec())
      .subscribe(move |v: Vec<i32>| c_values.lock().unwrap().push(v));

    TestScheduler::advance_by(Duration::from_secs(2));
    subject.next(7);
    TestScheduler::advance_by(Duration::from_secs(1));
    subject.complete();

    assert_eq!(*values.lock().unwrap(), vec![vec![], vec![], vec![7], vec![]]);
  }
}
