use std::collections::VecDeque;

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct DelayOp<S, SD> {
  source: S,
  delay: Duration,
  scheduler: SD,
}

impl<S, SD> DelayOp<S, SD> {
  pub(crate) fn new(source: S, delay: Duration, scheduler: SD) -> Self {
    DelayOp { source, delay, scheduler }
  }
}

impl<Item, S, SD> Observable<Item> for DelayOp<S, SD>
where
  S: Observable<Item>,
  SD: Scheduler,
  Item: Send + 'static,
{
  type Unsub = ZipSubscription<S::Unsub, CompositeSubscription>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let observer = DelayObserver::new(observer, self.scheduler, Some(self.delay));
    let tasks = observer.tasks.clone();
    ZipSubscription::new(self.source.actual_subscribe(observer), tasks)
  }
}

struct DelayState<O, Item> {
  observer: Option<O>,
  queue: VecDeque<Notification<Item>>,
}

/// Re-delivers every event through `scheduler`.
///
/// Events are queued in arrival order and every scheduled task delivers the
/// oldest queued one, so the order holds even on schedulers that run tasks
/// concurrently.
pub struct DelayObserver<O, SD, Item> {
  state: MutArc<DelayState<O, Item>>,
  scheduler: SD,
  delay: Option<Duration>,
  pub(crate) tasks: CompositeSubscription,
}

impl<O, SD, Item> DelayObserver<O, SD, Item>
where
  O: Observer<Item> + Send + 'static,
  SD: Scheduler,
  Item: Send + 'static,
{
  pub(crate) fn new(observer: O, scheduler: SD, delay: Option<Duration>) -> Self {
    DelayObserver {
      state: MutArc::own(DelayState { observer: Some(observer), queue: VecDeque::new() }),
      scheduler,
      delay,
      tasks: CompositeSubscription::new(),
    }
  }

  fn push(&mut self, notification: Notification<Item>) {
    if self.tasks.is_closed() {
      return;
    }
    self.state.rc_deref_mut().queue.push_back(notification);
    let state = self.state.clone();
    let handle = self.scheduler.schedule(
      move || {
        let mut state = state.rc_deref_mut();
        if let Some(notification) = state.queue.pop_front() {
          notification.accept(&mut state.observer);
        }
      },
      self.delay,
    );
    self.tasks.add(handle);
  }
}

impl<O, SD, Item> Observer<Item> for DelayObserver<O, SD, Item>
where
  O: Observer<Item> + Send + 'static,
  SD: Scheduler,
  Item: Send + 'static,
{
  #[inline]
  fn next(&mut self, value: Item) { self.push(Notification::Next(value)) }

  #[inline]
  fn error(&mut self, err: RxError) { self.push(Notification::Error(err)) }

  #[inline]
  fn complete(&mut self) { self.push(Notification::Complete) }

  fn is_finished(&self) -> bool { self.tasks.is_closed() || self.state.rc_deref().observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn shifts_every_event() {
    TestScheduler::init();
    let log = Arc::new(Mutex::new(vec![]));
    let (c_next, c_complete) = (log.clone(), log.clone());
    observable::from_iter(0..3)
      .delay(Duration::from_millis(50), TestScheduler)
      .subscribe_complete(
        move |v| c_next.lock().unwrap().push(format!("{v}@{:?}", TestScheduler::now())),
        move || c_complete.lock().unwrap().push(format!("done@{:?}", TestScheduler::now())),
      );

    TestScheduler::advance_by(Duration::from_millis(49));
    assert!(log.lock().unwrap().is_empty());
    TestScheduler::advance_by(Duration::from_millis(1));
    assert_eq!(*log.lock().unwrap(), vec!["0@50ms", "1@50ms", "2@50ms", "done@50ms"]);
  }

  #[test]
  fn keeps_relative_spacing() {
    TestScheduler::init();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let subject = Subject::publish();
    subject
      .clone()
      .delay(Duration::from_millis(100), TestScheduler)
      .subscribe(move |v: i32| c_values.lock().unwrap().push((v, TestScheduler::now())));

    subject.next(1);
    TestScheduler::advance_by(Duration::from_millis(30));
    subject.next(2);
    TestScheduler::flush();

    assert_eq!(
      *values.lock().unwrap(),
      vec![(1, Duration::from_millis(100)), (2, Duration::from_millis(130))]
    );
  }

  #[test]
  fn error_is_delayed_too() {
    TestScheduler::init();
    let errors = Arc::new(Mutex::new(vec![]));
    let c_errors = errors.clone();
    observable::throw_err::<i32>(RxError::upstream("late"))
      .delay(Duration::from_secs(1), TestScheduler)
      .subscribe_err(|_| {}, move |e| c_errors.lock().unwrap().push(e));
    assert!(errors.lock().unwrap().is_empty());
    TestScheduler::advance_by(Duration::from_secs(1));
    assert_eq!(*errors.lock().unwrap(), vec![RxError::upstream("late")]);
  }

  #[test]
  fn unsubscribe_cancels_pending() {
    TestScheduler::init();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let mut subscription = observable::of(1)
      .delay(Duration::from_millis(10), TestScheduler)
      .subscribe(move |v| c_values.lock().unwrap().push(v));
    subscription.unsubscribe();
    TestScheduler::flush();
    assert!(values.lock().unwrap().is_empty());
  }
}
