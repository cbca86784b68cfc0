//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

use crate::prelude::*;

/// Observer trait: the consumer of data in reactive programming.
///
/// Every method takes `&mut self` so the trait stays object safe: subjects
/// keep their subscribers as [`BoxedObserver`]s. After `error` or `complete`
/// an observer must ignore every further call; implementations guard this
/// themselves rather than relying on the producer.
pub trait Observer<Item> {
  /// Receive the next value from the observable.
  fn next(&mut self, value: Item);

  /// Handle a terminal error from the observable.
  fn error(&mut self, err: RxError);

  /// Handle completion of the observable.
  fn complete(&mut self);

  /// Returns `true` once the observer will not accept more values.
  ///
  /// Synchronous sources (like `from_iter`) poll it to stop early, e.g. when
  /// a downstream `take` is satisfied or the subscription was disposed.
  fn is_finished(&self) -> bool;
}

/// A type-erased, thread-safe observer.
pub type BoxedObserver<Item> = Box<dyn Observer<Item> + Send>;

impl<Item, T> Observer<Item> for Box<T>
where
  T: Observer<Item> + ?Sized,
{
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: RxError) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }

  #[inline]
  fn is_finished(&self) -> bool { (**self).is_finished() }
}

/// `None` is a finished observer; a terminal event takes the inner observer
/// out so nothing is delivered afterwards.
impl<Item, O> Observer<Item> for Option<O>
where
  O: Observer<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) {
    if let Some(observer) = self {
      observer.next(value)
    }
  }

  #[inline]
  fn error(&mut self, err: RxError) {
    if let Some(mut observer) = self.take() {
      observer.error(err)
    }
  }

  #[inline]
  fn complete(&mut self) {
    if let Some(mut observer) = self.take() {
      observer.complete()
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.as_ref().map_or(true, |o| o.is_finished()) }
}

/// An observer built from three closures.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
  is_stopped: bool,
}

impl<N, E, C> ObserverAll<N, E, C>
where
  E: FnMut(RxError),
  C: FnMut(),
{
  #[inline(always)]
  pub fn new(next: N, error: E, complete: C) -> Self {
    ObserverAll { next, error, complete, is_stopped: false }
  }
}

impl<Item, N, E, C> Observer<Item> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(RxError),
  C: FnMut(),
{
  #[inline]
  fn next(&mut self, value: Item) {
    if !self.is_stopped {
      (self.next)(value);
    }
  }

  fn error(&mut self, err: RxError) {
    if !self.is_stopped {
      self.is_stopped = true;
      (self.error)(err);
    }
  }

  fn complete(&mut self) {
    if !self.is_stopped {
      self.is_stopped = true;
      (self.complete)();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.is_stopped }
}

/// Error handler of subscribers that did not install one.
pub(crate) fn log_unhandled_error(err: RxError) {
  tracing::warn!(error = %err, "error reached a subscriber without an error handler");
}

pub(crate) fn noop() {}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn observer_all_stops_after_terminal() {
    let mut values = vec![];
    let mut errors = 0;
    let mut completes = 0;
    {
      let mut observer = ObserverAll::new(
        |v: i32| values.push(v),
        |_| errors += 1,
        || completes += 1,
      );
      observer.next(1);
      observer.error(RxError::upstream("first"));
      observer.next(2);
      observer.complete();
      observer.error(RxError::upstream("second"));
      assert!(Observer::<i32>::is_finished(&observer));
    }
    assert_eq!(values, vec![1]);
    assert_eq!(errors, 1);
    assert_eq!(completes, 0);
  }

  #[test]
  fn boxed_observer_delegates() {
    let mut total = 0;
    {
      let mut boxed: Box<dyn Observer<i32> + '_> =
        Box::new(ObserverAll::new(|v: i32| total += v, |_| {}, || {}));
      boxed.next(2);
      boxed.next(3);
      boxed.complete();
      assert!(Observer::<i32>::is_finished(&boxed));
    }
    assert_eq!(total, 5);
  }

  #[test]
  fn none_is_finished() {
    let observer: Option<ObserverAll<fn(i32), fn(RxError), fn()>> = None;
    assert!(Observer::<i32>::is_finished(&observer));
  }
}
