use crate::prelude::*;

/// The last observer of every chain, installed by the `subscribe*` family.
///
/// It owns the user observer and shares a [`CompositeSubscription`] with the
/// handle returned to the caller. Disposing that handle closes the composite,
/// after which the subscriber reports itself finished and drops every event.
/// A terminal event closes the composite too, so upstream resources are
/// released as soon as the stream ends.
pub struct Subscriber<O> {
  observer: Option<O>,
  subscription: CompositeSubscription,
}

impl<O> Subscriber<O> {
  pub fn new(observer: O, subscription: CompositeSubscription) -> Self {
    Subscriber { observer: Some(observer), subscription }
  }
}

impl<Item, O> Observer<Item> for Subscriber<O>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    if self.subscription.is_closed() {
      return;
    }
    if let Some(observer) = &mut self.observer {
      observer.next(value)
    }
  }

  fn error(&mut self, err: RxError) {
    if let Some(mut observer) = self.observer.take() {
      if !self.subscription.is_closed() {
        observer.error(err);
      }
      self.subscription.unsubscribe();
    }
  }

  fn complete(&mut self) {
    if let Some(mut observer) = self.observer.take() {
      if !self.subscription.is_closed() {
        observer.complete();
      }
      self.subscription.unsubscribe();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool {
    self.subscription.is_closed() || self.observer.as_ref().map_or(true, |o| o.is_finished())
  }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use super::*;

  #[test]
  fn disposed_subscriber_drops_events() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let mut handle = CompositeSubscription::default();
    let mut subscriber = Subscriber::new(
      ObserverAll::new(move |v: i32| c_values.lock().unwrap().push(v), |_| {}, || {}),
      handle.clone(),
    );

    subscriber.next(1);
    handle.unsubscribe();
    subscriber.next(2);

    assert!(Observer::<i32>::is_finished(&subscriber));
    assert_eq!(*values.lock().unwrap(), vec![1]);
  }

  #[test]
  fn terminal_event_releases_upstream() {
    let handle = CompositeSubscription::default();
    let upstream = CompositeSubscription::default();
    handle.add(upstream.clone());
    let mut subscriber = Subscriber::new(ObserverAll::new(|_: i32| {}, |_| {}, || {}), handle.clone());

    subscriber.complete();

    assert!(upstream.is_closed());
    assert!(handle.is_closed());
  }
}
