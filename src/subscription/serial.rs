use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc, Mutex, PoisonError,
};

use super::{BoxSubscription, SubscriptionLike};

/// Holds at most one subscription; setting a new one unsubscribes the
/// previous one.
///
/// Used where an operator keeps swapping the thing it listens to: the
/// current inner stream of `switch_map`, the pending flush timer of
/// `buffer`, the fallback of `on_error_resume_next`.
#[derive(Clone, Default)]
pub struct SerialSubscription(Arc<Inner>);

#[derive(Default)]
struct Inner {
  closed: AtomicBool,
  current: Mutex<Option<BoxSubscription>>,
}

impl SerialSubscription {
  #[inline]
  pub fn new() -> Self { Self::default() }

  pub fn replace<S: SubscriptionLike + Send + 'static>(&self, subscription: S) {
    let mut subscription: BoxSubscription = Box::new(subscription);
    let previous = {
      let mut current = self.0.current.lock().unwrap_or_else(PoisonError::into_inner);
      if self.is_closed() {
        drop(current);
        subscription.unsubscribe();
        return;
      }
      current.replace(subscription)
    };
    if let Some(mut previous) = previous {
      previous.unsubscribe();
    }
  }
}

impl SubscriptionLike for SerialSubscription {
  fn unsubscribe(&mut self) {
    if self.0.closed.swap(true, Ordering::SeqCst) {
      return;
    }
    let current = self.0.current.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(mut current) = current {
      current.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.closed.load(Ordering::SeqCst) }
}
