use std::{
  any::Any,
  fmt::{Debug, Formatter},
  mem,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
  },
};

use smallvec::SmallVec;

use super::{BoxSubscription, SubscriptionLike};

/// A bag of subscriptions disposed together.
///
/// Adding to a closed composite unsubscribes the added subscription at once,
/// so a late registration can never leak. Clones share the same bag.
#[derive(Clone, Default)]
pub struct CompositeSubscription(Arc<Inner>);

#[derive(Default)]
struct Inner {
  closed: AtomicBool,
  teardown: Mutex<SmallVec<[BoxSubscription; 2]>>,
}

impl CompositeSubscription {
  #[inline]
  pub fn new() -> Self { Self::default() }

  pub fn add<S: SubscriptionLike + Send + 'static>(&self, subscription: S) {
    if self.is_same(&subscription) {
      return;
    }
    let subscription: BoxSubscription = Box::new(subscription);
    let rejected = {
      let mut teardown = self.0.teardown.lock().unwrap_or_else(PoisonError::into_inner);
      if self.is_closed() {
        Some(subscription)
      } else {
        teardown.retain(|s| !s.is_closed());
        teardown.push(subscription);
        None
      }
    };
    if let Some(mut subscription) = rejected {
      subscription.unsubscribe();
    }
  }

  /// Number of subscriptions currently held.
  pub fn len(&self) -> usize {
    self.0.teardown.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  fn is_same(&self, other: &dyn Any) -> bool {
    other
      .downcast_ref::<Self>()
      .map_or(false, |other| Arc::ptr_eq(&self.0, &other.0))
  }
}

impl SubscriptionLike for CompositeSubscription {
  fn unsubscribe(&mut self) {
    if self.0.closed.swap(true, Ordering::SeqCst) {
      return;
    }
    let teardown = mem::take(&mut *self.0.teardown.lock().unwrap_or_else(PoisonError::into_inner));
    tracing::trace!(count = teardown.len(), "disposing composite subscription");
    for mut subscription in teardown {
      subscription.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.closed.load(Ordering::SeqCst) }
}

impl Debug for CompositeSubscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CompositeSubscription")
      .field("closed", &self.is_closed())
      .field("teardown_count", &self.len())
      .finish()
  }
}
