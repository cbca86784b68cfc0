//! Disposal handles returned by `subscribe`.
//!
//! A subscription is idempotent: unsubscribing twice is a no-op, and once
//! closed it reports `is_closed() == true` forever.

use std::fmt::{Debug, Formatter};

mod composite;
mod serial;

pub use composite::CompositeSubscription;
pub use serial::SerialSubscription;

/// Subscription returns from `Observable::actual_subscribe` to allow
/// unsubscribing.
pub trait SubscriptionLike {
  /// This allows deregistering a stream before it has finished receiving all
  /// events (i.e. before `complete` is called).
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

/// A type-erased, thread-safe subscription.
pub type BoxSubscription = Box<dyn SubscriptionLike + Send>;

impl Debug for dyn SubscriptionLike + Send {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("dyn SubscriptionLike")
      .field("is_closed", &self.is_closed())
      .finish()
  }
}

/// Synchronous sources hold no resource once `actual_subscribe` returns.
impl SubscriptionLike for () {
  #[inline]
  fn unsubscribe(&mut self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<T: ?Sized> SubscriptionLike for Box<T>
where
  T: SubscriptionLike,
{
  #[inline]
  fn unsubscribe(&mut self) { (**self).unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

impl<T: SubscriptionLike> SubscriptionLike for Option<T> {
  #[inline]
  fn unsubscribe(&mut self) {
    if let Some(s) = self {
      s.unsubscribe()
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.as_ref().map_or(true, |s| s.is_closed()) }
}

/// Two subscriptions disposed together, used by operators with two
/// upstreams.
#[derive(Clone, Debug, Default)]
pub struct ZipSubscription<A, B> {
  a: A,
  b: B,
}

impl<A, B> ZipSubscription<A, B> {
  pub fn new(a: A, b: B) -> Self { ZipSubscription { a, b } }
}

impl<A, B> SubscriptionLike for ZipSubscription<A, B>
where
  A: SubscriptionLike,
  B: SubscriptionLike,
{
  fn unsubscribe(&mut self) {
    self.a.unsubscribe();
    self.b.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.a.is_closed() && self.b.is_closed() }
}

/// Runs a teardown closure once, on the first `unsubscribe`.
pub struct ClosureSubscription<F>(Option<F>);

impl<F: FnOnce()> ClosureSubscription<F> {
  pub fn new(teardown: F) -> Self { ClosureSubscription(Some(teardown)) }
}

impl<F: FnOnce()> SubscriptionLike for ClosureSubscription<F> {
  fn unsubscribe(&mut self) {
    if let Some(teardown) = self.0.take() {
      teardown()
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_none() }
}

/// Wrapper around a subscription which provides the
/// `unsubscribe_when_dropped()` method.
#[derive(Clone, Debug)]
pub struct SubscriptionWrapper<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionWrapper<T> {
  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<T> { SubscriptionGuard(self.0) }

  /// Consumes this wrapper and returns the underlying subscription.
  pub fn into_inner(self) -> T { self.0 }
}

impl<T: SubscriptionLike> SubscriptionLike for SubscriptionWrapper<T> {
  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }

  #[inline]
  fn unsubscribe(&mut self) { self.0.unsubscribe() }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }
}

impl<T: SubscriptionLike> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}

#[cfg(test)]
mod test {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use super::*;

  #[test]
  fn closure_runs_once() {
    let hits = Arc::new(AtomicUsize::new(0));
    let c_hits = hits.clone();
    let mut subscription = ClosureSubscription::new(move || {
      c_hits.fetch_add(1, Ordering::SeqCst);
    });
    assert!(!subscription.is_closed());
    subscription.unsubscribe();
    subscription.unsubscribe();
    assert!(subscription.is_closed());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn zip_closes_both() {
    let a = CompositeSubscription::default();
    let b = CompositeSubscription::default();
    let mut zip = ZipSubscription::new(a.clone(), b.clone());
    assert!(!zip.is_closed());
    zip.unsubscribe();
    assert!(a.is_closed() && b.is_closed() && zip.is_closed());
  }

  #[test]
  fn guard_unsubscribes_on_drop() {
    let inner = CompositeSubscription::default();
    {
      let _guard = SubscriptionWrapper(inner.clone()).unsubscribe_when_dropped();
      assert!(!inner.is_closed());
    }
    assert!(inner.is_closed());
  }
}
