use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::prelude::*;

pub trait RcDeref {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a>;
}

pub trait RcDerefMut {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a>;
}

/// Shared mutable cell used for operator state crossing thread boundaries.
///
/// A poisoned lock is recovered rather than propagated: a panicking observer
/// must not wedge every other subscriber of the same state.
#[derive(Default)]
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl<T> RcDeref for MutArc<T> {
  type Target<'a>
    = MutexGuard<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<T> RcDerefMut for MutArc<T> {
  type Target<'a>
    = MutexGuard<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<Item, T> Observer<Item> for MutArc<T>
where
  T: Observer<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.rc_deref_mut().next(value) }

  #[inline]
  fn error(&mut self, err: RxError) { self.rc_deref_mut().error(err) }

  #[inline]
  fn complete(&mut self) { self.rc_deref_mut().complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.rc_deref().is_finished() }
}

impl<T: SubscriptionLike> SubscriptionLike for MutArc<T> {
  #[inline]
  fn unsubscribe(&mut self) { self.rc_deref_mut().unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.rc_deref().is_closed() }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}
