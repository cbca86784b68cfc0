//! `take_until`, plus the notifier observer shared by every operator driven
//! by a second "signal" observable.

use crate::{prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct TakeUntilOp<S, N, NotifyItem> {
  source: S,
  notifier: N,
  _hint: TypeHint<NotifyItem>,
}

impl<S, N, NotifyItem> TakeUntilOp<S, N, NotifyItem> {
  pub(crate) fn new(source: S, notifier: N) -> Self {
    TakeUntilOp { source, notifier, _hint: TypeHint::new() }
  }
}

impl<Item, NotifyItem, S, N> Observable<Item> for TakeUntilOp<S, N, NotifyItem>
where
  S: Observable<Item>,
  N: Observable<NotifyItem>,
{
  type Unsub = ZipSubscription<N::Unsub, Option<S::Unsub>>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let shared = MutArc::own(Some(observer));
    let notifier = NotifierObserver::new::<Item>(
      shared.clone(),
      |o: &mut MutArc<Option<O>>| Observer::<Item>::complete(o),
      |_| {},
    );
    let notifier = self.notifier.actual_subscribe(notifier);
    let source =
      (!Observer::<Item>::is_finished(&shared)).then(|| self.source.actual_subscribe(shared));
    ZipSubscription::new(notifier, source)
  }
}

/// Observes a signal observable on behalf of `target`.
///
/// The callbacks are plain function pointers captured where `target`'s item
/// type is known, so the notifier observer accepts any item type itself.
pub struct NotifierObserver<T> {
  target: T,
  on_next: fn(&mut T),
  on_complete: fn(&mut T),
  on_error: fn(&mut T, RxError),
  is_finished: fn(&T) -> bool,
}

impl<T> NotifierObserver<T> {
  /// Errors of the notifier are forwarded to `target`.
  pub(crate) fn new<Item>(target: T, on_next: fn(&mut T), on_complete: fn(&mut T)) -> Self
  where
    T: Observer<Item>,
  {
    NotifierObserver {
      target,
      on_next,
      on_complete,
      on_error: |t, err| t.error(err),
      is_finished: |t| t.is_finished(),
    }
  }
}

impl<NotifyItem, T> Observer<NotifyItem> for NotifierObserver<T> {
  #[inline]
  fn next(&mut self, _: NotifyItem) { (self.on_next)(&mut self.target) }

  #[inline]
  fn error(&mut self, err: RxError) { (self.on_error)(&mut self.target, err) }

  #[inline]
  fn complete(&mut self) { (self.on_complete)(&mut self.target) }

  #[inline]
  fn is_finished(&self) -> bool { (self.is_finished)(&self.target) }
}
