use std::collections::VecDeque;

use crate::prelude::*;

/// Subscribes to each source once the previous one completed.
#[derive(Clone)]
pub struct Concat<S>(Vec<S>);

impl<S> Concat<S> {
  pub(crate) fn new(sources: Vec<S>) -> Self { Concat(sources) }
}

impl<Item, S> Observable<Item> for Concat<S>
where
  S: Observable<Item> + Send + 'static,
{
  type Unsub = CompositeSubscription;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let state = MutArc::own(ConcatState { observer: Some(observer), pending: self.0.into() });
    let subscription = CompositeSubscription::new();
    subscribe_next(&state, &subscription);
    subscription
  }
}

struct ConcatState<O, S> {
  observer: Option<O>,
  pending: VecDeque<S>,
}

pub struct ConcatObserver<O, S> {
  state: MutArc<ConcatState<O, S>>,
  subscription: CompositeSubscription,
}

fn subscribe_next<Item, O, S>(state: &MutArc<ConcatState<O, S>>, subscription: &CompositeSubscription)
where
  O: Observer<Item> + Send + 'static,
  S: Observable<Item> + Send + 'static,
{
  let next = state.rc_deref_mut().pending.pop_front();
  match next {
    Some(source) => {
      let observer = ConcatObserver { state: state.clone(), subscription: subscription.clone() };
      subscription.add(source.actual_subscribe(observer));
    }
    None => state.rc_deref_mut().observer.complete(),
  }
}

impl<Item, O, S> Observer<Item> for ConcatObserver<O, S>
where
  O: Observer<Item> + Send + 'static,
  S: Observable<Item> + Send + 'static,
{
  #[inline]
  fn next(&mut self, value: Item) { self.state.rc_deref_mut().observer.next(value) }

  fn error(&mut self, err: RxError) { self.state.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    if !self.subscription.is_closed() {
      subscribe_next(&self.state, &self.subscription);
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.state.rc_deref().observer.is_finished() }
}
