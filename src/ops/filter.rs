use std::fmt::Display;

use crate::prelude::*;

#[derive(Clone)]
pub struct FilterOp<S, F> {
  source: S,
  filter: F,
}

impl<S, F> FilterOp<S, F> {
  pub(crate) fn new(source: S, filter: F) -> Self { FilterOp { source, filter } }
}

impl<Item, S, F> Observable<Item> for FilterOp<S, F>
where
  S: Observable<Item>,
  F: FnMut(&Item) -> bool + Send + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.source.actual_subscribe(FilterObserver { observer, filter: self.filter })
  }
}

pub struct FilterObserver<O, F> {
  observer: O,
  filter: F,
}

impl<Item, O, F> Observer<Item> for FilterObserver<O, F>
where
  O: Observer<Item>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.filter)(&value) {
      self.observer.next(value)
    }
  }

  forward_terminal!(observer);
}

#[derive(Clone)]
pub struct TryFilterOp<S, F> {
  source: S,
  filter: F,
}

impl<S, F> TryFilterOp<S, F> {
  pub(crate) fn new(source: S, filter: F) -> Self { TryFilterOp { source, filter } }
}

impl<Item, E, S, F> Observable<Item> for TryFilterOp<S, F>
where
  S: Observable<Item>,
  F: FnMut(&Item) -> Result<bool, E> + Send + 'static,
  E: Display,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.source.actual_subscribe(TryFilterObserver { observer: Some(observer), filter: self.filter })
  }
}

pub struct TryFilterObserver<O, F> {
  observer: Option<O>,
  filter: F,
}

impl<Item, E, O, F> Observer<Item> for TryFilterObserver<O, F>
where
  O: Observer<Item>,
  F: FnMut(&Item) -> Result<bool, E>,
  E: Display,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    match (self.filter)(&value) {
      Ok(true) => self.observer.next(value),
      Ok(false) => {}
      Err(e) => self.observer.error(RxError::operator(e)),
    }
  }

  forward_terminal!(observer);
}
