use std::fmt::Display;

use crate::{prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct MapOp<S, F, Item> {
  source: S,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Item> MapOp<S, F, Item> {
  pub(crate) fn new(source: S, func: F) -> Self { MapOp { source, func, _hint: TypeHint::new() } }
}

impl<Item, B, S, F> Observable<B> for MapOp<S, F, Item>
where
  S: Observable<Item>,
  F: FnMut(Item) -> B + Send + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<B> + Send + 'static,
  {
    self.source.actual_subscribe(MapObserver { observer, map: self.func })
  }
}

pub struct MapObserver<O, F> {
  observer: O,
  map: F,
}

impl<Item, B, O, F> Observer<Item> for MapObserver<O, F>
where
  O: Observer<B>,
  F: FnMut(Item) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next((self.map)(value)) }

  forward_terminal!(observer);
}

/// `map` with a fallible transform; see
/// [`ObservableExt::try_map`](crate::observable::ObservableExt::try_map).
#[derive(Clone)]
pub struct TryMapOp<S, F, Item> {
  source: S,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Item> TryMapOp<S, F, Item> {
  pub(crate) fn new(source: S, func: F) -> Self { TryMapOp { source, func, _hint: TypeHint::new() } }
}

impl<Item, B, E, S, F> Observable<B> for TryMapOp<S, F, Item>
where
  S: Observable<Item>,
  F: FnMut(Item) -> Result<B, E> + Send + 'static,
  E: Display,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<B> + Send + 'static,
  {
    self.source.actual_subscribe(TryMapObserver { observer: Some(observer), map: self.func })
  }
}

pub struct TryMapObserver<O, F> {
  observer: Option<O>,
  map: F,
}

impl<Item, B, E, O, F> Observer<Item> for TryMapObserver<O, F>
where
  O: Observer<B>,
  F: FnMut(Item) -> Result<B, E>,
  E: Display,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    match (self.map)(value) {
      Ok(v) => self.observer.next(v),
      Err(e) => self.observer.error(RxError::operator(e)),
    }
  }

  forward_terminal!(observer);
}
