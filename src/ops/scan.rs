use std::fmt::Display;

use crate::{prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct ScanOp<S, F, Acc, Item> {
  source: S,
  seed: Acc,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Acc, Item> ScanOp<S, F, Acc, Item> {
  pub(crate) fn new(source: S, seed: Acc, func: F) -> Self {
    ScanOp { source, seed, func, _hint: TypeHint::new() }
  }
}

impl<Item, Acc, S, F> Observable<Acc> for ScanOp<S, F, Acc, Item>
where
  S: Observable<Item>,
  F: FnMut(Acc, Item) -> Acc + Send + 'static,
  Acc: Clone + Send + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Acc> + Send + 'static,
  {
    self.source.actual_subscribe(ScanObserver {
      observer,
      func: self.func,
      acc: Some(self.seed),
    })
  }
}

pub struct ScanObserver<O, F, Acc> {
  observer: O,
  func: F,
  // Only `None` while `func` runs.
  acc: Option<Acc>,
}

impl<Item, Acc, O, F> Observer<Item> for ScanObserver<O, F, Acc>
where
  O: Observer<Acc>,
  F: FnMut(Acc, Item) -> Acc,
  Acc: Clone,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      let acc = (self.func)(acc, value);
      self.acc = Some(acc.clone());
      self.observer.next(acc);
    }
  }

  forward_terminal!(observer);
}

/// `scan` with a fallible accumulator.
#[derive(Clone)]
pub struct TryScanOp<S, F, Acc, Item> {
  source: S,
  seed: Acc,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Acc, Item> TryScanOp<S, F, Acc, Item> {
  pub(crate) fn new(source: S, seed: Acc, func: F) -> Self {
    TryScanOp { source, seed, func, _hint: TypeHint::new() }
  }
}

impl<Item, Acc, E, S, F> Observable<Acc> for TryScanOp<S, F, Acc, Item>
where
  S: Observable<Item>,
  F: FnMut(Acc, Item) -> Result<Acc, E> + Send + 'static,
  Acc: Clone + Send + 'static,
  E: Display,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Acc> + Send + 'static,
  {
    self.source.actual_subscribe(TryScanObserver {
      observer: Some(observer),
      func: self.func,
      acc: Some(self.seed),
    })
  }
}

pub struct TryScanObserver<O, F, Acc> {
  observer: Option<O>,
  func: F,
  // `None` once the accumulator failed.
  acc: Option<Acc>,
}

impl<Item, Acc, E, O, F> Observer<Item> for TryScanObserver<O, F, Acc>
where
  O: Observer<Acc>,
  F: FnMut(Acc, Item) -> Result<Acc, E>,
  Acc: Clone,
  E: Display,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      match (self.func)(acc, value) {
        Ok(acc) => {
          self.acc = Some(acc.clone());
          self.observer.next(acc);
        }
        Err(e) => self.observer.error(RxError::operator(e)),
      }
    }
  }

  forward_terminal!(observer);
}
