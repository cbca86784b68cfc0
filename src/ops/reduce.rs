use std::fmt::Display;

use crate::{prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct ReduceOp<S, F, Acc, Item> {
  source: S,
  seed: Acc,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Acc, Item> ReduceOp<S, F, Acc, Item> {
  pub(crate) fn new(source: S, seed: Acc, func: F) -> Self {
    ReduceOp { source, seed, func, _hint: TypeHint::new() }
  }
}

impl<Item, Acc, S, F> Observable<Acc> for ReduceOp<S, F, Acc, Item>
where
  S: Observable<Item>,
  F: FnMut(Acc, Item) -> Acc + Send + 'static,
  Acc: Send + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Acc> + Send + 'static,
  {
    self.source.actual_subscribe(ReduceObserver {
      observer: Some(observer),
      func: self.func,
      acc: Some(self.seed),
    })
  }
}

pub struct ReduceObserver<O, F, Acc> {
  observer: Option<O>,
  func: F,
  acc: Option<Acc>,
}

impl<Item, Acc, O, F> Observer<Item> for ReduceObserver<O, F, Acc>
where
  O: Observer<Acc>,
  F: FnMut(Acc, Item) -> Acc,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      self.acc = Some((self.func)(acc, value));
    }
  }

  fn error(&mut self, err: RxError) {
    self.acc = None;
    self.observer.error(err)
  }

  fn complete(&mut self) {
    if let Some(mut observer) = self.observer.take() {
      if let Some(acc) = self.acc.take() {
        observer.next(acc);
      }
      observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// `reduce` with a fallible accumulator.
#[derive(Clone)]
pub struct TryReduceOp<S, F, Acc, Item> {
  source: S,
  seed: Acc,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Acc, Item> TryReduceOp<S, F, Acc, Item> {
  pub(crate) fn new(source: S, seed: Acc, func: F) -> Self {
    TryReduceOp { source, seed, func, _hint: TypeHint::new() }
  }
}

impl<Item, Acc, E, S, F> Observable<Acc> for TryReduceOp<S, F, Acc, Item>
where
  S: Observable<Item>,
  F: FnMut(Acc, Item) -> Result<Acc, E> + Send + 'static,
  Acc: Send + 'static,
  E: Display,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Acc> + Send + 'static,
  {
    self.source.actual_subscribe(TryReduceObserver {
      inner: ReduceObserver { observer: Some(observer), func: self.func, acc: Some(self.seed) },
    })
  }
}

pub struct TryReduceObserver<O, F, Acc> {
  inner: ReduceObserver<O, F, Acc>,
}

impl<Item, Acc, E, O, F> Observer<Item> for TryReduceObserver<O, F, Acc>
where
  O: Observer<Acc>,
  F: FnMut(Acc, Item) -> Result<Acc, E>,
  E: Display,
{
  fn next(&mut self, value: Item) {
    let inner = &mut self.inner;
    if let Some(acc) = inner.acc.take() {
      match (inner.func)(acc, value) {
        Ok(acc) => inner.acc = Some(acc),
        Err(e) => inner.observer.error(RxError::operator(e)),
      }
    }
  }

  fn error(&mut self, err: RxError) {
    self.inner.acc = None;
    self.inner.observer.error(err)
  }

  fn complete(&mut self) {
    if let Some(mut observer) = self.inner.observer.take() {
      if let Some(acc) = self.inner.acc.take() {
        observer.next(acc);
      }
      observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.inner.observer.is_finished() }
}
