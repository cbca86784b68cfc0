use std::fmt::Display;

use crate::prelude::*;

#[derive(Clone)]
pub struct DistinctUntilChangedOp<S, F> {
  source: S,
  eq: F,
}

impl<S, F> DistinctUntilChangedOp<S, F> {
  pub(crate) fn new(source: S, eq: F) -> Self { DistinctUntilChangedOp { source, eq } }
}

impl<Item, S, F> Observable<Item> for DistinctUntilChangedOp<S, F>
where
  S: Observable<Item>,
  F: FnMut(&Item, &Item) -> bool + Send + 'static,
  Item: Clone + Send + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.source.actual_subscribe(DistinctUntilChangedObserver {
      observer,
      eq: self.eq,
      last: None,
    })
  }
}

pub struct DistinctUntilChangedObserver<O, F, Item> {
  observer: O,
  eq: F,
  last: Option<Item>,
}

impl<Item, O, F> Observer<Item> for DistinctUntilChangedObserver<O, F, Item>
where
  O: Observer<Item>,
  F: FnMut(&Item, &Item) -> bool,
  Item: Clone,
{
  fn next(&mut self, value: Item) {
    if let Some(last) = &self.last {
      if (self.eq)(last, &value) {
        return;
      }
    }
    self.last = Some(value.clone());
    self.observer.next(value);
  }

  forward_terminal!(observer);
}

/// `distinct_until_changed_by` with a fallible comparison.
#[derive(Clone)]
pub struct TryDistinctUntilChangedOp<S, F> {
  source: S,
  eq: F,
}

impl<S, F> TryDistinctUntilChangedOp<S, F> {
  pub(crate) fn new(source: S, eq: F) -> Self { TryDistinctUntilChangedOp { source, eq } }
}

impl<Item, E, S, F> Observable<Item> for TryDistinctUntilChangedOp<S, F>
where
  S: Observable<Item>,
  F: FnMut(&Item, &Item) -> Result<bool, E> + Send + 'static,
  Item: Clone + Send + 'static,
  E: Display,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.source.actual_subscribe(TryDistinctUntilChangedObserver {
      observer: Some(observer),
      eq: self.eq,
      last: None,
    })
  }
}

pub struct TryDistinctUntilChangedObserver<O, F, Item> {
  observer: Option<O>,
  eq: F,
  last: Option<Item>,
}

impl<Item, E, O, F> Observer<Item> for TryDistinctUntilChangedObserver<O, F, Item>
where
  O: Observer<Item>,
  F: FnMut(&Item, &Item) -> Result<bool, E>,
  Item: Clone,
  E: Display,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    if let Some(last) = &self.last {
      match (self.eq)(last, &value) {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => {
          self.last = None;
          return self.observer.error(RxError::operator(e));
        }
      }
    }
    self.last = Some(value.clone());
    self.observer.next(value);
  }

  forward_terminal!(observer);
}
