use std::fmt::Display;

use crate::prelude::*;

#[derive(Clone)]
pub struct SkipWhileOp<S, F> {
  source: S,
  predicate: F,
}

impl<S, F> SkipWhileOp<S, F> {
  pub(crate) fn new(source: S, predicate: F) -> Self { SkipWhileOp { source, predicate } }
}

impl<Item, S, F> Observable<Item> for SkipWhileOp<S, F>
where
  S: Observable<Item>,
  F: FnMut(&Item) -> bool + Send + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self
      .source
      .actual_subscribe(SkipWhileObserver { observer, predicate: self.predicate, open: false })
  }
}

pub struct SkipWhileObserver<O, F> {
  observer: O,
  predicate: F,
  open: bool,
}

impl<Item, O, F> Observer<Item> for SkipWhileObserver<O, F>
where
  O: Observer<Item>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    // The predicate is not consulted again once a value got through.
    if !self.open && !(self.predicate)(&value) {
      self.open = true;
    }
    if self.open {
      self.observer.next(value);
    }
  }

  forward_terminal!(observer);
}

/// `skip_while` with a fallible predicate.
#[derive(Clone)]
pub struct TrySkipWhileOp<S, F> {
  source: S,
  predicate: F,
}

impl<S, F> TrySkipWhileOp<S, F> {
  pub(crate) fn new(source: S, predicate: F) -> Self { TrySkipWhileOp { source, predicate } }
}

impl<Item, E, S, F> Observable<Item> for TrySkipWhileOp<S, F>
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
    self.source.actual_subscribe(TrySkipWhileObserver {
      observer: Some(observer),
      predicate: self.predicate,
      open: false,
    })
  }
}

pub struct TrySkipWhileObserver<O, F> {
  observer: Option<O>,
  predicate: F,
  open: bool,
}

impl<Item, E, O, F> Observer<Item> for TrySkipWhileObserver<O, F>
where
  O: Observer<Item>,
  F: FnMut(&Item) -> Result<bool, E>,
  E: Display,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    if !self.open {
      match (self.predicate)(&value) {
        Ok(skip) => self.open = !skip,
        Err(e) => return self.observer.error(RxError::operator(e)),
      }
    }
    if self.open {
      self.observer.next(value);
    }
  }

  forward_terminal!(observer);
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn gate_stays_open() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    observable::just([1, 2, 5, 1, 7])
      .skip_while(|v| *v < 3)
      .subscribe(move |v| c_values.lock().unwrap().push(v));
    assert_eq!(*values.lock().unwrap(), vec![5, 1, 7]);
  }

  #[test]
  fn everything_skipped() {
    let values = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (c_values, c_completed) = (values.clone(), completed.clone());
    observable::from_iter(0..5).skip_while(|_| true).subscribe_complete(
      move |v| c_values.lock().unwrap().push(v),
      move || *c_completed.lock().unwrap() = true,
    );
    assert!(values.lock().unwrap().is_empty());
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn try_skip_while_failure_ends_stream() {
    let log = Arc::new(Mutex::new(vec![]));
    let (c_next, c_err) = (log.clone(), log.clone());
    observable::just(["1", "2", "oops", "9"])
      .try_skip_while(|v| v.parse::<i32>().map(|n| n < 2))
      .subscribe_err(
        move |v: &str| c_next.lock().unwrap().push(v.to_string()),
        move |e: RxError| c_err.lock().unwrap().push(e.to_string()),
      );
    // The gate opened at "2", so "oops" is never parsed.
    assert_eq!(*log.lock().unwrap(), vec!["2", "oops", "9"]);

    let errors = Arc::new(Mutex::new(vec![]));
    let c_errors = errors.clone();
    observable::just(["1", "oops", "9"])
      .try_skip_while(|v| v.parse::<i32>().map(|n| n < 2))
      .subscribe_err(|_| {}, move |e: RxError| c_errors.lock().unwrap().push(e.is_operator()));
    assert_eq!(*errors.lock().unwrap(), vec![true]);
  }
}
