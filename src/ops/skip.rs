use crate::prelude::*;

#[derive(Clone)]
pub struct SkipOp<S> {
  source: S,
  count: usize,
}

impl<S> SkipOp<S> {
  pub(crate) fn new(source: S, count: usize) -> Self { SkipOp { source, count } }
}

impl<Item, S> Observable<Item> for SkipOp<S>
where
  S: Observable<Item>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.source.actual_subscribe(SkipObserver { observer, remaining: self.count })
  }
}

pub struct SkipObserver<O> {
  observer: O,
  remaining: usize,
}

impl<Item, O> Observer<Item> for SkipObserver<O>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    if self.remaining == 0 {
      self.observer.next(value);
    } else {
      self.remaining -= 1;
    }
  }

  forward_terminal!(observer);
}
