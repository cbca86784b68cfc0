use crate::prelude::*;

#[derive(Clone)]
pub struct TakeOp<S> {
  source: S,
  count: usize,
}

impl<S> TakeOp<S> {
  pub(crate) fn new(source: S, count: usize) -> Self { TakeOp { source, count } }
}

impl<Item, S> Observable<Item> for TakeOp<S>
where
  S: Observable<Item>,
{
  type Unsub = Option<S::Unsub>;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    if self.count == 0 {
      observer.complete();
      return None;
    }
    let observer = TakeObserver { observer: Some(observer), remaining: self.count };
    Some(self.source.actual_subscribe(observer))
  }
}

pub struct TakeObserver<O> {
  observer: Option<O>,
  remaining: usize,
}

impl<Item, O> Observer<Item> for TakeObserver<O>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    if self.remaining == 0 {
      return;
    }
    self.remaining -= 1;
    self.observer.next(value);
    if self.remaining == 0 {
      self.observer.complete();
    }
  }

  forward_terminal!(observer);
}
