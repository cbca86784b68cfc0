use crate::prelude::*;

#[derive(Clone)]
pub struct IgnoreElementsOp<S>(S);

impl<S> IgnoreElementsOp<S> {
  pub(crate) fn new(source: S) -> Self { IgnoreElementsOp(source) }
}

impl<Item, S> Observable<Item> for IgnoreElementsOp<S>
where
  S: Observable<Item>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.0.actual_subscribe(IgnoreElementsObserver(observer))
  }
}

pub struct IgnoreElementsObserver<O>(O);

impl<Item, O> Observer<Item> for IgnoreElementsObserver<O>
where
  O: Observer<Item>,
{
  #[inline]
  fn next(&mut self, _: Item) {}

  forward_terminal!(0);
}
