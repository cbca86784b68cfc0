use crate::prelude::*;

#[derive(Clone)]
pub struct StartWithOp<S, Item> {
  source: S,
  values: Vec<Item>,
}

impl<S, Item> StartWithOp<S, Item> {
  pub(crate) fn new(source: S, values: Vec<Item>) -> Self { StartWithOp { source, values } }
}

impl<Item, S> Observable<Item> for StartWithOp<S, Item>
where
  S: Observable<Item>,
{
  type Unsub = Option<S::Unsub>;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    for v in self.values {
      if observer.is_finished() {
        return None;
      }
      observer.next(v);
    }
    if observer.is_finished() {
      return None;
    }
    Some(self.source.actual_subscribe(observer))
  }
}
