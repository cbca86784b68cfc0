use crate::prelude::*;

/// Reifies every event of the source into a [`Notification`] value.
#[derive(Clone)]
pub struct MaterializeOp<S>(S);

impl<S> MaterializeOp<S> {
  pub(crate) fn new(source: S) -> Self { MaterializeOp(source) }
}

impl<Item, S> Observable<Notification<Item>> for MaterializeOp<S>
where
  S: Observable<Item>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Notification<Item>> + Send + 'static,
  {
    self.0.actual_subscribe(MaterializeObserver(Some(observer)))
  }
}

pub struct MaterializeObserver<O>(Option<O>);

impl<Item, O> Observer<Item> for MaterializeObserver<O>
where
  O: Observer<Notification<Item>>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.0.next(Notification::Next(value)) }

  fn error(&mut self, err: RxError) {
    if let Some(mut observer) = self.0.take() {
      observer.next(Notification::Error(err));
      observer.complete();
    }
  }

  fn complete(&mut self) {
    if let Some(mut observer) = self.0.take() {
      observer.next(Notification::Complete);
      observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.0.is_finished() }
}

/// Turns [`Notification`] values back into events.
#[derive(Clone)]
pub struct DematerializeOp<S>(S);

impl<S> DematerializeOp<S> {
  pub(crate) fn new(source: S) -> Self { DematerializeOp(source) }
}

impl<Item, S> Observable<Item> for DematerializeOp<S>
where
  S: Observable<Notification<Item>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.0.actual_subscribe(DematerializeObserver(Some(observer)))
  }
}

pub struct DematerializeObserver<O>(Option<O>);

impl<Item, O> Observer<Notification<Item>> for DematerializeObserver<O>
where
  O: Observer<Item>,
{
  #[inline]
  fn next(&mut self, value: Notification<Item>) { value.accept(&mut self.0) }

  forward_terminal!(0);
}
