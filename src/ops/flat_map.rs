use crate::{ops::merge::MergeObserver, prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct FlatMapOp<S, F, Item> {
  source: S,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Item> FlatMapOp<S, F, Item> {
  pub(crate) fn new(source: S, func: F) -> Self { FlatMapOp { source, func, _hint: TypeHint::new() } }
}

impl<Item, Out, Inner, S, F> Observable<Out> for FlatMapOp<S, F, Item>
where
  S: Observable<Item>,
  F: FnMut(Item) -> Inner + Send + 'static,
  Inner: Observable<Out>,
  Out: 'static,
{
  type Unsub = ZipSubscription<S::Unsub, CompositeSubscription>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Out> + Send + 'static,
  {
    let inners = CompositeSubscription::new();
    let outer = FlatMapObserver {
      merged: MergeObserver::new(observer, 1),
      func: self.func,
      inners: inners.clone(),
      _hint: TypeHint::new(),
    };
    ZipSubscription::new(self.source.actual_subscribe(outer), inners)
  }
}

pub struct FlatMapObserver<O, F, Out> {
  merged: MergeObserver<O>,
  func: F,
  inners: CompositeSubscription,
  _hint: TypeHint<Out>,
}

impl<Item, Out, Inner, O, F> Observer<Item> for FlatMapObserver<O, F, Out>
where
  O: Observer<Out> + Send + 'static,
  F: FnMut(Item) -> Inner,
  Inner: Observable<Out>,
{
  fn next(&mut self, value: Item) {
    let inner = (self.func)(value);
    self.merged.add_source();
    self.inners.add(inner.actual_subscribe(self.merged.clone()));
  }

  fn error(&mut self, err: RxError) { Observer::<Out>::error(&mut self.merged, err) }

  fn complete(&mut self) { Observer::<Out>::complete(&mut self.merged) }

  #[inline]
  fn is_finished(&self) -> bool { Observer::<Out>::is_finished(&self.merged) }
}
