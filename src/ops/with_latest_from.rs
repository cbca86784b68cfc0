use crate::{prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct WithLatestFromOp<A, B> {
  source: A,
  other: B,
}

impl<A, B> WithLatestFromOp<A, B> {
  pub(crate) fn new(source: A, other: B) -> Self { WithLatestFromOp { source, other } }
}

impl<ItemA, ItemB, A, B> Observable<(ItemA, ItemB)> for WithLatestFromOp<A, B>
where
  A: Observable<ItemA>,
  B: Observable<ItemB>,
  ItemA: 'static,
  ItemB: Clone + Send + 'static,
{
  type Unsub = ZipSubscription<B::Unsub, A::Unsub>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<(ItemA, ItemB)> + Send + 'static,
  {
    let state = MutArc::own(WithLatestFromState { observer: Some(observer), latest: None });
    // `other` first, so a synchronous `other` is already known to the source.
    let b = self.other.actual_subscribe(LatestObserver(state.clone(), TypeHint::new()));
    let a = self.source.actual_subscribe(WithLatestFromObserver(state));
    ZipSubscription::new(b, a)
  }
}

pub struct WithLatestFromState<O, ItemB> {
  observer: Option<O>,
  latest: Option<ItemB>,
}

pub struct WithLatestFromObserver<O, ItemB>(MutArc<WithLatestFromState<O, ItemB>>);

impl<ItemA, ItemB, O> Observer<ItemA> for WithLatestFromObserver<O, ItemB>
where
  O: Observer<(ItemA, ItemB)>,
  ItemB: Clone,
{
  fn next(&mut self, value: ItemA) {
    let mut state = self.0.rc_deref_mut();
    if let Some(latest) = state.latest.clone() {
      state.observer.next((value, latest));
    }
  }

  fn error(&mut self, err: RxError) { self.0.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) { self.0.rc_deref_mut().observer.complete() }

  fn is_finished(&self) -> bool { self.0.rc_deref().observer.is_finished() }
}

/// Tracks the latest value of the secondary source. Its completion does not
/// end the stream.
pub struct LatestObserver<O, ItemA, ItemB>(MutArc<WithLatestFromState<O, ItemB>>, TypeHint<ItemA>);

impl<ItemA, ItemB, O> Observer<ItemB> for LatestObserver<O, ItemA, ItemB>
where
  O: Observer<(ItemA, ItemB)>,
{
  fn next(&mut self, value: ItemB) { self.0.rc_deref_mut().latest = Some(value) }

  fn error(&mut self, err: RxError) { self.0.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {}

  fn is_finished(&self) -> bool { self.0.rc_deref().observer.is_finished() }
}
