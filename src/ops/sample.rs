use crate::{ops::take_until::NotifierObserver, prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct SampleOp<S, N, NotifyItem> {
  source: S,
  sampler: N,
  _hint: TypeHint<NotifyItem>,
}

impl<S, N, NotifyItem> SampleOp<S, N, NotifyItem> {
  pub(crate) fn new(source: S, sampler: N) -> Self { SampleOp { source, sampler, _hint: TypeHint::new() } }
}

impl<Item, NotifyItem, S, N> Observable<Item> for SampleOp<S, N, NotifyItem>
where
  S: Observable<Item>,
  N: Observable<NotifyItem>,
  Item: Send + 'static,
{
  type Unsub = ZipSubscription<N::Unsub, S::Unsub>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let sample = SampleObserver(MutArc::own(SampleState { observer: Some(observer), latest: None }));
    let sampler = NotifierObserver::new::<Item>(
      sample.clone(),
      SampleObserver::emit_latest,
      |o: &mut SampleObserver<O, Item>| Observer::<Item>::complete(o),
    );
    let sampler = self.sampler.actual_subscribe(sampler);
    ZipSubscription::new(sampler, self.source.actual_subscribe(sample))
  }
}

struct SampleState<O, Item> {
  observer: Option<O>,
  latest: Option<Item>,
}

pub struct SampleObserver<O, Item>(MutArc<SampleState<O, Item>>);

impl<O, Item> SampleObserver<O, Item>
where
  O: Observer<Item>,
{
  /// Emits the value received since the previous sample, if any.
  fn emit_latest(&mut self) {
    let mut state = self.0.rc_deref_mut();
    if let Some(value) = state.latest.take() {
      state.observer.next(value);
    }
  }
}

impl<O, Item> Clone for SampleObserver<O, Item> {
  fn clone(&self) -> Self { SampleObserver(self.0.clone()) }
}

impl<O, Item> Observer<Item> for SampleObserver<O, Item>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) { self.0.rc_deref_mut().latest = Some(value) }

  fn error(&mut self, err: RxError) { self.0.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    let mut state = self.0.rc_deref_mut();
    state.latest = None;
    state.observer.complete();
  }

  fn is_finished(&self) -> bool { self.0.rc_deref().observer.is_finished() }
}
