use crate::prelude::*;

/// Merges two observables; see
/// [`ObservableExt::merge`](crate::observable::ObservableExt::merge).
#[derive(Clone)]
pub struct MergeOp<A, B> {
  a: A,
  b: B,
}

impl<A, B> MergeOp<A, B> {
  pub(crate) fn new(a: A, b: B) -> Self { MergeOp { a, b } }
}

impl<Item, A, B> Observable<Item> for MergeOp<A, B>
where
  A: Observable<Item>,
  B: Observable<Item>,
{
  type Unsub = ZipSubscription<A::Unsub, Option<B::Unsub>>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let merged = MergeObserver::new(observer, 2);
    let a = self.a.actual_subscribe(merged.clone());
    let b = (!Observer::<Item>::is_finished(&merged)).then(|| self.b.actual_subscribe(merged));
    ZipSubscription::new(a, b)
  }
}

/// Merges any number of observables of the same type; built by
/// [`observable::merge`](crate::observable::merge).
#[derive(Clone)]
pub struct Merge<S>(Vec<S>);

impl<S> Merge<S> {
  pub(crate) fn new(sources: Vec<S>) -> Self { Merge(sources) }
}

impl<Item, S> Observable<Item> for Merge<S>
where
  S: Observable<Item>,
{
  type Unsub = CompositeSubscription;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let subscription = CompositeSubscription::new();
    if self.0.is_empty() {
      observer.complete();
      return subscription;
    }
    let merged = MergeObserver::new(observer, self.0.len());
    for source in self.0 {
      if Observer::<Item>::is_finished(&merged) {
        break;
      }
      subscription.add(source.actual_subscribe(merged.clone()));
    }
    subscription
  }
}

pub(crate) struct MergeState<O> {
  observer: Option<O>,
  active: usize,
}

/// Shares one downstream among several upstreams and completes it once every
/// upstream completed.
pub struct MergeObserver<O>(MutArc<MergeState<O>>);

impl<O> MergeObserver<O> {
  pub(crate) fn new(observer: O, active: usize) -> Self {
    MergeObserver(MutArc::own(MergeState { observer: Some(observer), active }))
  }

  /// Registers one more upstream that has to complete.
  pub(crate) fn add_source(&self) { self.0.rc_deref_mut().active += 1; }
}

impl<O> Clone for MergeObserver<O> {
  fn clone(&self) -> Self { MergeObserver(self.0.clone()) }
}

impl<Item, O> Observer<Item> for MergeObserver<O>
where
  O: Observer<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.0.rc_deref_mut().observer.next(value) }

  fn error(&mut self, err: RxError) { self.0.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    let mut state = self.0.rc_deref_mut();
    state.active = state.active.saturating_sub(1);
    if state.active == 0 {
      state.observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.0.rc_deref().observer.is_finished() }
}
