use crate::{ops::take_until::NotifierObserver, prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct SkipUntilOp<S, N, NotifyItem> {
  source: S,
  notifier: N,
  _hint: TypeHint<NotifyItem>,
}

impl<S, N, NotifyItem> SkipUntilOp<S, N, NotifyItem> {
  pub(crate) fn new(source: S, notifier: N) -> Self {
    SkipUntilOp { source, notifier, _hint: TypeHint::new() }
  }
}

impl<Item, NotifyItem, S, N> Observable<Item> for SkipUntilOp<S, N, NotifyItem>
where
  S: Observable<Item>,
  N: Observable<NotifyItem>,
{
  type Unsub = ZipSubscription<N::Unsub, S::Unsub>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let gate = SkipUntilObserver(MutArc::own(SkipUntilState { observer: Some(observer), open: false }));
    let notifier = NotifierObserver::new::<Item>(gate.clone(), SkipUntilObserver::open, |_| {});
    let notifier = self.notifier.actual_subscribe(notifier);
    ZipSubscription::new(notifier, self.source.actual_subscribe(gate))
  }
}

struct SkipUntilState<O> {
  observer: Option<O>,
  open: bool,
}

pub struct SkipUntilObserver<O>(MutArc<SkipUntilState<O>>);

impl<O> SkipUntilObserver<O> {
  fn open(&mut self) { self.0.rc_deref_mut().open = true; }
}

impl<O> Clone for SkipUntilObserver<O> {
  fn clone(&self) -> Self { SkipUntilObserver(self.0.clone()) }
}

impl<Item, O> Observer<Item> for SkipUntilObserver<O>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    let mut state = self.0.rc_deref_mut();
    if state.open {
      state.observer.next(value);
    }
  }

  fn error(&mut self, err: RxError) { self.0.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) { self.0.rc_deref_mut().observer.complete() }

  fn is_finished(&self) -> bool { self.0.rc_deref().observer.is_finished() }
}
