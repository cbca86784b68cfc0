use crate::prelude::*;

#[derive(Clone)]
pub struct OnErrorResumeNextOp<S, F> {
  source: S,
  fallback: F,
}

impl<S, F> OnErrorResumeNextOp<S, F> {
  pub(crate) fn new(source: S, fallback: F) -> Self { OnErrorResumeNextOp { source, fallback } }
}

impl<Item, S, F, Fallback> Observable<Item> for OnErrorResumeNextOp<S, F>
where
  S: Observable<Item>,
  F: FnOnce(RxError) -> Fallback + Send + 'static,
  Fallback: Observable<Item>,
{
  type Unsub = ZipSubscription<S::Unsub, SerialSubscription>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let resumed = SerialSubscription::new();
    let observer = ResumeObserver {
      observer: Some(observer),
      fallback: Some(self.fallback),
      resumed: resumed.clone(),
    };
    ZipSubscription::new(self.source.actual_subscribe(observer), resumed)
  }
}

pub struct ResumeObserver<O, F> {
  observer: Option<O>,
  fallback: Option<F>,
  resumed: SerialSubscription,
}

impl<Item, O, F, Fallback> Observer<Item> for ResumeObserver<O, F>
where
  O: Observer<Item> + Send + 'static,
  F: FnOnce(RxError) -> Fallback,
  Fallback: Observable<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(&mut self, err: RxError) {
    let (Some(observer), Some(fallback)) = (self.observer.take(), self.fallback.take()) else {
      return;
    };
    tracing::debug!(error = %err, "resuming with fallback observable");
    self.resumed.replace(fallback(err).actual_subscribe(observer));
  }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
