use crate::prelude::*;

#[derive(Clone)]
pub struct SubscribeOnOp<S, SD> {
  source: S,
  scheduler: SD,
}

impl<S, SD> SubscribeOnOp<S, SD> {
  pub(crate) fn new(source: S, scheduler: SD) -> Self { SubscribeOnOp { source, scheduler } }
}

impl<Item, S, SD> Observable<Item> for SubscribeOnOp<S, SD>
where
  S: Observable<Item> + Send + 'static,
  SD: Scheduler,
{
  type Unsub = ZipSubscription<TaskHandle, CompositeSubscription>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let subscription = CompositeSubscription::new();
    let c_subscription = subscription.clone();
    let source = self.source;
    let handle = self
      .scheduler
      .schedule(move || c_subscription.add(source.actual_subscribe(observer)), None);
    ZipSubscription::new(handle, subscription)
  }
}
