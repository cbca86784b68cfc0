use crate::{ops::delay::DelayObserver, prelude::*};

#[derive(Clone)]
pub struct ObserveOnOp<S, SD> {
  source: S,
  scheduler: SD,
}

impl<S, SD> ObserveOnOp<S, SD> {
  pub(crate) fn new(source: S, scheduler: SD) -> Self { ObserveOnOp { source, scheduler } }
}

impl<Item, S, SD> Observable<Item> for ObserveOnOp<S, SD>
where
  S: Observable<Item>,
  SD: Scheduler,
  Item: Send + 'static,
{
  type Unsub = ZipSubscription<S::Unsub, CompositeSubscription>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let observer = DelayObserver::new(observer, self.scheduler, None);
    let tasks = observer.tasks.clone();
    ZipSubscription::new(self.source.actual_subscribe(observer), tasks)
  }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn delivers_on_scheduler_turn() {
    TestScheduler::init();
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    observable::from_iter(0..3)
      .observe_on(TestScheduler)
      .subscribe(move |v| c_values.lock().unwrap().push(v));
    assert!(values.lock().unwrap().is_empty());
    TestScheduler::flush();
    assert_eq!(*values.lock().unwrap(), vec![0, 1, 2]);
  }

  #[cfg(all(feature = "futures-scheduler", not(target_arch = "wasm32")))]
  #[test]
  fn switches_thread() {
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel();
    let caller = std::thread::current().id();
    let scheduler = ThreadPoolScheduler::builder().pool_size(1).build().unwrap();
    observable::from_iter(0..4).observe_on(scheduler).subscribe_complete(
      {
        let tx = tx.clone();
        move |v| tx.send(Some((v, std::thread::current().id()))).unwrap()
      },
      move || tx.send(None).unwrap(),
    );

    let received: Vec<_> = rx.iter().take_while(Option::is_some).flatten().collect();
    assert_eq!(received.iter().map(|(v, _)| *v).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert!(received.iter().all(|(_, thread)| *thread != caller));
  }
}
