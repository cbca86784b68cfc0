use crate::prelude::*;

/// Creates an observable which will fire at `period` time into the future,
/// and will repeat every `period` interval after. Values count up from 0.
pub fn interval<SD>(period: Duration, scheduler: SD) -> Interval<SD> {
  Interval { period, delay: None, scheduler }
}

/// Like [`interval`], but the first value fires after `delay`.
pub fn interval_at<SD>(delay: Duration, period: Duration, scheduler: SD) -> Interval<SD> {
  Interval { period, delay: Some(delay), scheduler }
}

/// Emits `0` after `delay`, then completes.
pub fn timer<SD>(delay: Duration, scheduler: SD) -> Timer<SD> { Timer { delay, scheduler } }

#[derive(Clone)]
pub struct Interval<SD> {
  period: Duration,
  delay: Option<Duration>,
  scheduler: SD,
}

#[derive(Clone)]
pub struct Timer<SD> {
  delay: Duration,
  scheduler: SD,
}

impl<SD: Scheduler> Observable<usize> for Interval<SD> {
  type Unsub = TaskHandle;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<usize> + Send + 'static,
  {
    let Self { period, delay, scheduler } = self;
    let mut seq = 0;
    let task = Task::new(move || {
      if observer.is_finished() {
        return TaskState::Finished;
      }
      observer.next(seq);
      seq += 1;
      TaskState::Sleeping(period)
    });
    scheduler.schedule_task(task, Some(delay.unwrap_or(period)))
  }
}

impl<SD: Scheduler> Observable<usize> for Timer<SD> {
  type Unsub = TaskHandle;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<usize> + Send + 'static,
  {
    self.scheduler.schedule(
      move || {
        observer.next(0);
        observer.complete();
      },
      Some(self.delay),
    )
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{mpsc, Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn ticks_every_period() {
    TestScheduler::init();
    let ticks = Arc::new(Mutex::new(vec![]));
    let c_ticks = ticks.clone();
    let mut subscription = observable::interval(Duration::from_millis(10), TestScheduler)
      .subscribe(move |v| c_ticks.lock().unwrap().push(v));

    TestScheduler::advance_by(Duration::from_millis(9));
    assert!(ticks.lock().unwrap().is_empty());
    TestScheduler::advance_by(Duration::from_millis(31));
    assert_eq!(*ticks.lock().unwrap(), vec![0, 1, 2, 3]);

    subscription.unsubscribe();
    TestScheduler::advance_by(Duration::from_millis(100));
    assert_eq!(ticks.lock().unwrap().len(), 4);
  }

  #[test]
  fn take_stops_the_timer() {
    TestScheduler::init();
    let ticks = Arc::new(Mutex::new(vec![]));
    let c_ticks = ticks.clone();
    observable::interval(Duration::from_millis(1), TestScheduler)
      .take(5)
      .subscribe(move |v| c_ticks.lock().unwrap().push(v));

    TestScheduler::flush();
    assert_eq!(*ticks.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    assert!(TestScheduler::is_empty());
  }

  #[test]
  fn interval_at_first_delay() {
    TestScheduler::init();
    let ticks = Arc::new(Mutex::new(vec![]));
    let c_ticks = ticks.clone();
    observable::interval_at(Duration::from_millis(50), Duration::from_millis(10), TestScheduler)
      .take(2)
      .subscribe(move |_| c_ticks.lock().unwrap().push(TestScheduler::now()));

    TestScheduler::flush();
    assert_eq!(
      *ticks.lock().unwrap(),
      vec![Duration::from_millis(50), Duration::from_millis(60)]
    );
  }

  #[test]
  fn timer_fires_once() {
    TestScheduler::init();
    let log = Arc::new(Mutex::new(vec![]));
    let (c_next, c_complete) = (log.clone(), log.clone());
    observable::timer(Duration::from_secs(1), TestScheduler).subscribe_complete(
      move |v| c_next.lock().unwrap().push(format!("{v}")),
      move || c_complete.lock().unwrap().push("done".to_string()),
    );

    TestScheduler::advance_by(Duration::from_millis(999));
    assert!(log.lock().unwrap().is_empty());
    TestScheduler::advance_by(Duration::from_millis(1));
    assert_eq!(*log.lock().unwrap(), vec!["0", "done"]);
  }

  #[cfg(all(feature = "futures-scheduler", not(target_arch = "wasm32")))]
  #[test]
  fn thread_pool_interval() {
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    observable::interval(Duration::from_millis(1), ThreadPoolScheduler::default())
      .take(5)
      .subscribe_complete(|_| {}, move || tx.lock().unwrap().send(()).unwrap());
    assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
  }
}
