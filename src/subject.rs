//! Subjects are both observers and observables: values pushed in are
//! multicast to every current subscriber.
//!
//! One [`Subject`] type covers every flavour; they differ only in what a late
//! subscriber receives:
//!
//! | Constructor | Late subscriber receives |
//! |-------------|--------------------------|
//! | [`Subject::publish`] | only values emitted after it subscribed |
//! | [`Subject::behavior`] | the current value, then live values |
//! | [`Subject::replay`] | up to `capacity` past values, then live values |
//! | [`Subject::async_subject`] | only the last value, once the subject completes |
//!
//! A terminated subject replays its terminal event (and, for replay and
//! async subjects, the buffered values) to every later subscriber.
//!
//! A [`Relay`] is a publish subject that can never terminate.
//!
//! # Re-entrancy
//!
//! Emitting into a subject from inside one of its own subscribers' callbacks
//! is not supported: the callback of that subscriber is still running and
//! holds its lock.

use crate::prelude::*;

mod relay;
mod state;
mod subject_subscription;
mod subscribers;

pub use relay::Relay;
pub use subject_subscription::SubjectSubscription;

pub(crate) use state::{SubjectState, Terminal};
use subscribers::{broadcast_value, SubjectObserver, Subscribers};

pub(crate) struct SubjectCore<Item> {
  subscribers: Subscribers<Item>,
  state: SubjectState<Item>,
  terminal: Option<Terminal>,
}

/// A multicasting hot observable you push values into.
///
/// Clones are handles to the same subject.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// let subject = Subject::publish();
/// subject.clone().map(|v: i32| v * 2).subscribe(|v| println!("{}", v));
/// subject.next(1);
/// subject.complete();
/// ```
pub struct Subject<Item> {
  core: MutArc<SubjectCore<Item>>,
}

impl<Item> Clone for Subject<Item> {
  fn clone(&self) -> Self { Subject { core: self.core.clone() } }
}

impl<Item: Clone + Send + 'static> Default for Subject<Item> {
  fn default() -> Self { Self::publish() }
}

impl<Item: Clone + Send + 'static> Subject<Item> {
  fn with_state(state: SubjectState<Item>) -> Self {
    Subject {
      core: MutArc::own(SubjectCore { subscribers: Subscribers::default(), state, terminal: None }),
    }
  }

  /// Subscribers receive only values emitted after they subscribed.
  pub fn publish() -> Self { Self::with_state(SubjectState::Stateless) }

  /// Holds a current value, starting with `seed`; subscribers receive it
  /// immediately.
  pub fn behavior(seed: Item) -> Self { Self::with_state(SubjectState::Seeded(seed)) }

  /// Replays up to `capacity` of the most recent values to new subscribers.
  pub fn replay(capacity: usize) -> Result<Self, RxError> {
    if capacity == 0 {
      return Err(RxError::precondition("replay capacity must be at least 1"));
    }
    Ok(Self::with_state(SubjectState::bounded(capacity)))
  }

  /// Replays everything it ever received.
  pub(crate) fn replay_all() -> Self { Self::with_state(SubjectState::bounded(usize::MAX)) }

  /// Delivers only its last value, and only once it completes. An error
  /// discards the value.
  pub fn async_subject() -> Self { Self::with_state(SubjectState::Latest(None)) }

  /// Pushes a value to every current subscriber. Ignored once terminated.
  pub fn next(&self, value: Item) {
    let observers = {
      let mut core = self.core.rc_deref_mut();
      if core.terminal.is_some() || !core.state.record(&value) {
        return;
      }
      core.subscribers.snapshot()
    };
    let finished = broadcast_value(observers, value);
    if !finished.is_empty() {
      self.core.rc_deref_mut().subscribers.remove_all(&finished);
    }
  }

  /// Terminates every subscriber with `err`. Ignored once terminated.
  pub fn error(&self, err: RxError) {
    let observers = {
      let mut core = self.core.rc_deref_mut();
      if core.terminal.is_some() {
        return;
      }
      core.state.on_error();
      core.terminal = Some(Terminal::Error(err.clone()));
      core.subscribers.drain()
    };
    tracing::trace!(error = %err, subscribers = observers.len(), "subject terminated with error");
    for mut observer in observers {
      observer.error(err.clone());
    }
  }

  /// Completes every subscriber. Ignored once terminated.
  pub fn complete(&self) {
    let (observers, last) = {
      let mut core = self.core.rc_deref_mut();
      if core.terminal.is_some() {
        return;
      }
      core.terminal = Some(Terminal::Complete);
      (core.subscribers.drain(), core.state.on_complete())
    };
    tracing::trace!(subscribers = observers.len(), "subject completed");
    for mut observer in observers {
      if let Some(last) = last.clone() {
        observer.next(last);
      }
      observer.complete();
    }
  }

  /// The value a behavior subject holds (the newest buffered value for a
  /// replay subject). `None` once terminated.
  pub fn value(&self) -> Option<Item> {
    let core = self.core.rc_deref();
    if core.terminal.is_some() { None } else { core.state.current() }
  }

  pub fn subscriber_count(&self) -> usize { self.core.rc_deref().subscribers.len() }

  pub fn is_terminated(&self) -> bool { self.core.rc_deref().terminal.is_some() }

  /// A subscribe-only handle, for exposing state without letting callers
  /// push into it.
  pub fn view(&self) -> SubjectView<Item> { SubjectView(self.clone()) }

  fn add_observer(&self, observer: BoxedObserver<Item>) -> SubjectSubscription<Item> {
    let handle: SubjectObserver<Item> = MutArc::own(Some(observer));
    // Holding the observer's lock until the replay is delivered keeps live
    // values from other threads behind the replayed ones.
    let mut guard = handle.rc_deref_mut();
    let (replay, terminal, id) = {
      let mut core = self.core.rc_deref_mut();
      let replay = core.state.replay(core.terminal.as_ref());
      let terminal = core.terminal.clone();
      let id = if terminal.is_none() { Some(core.subscribers.add(handle.clone())) } else { None };
      (replay, terminal, id)
    };
    for v in replay {
      Observer::next(&mut *guard, v);
    }
    match terminal {
      Some(Terminal::Error(err)) => Observer::error(&mut *guard, err),
      Some(Terminal::Complete) => Observer::complete(&mut *guard),
      None => {}
    }
    drop(guard);
    SubjectSubscription::new(self.core.clone(), id)
  }
}

impl<Item: Clone + Send + 'static> Observer<Item> for Subject<Item> {
  #[inline]
  fn next(&mut self, value: Item) { Subject::next(self, value) }

  #[inline]
  fn error(&mut self, err: RxError) { Subject::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subject::complete(self) }

  #[inline]
  fn is_finished(&self) -> bool { self.is_terminated() }
}

impl<Item: Clone + Send + 'static> Observable<Item> for Subject<Item> {
  type Unsub = SubjectSubscription<Item>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.add_observer(Box::new(observer))
  }
}

/// Read-only view of a [`Subject`].
pub struct SubjectView<Item>(Subject<Item>);

impl<Item> Clone for SubjectView<Item> {
  fn clone(&self) -> Self { SubjectView(self.0.clone()) }
}

impl<Item: Clone + Send + 'static> SubjectView<Item> {
  pub fn value(&self) -> Option<Item> { self.0.value() }
}

impl<Item: Clone + Send + 'static> Observable<Item> for SubjectView<Item> {
  type Unsub = SubjectSubscription<Item>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.0.actual_subscribe(observer)
  }
}
