//! ConnectableObservable implementation for multicasting.
//!
//! `ConnectableObservable` acts as a bridge between a source `Observable` and a
//! `Subject`. It allows multicasting a single source execution to multiple
//! subscribers.
//!
//! - **Not an Observable**: It does not emit upon subscription.
//! - **Connect**: `connect()` must be called to start the source execution.
//! - **Fork**: `fork()` creates the observable handed to subscribers.
//! - **Disconnect**: disposing the connection completes the subject, so
//!   current forks complete and later forks complete on subscription.
//!
//! ```rust
//! use rxcore::prelude::*;
//!
//! let connectable = observable::from_iter(1..=3).replay(2).unwrap();
//! connectable.fork().subscribe(|v| println!("early {}", v));
//! let late = connectable.fork();
//! connectable.connect();
//! // Receives 2 and 3 even though the source already completed.
//! late.subscribe(|v| println!("late {}", v));
//! ```

use crate::prelude::*;

/// Pairs a source with the subject its single execution is multicast
/// through.
#[derive(Clone)]
pub struct ConnectableObservable<S, Item> {
  source: S,
  subject: Subject<Item>,
}

impl<S, Item> ConnectableObservable<S, Item>
where
  Item: Clone + Send + 'static,
{
  pub fn new(source: S, subject: Subject<Item>) -> Self { ConnectableObservable { source, subject } }

  /// An observable sharing the future connection.
  pub fn fork(&self) -> SubjectView<Item> { self.subject.view() }

  /// Subscribes the subject to the source, starting emission for every fork.
  ///
  /// Unsubscribing the returned handle ends the connection for good: the
  /// subject completes unless the source already terminated it.
  pub fn connect(self) -> SubscriptionWrapper<CompositeSubscription>
  where
    S: Observable<Item>,
  {
    let subject = self.subject.clone();
    let connection = self.source.subscribe_with(self.subject);
    connection.0.add(ClosureSubscription::new(move || {
      tracing::debug!("connectable disconnected");
      subject.complete();
    }));
    connection
  }
}
