use crate::prelude::*;

use super::SubjectSubscription;

/// A publish subject that only accepts values: it can be neither completed
/// nor failed, so subscribers never see a terminal event from it.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// let relay = Relay::new();
/// relay.clone().subscribe(|v: &str| println!("{}", v));
/// relay.accept("click");
/// ```
pub struct Relay<Item>(Subject<Item>);

impl<Item> Clone for Relay<Item> {
  fn clone(&self) -> Self { Relay(self.0.clone()) }
}

impl<Item: Clone + Send + 'static> Default for Relay<Item> {
  fn default() -> Self { Self::new() }
}

impl<Item: Clone + Send + 'static> Relay<Item> {
  pub fn new() -> Self { Relay(Subject::publish()) }

  /// Pushes a value to every current subscriber.
  #[inline]
  pub fn accept(&self, value: Item) { self.0.next(value) }

  pub fn subscriber_count(&self) -> usize { self.0.subscriber_count() }
}

impl<Item: Clone + Send + 'static> Observable<Item> for Relay<Item> {
  type Unsub = SubjectSubscription<Item>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.0.actual_subscribe(observer)
  }
}
