//! Type erasure for observables.

use crate::prelude::*;

/// Object-safe face of [`Observable`], subscribing through boxed observers.
pub trait BoxObservable<Item> {
  fn box_subscribe(self: Box<Self>, observer: BoxedObserver<Item>) -> BoxSubscription;
}

impl<Item, T> BoxObservable<Item> for T
where
  T: Observable<Item>,
  Item: 'static,
{
  fn box_subscribe(self: Box<Self>, observer: BoxedObserver<Item>) -> BoxSubscription {
    Box::new((*self).actual_subscribe(observer))
  }
}

/// An observable of `Item` with its concrete type erased, so observables of
/// different shapes can be stored together or returned from one function.
pub struct BoxOp<Item>(Box<dyn BoxObservable<Item> + Send>);

impl<Item> BoxOp<Item> {
  pub(crate) fn new<S>(source: S) -> Self
  where
    S: Observable<Item> + Send + 'static,
    Item: 'static,
  {
    BoxOp(Box::new(source))
  }
}

impl<Item: 'static> Observable<Item> for BoxOp<Item> {
  type Unsub = BoxSubscription;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self.0.box_subscribe(Box::new(observer))
  }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  fn numbers(even: bool) -> BoxOp<i32> {
    if even {
      observable::from_iter(0..3).map(|v| v * 2).box_it()
    } else {
      observable::of(1).box_it()
    }
  }

  #[test]
  fn erases_the_concrete_type() {
    let values = Arc::new(Mutex::new(vec![]));
    let (c1, c2) = (values.clone(), values.clone());
    numbers(true).subscribe(move |v| c1.lock().unwrap().push(v));
    numbers(false).subscribe(move |v| c2.lock().unwrap().push(v));
    assert_eq!(*values.lock().unwrap(), vec![0, 2, 4, 1]);
  }

  #[test]
  fn boxed_subject_unsubscribes() {
    let subject = Subject::publish();
    let mut subscription = subject.clone().box_it().subscribe(|_: i32| {});
    assert_eq!(subject.subscriber_count(), 1);
    subscription.unsubscribe();
    assert_eq!(subject.subscriber_count(), 0);
  }
}
