use crate::prelude::*;

#[derive(Clone)]
pub struct ElementAtOp<S> {
  source: S,
  index: usize,
}

impl<S> ElementAtOp<S> {
  pub(crate) fn new(source: S, index: usize) -> Self { ElementAtOp { source, index } }
}

impl<Item, S> Observable<Item> for ElementAtOp<S>
where
  S: Observable<Item>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    self
      .source
      .actual_subscribe(ElementAtObserver { observer: Some(observer), remaining: self.index })
  }
}

pub struct ElementAtObserver<O> {
  observer: Option<O>,
  remaining: usize,
}

impl<Item, O> Observer<Item> for ElementAtObserver<O>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    if self.remaining > 0 {
      self.remaining -= 1;
      return;
    }
    if let Some(mut observer) = self.observer.take() {
      observer.next(value);
      observer.complete();
    }
  }

  forward_terminal!(observer);
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn picks_index() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    observable::from_iter(10..20)
      .element_at(3)
      .subscribe(move |v| c_values.lock().unwrap().push(v));
    assert_eq!(*values.lock().unwrap(), vec![13]);
  }

  #[test]
  fn short_source_completes_empty() {
    let completed = Arc::new(Mutex::new(false));
    let c_completed = completed.clone();
    observable::from_iter(0..2)
      .element_at(5)
      .subscribe_complete(|_| unreachable!(), move || *c_completed.lock().unwrap() = true);
    assert!(*completed.lock().unwrap());
  }
}
