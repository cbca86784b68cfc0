use smallvec::SmallVec;

use crate::prelude::*;

/// A registered observer. The mutex serializes the calls one subscriber
/// receives when several threads emit into the same subject.
pub(crate) type SubjectObserver<Item> = MutArc<Option<BoxedObserver<Item>>>;

/// Subscribers of a subject in subscription order, addressed by id.
pub(crate) struct Subscribers<Item> {
  observers: SmallVec<[(usize, SubjectObserver<Item>); 2]>,
  next_id: usize,
}

impl<Item> Default for Subscribers<Item> {
  fn default() -> Self { Subscribers { observers: SmallVec::new(), next_id: 0 } }
}

impl<Item> Subscribers<Item> {
  pub(crate) fn add(&mut self, observer: SubjectObserver<Item>) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.observers.push((id, observer));
    id
  }

  pub(crate) fn remove(&mut self, id: usize) -> Option<SubjectObserver<Item>> {
    let idx = self.observers.iter().position(|(i, _)| *i == id)?;
    Some(self.observers.remove(idx).1)
  }

  pub(crate) fn remove_all(&mut self, ids: &[usize]) {
    self.observers.retain(|(id, _)| !ids.contains(id));
  }

  #[inline]
  pub(crate) fn contains(&self, id: usize) -> bool { self.observers.iter().any(|(i, _)| *i == id) }

  #[inline]
  pub(crate) fn len(&self) -> usize { self.observers.len() }

  /// The observers as of now. Emission iterates a snapshot so subscribing or
  /// unsubscribing from a callback never invalidates an ongoing broadcast.
  pub(crate) fn snapshot(&self) -> Vec<(usize, SubjectObserver<Item>)> {
    self.observers.iter().cloned().collect()
  }

  /// Removes every observer, for terminal delivery.
  pub(crate) fn drain(&mut self) -> Vec<SubjectObserver<Item>> {
    self.observers.drain(..).map(|(_, o)| o).collect()
  }
}

/// Sends `value` to every observer: all but the last get a clone, the last
/// gets the value itself. Returns the ids of observers that finished.
pub(crate) fn broadcast_value<Item: Clone>(
  observers: Vec<(usize, SubjectObserver<Item>)>, value: Item,
) -> Vec<usize> {
  let mut finished = vec![];
  let mut iter = observers.into_iter().peekable();
  while let Some((id, mut observer)) = iter.next() {
    if iter.peek().is_some() {
      observer.next(value.clone());
    } else {
      observer.next(value);
      if Observer::<Item>::is_finished(&observer) {
        finished.push(id);
      }
      break;
    }
    if Observer::<Item>::is_finished(&observer) {
      finished.push(id);
    }
  }
  finished
}
