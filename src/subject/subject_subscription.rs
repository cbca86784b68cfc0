use crate::prelude::*;

use super::SubjectCore;

/// Removes one observer from its subject when unsubscribed.
pub struct SubjectSubscription<Item> {
  core: MutArc<SubjectCore<Item>>,
  id: Option<usize>,
}

impl<Item> SubjectSubscription<Item> {
  pub(crate) fn new(core: MutArc<SubjectCore<Item>>, id: Option<usize>) -> Self {
    SubjectSubscription { core, id }
  }
}

impl<Item> SubscriptionLike for SubjectSubscription<Item> {
  fn unsubscribe(&mut self) {
    if let Some(id) = self.id.take() {
      // Dropped outside the lock: the observer may own subscriptions that
      // reach back into this subject.
      let removed = self.core.rc_deref_mut().subscribers.remove(id);
      drop(removed);
    }
  }

  fn is_closed(&self) -> bool {
    self.id.map_or(true, |id| !self.core.rc_deref().subscribers.contains(id))
  }
}
