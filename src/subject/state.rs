use std::collections::VecDeque;

use crate::prelude::*;

/// How a subject treats values for subscribers that arrive later.
pub(crate) enum SubjectState<Item> {
  /// Publish and relay: nothing is remembered.
  Stateless,
  /// Behavior: the current value, replaced on every `next`.
  Seeded(Item),
  /// Replay: a ring of the last `capacity` values.
  Bounded { buffer: VecDeque<Item>, capacity: usize },
  /// Async: the last value, delivered to everyone only on completion.
  Latest(Option<Item>),
}

/// How a subject ended.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Terminal {
  Error(RxError),
  Complete,
}

impl<Item: Clone> SubjectState<Item> {
  pub(crate) fn bounded(capacity: usize) -> Self {
    SubjectState::Bounded { buffer: VecDeque::with_capacity(capacity.min(64)), capacity }
  }

  /// Records a value; returns whether it is delivered to live subscribers
  /// right away.
  pub(crate) fn record(&mut self, value: &Item) -> bool {
    match self {
      SubjectState::Stateless => true,
      SubjectState::Seeded(current) => {
        *current = value.clone();
        true
      }
      SubjectState::Bounded { buffer, capacity } => {
        if buffer.len() == *capacity {
          buffer.pop_front();
        }
        buffer.push_back(value.clone());
        true
      }
      SubjectState::Latest(last) => {
        *last = Some(value.clone());
        false
      }
    }
  }

  /// Values a new subscriber receives before any live value, given how the
  /// subject ended so far.
  pub(crate) fn replay(&self, terminal: Option<&Terminal>) -> Vec<Item> {
    match (self, terminal) {
      (SubjectState::Seeded(current), None) => vec![current.clone()],
      (SubjectState::Bounded { buffer, .. }, _) => buffer.iter().cloned().collect(),
      (SubjectState::Latest(Some(last)), Some(Terminal::Complete)) => vec![last.clone()],
      _ => vec![],
    }
  }

  /// Value released to live subscribers when the subject completes.
  pub(crate) fn on_complete(&self) -> Option<Item> {
    match self {
      SubjectState::Latest(last) => last.clone(),
      _ => None,
    }
  }

  /// An async subject that fails never delivers its value.
  pub(crate) fn on_error(&mut self) {
    if let SubjectState::Latest(last) = self {
      last.take();
    }
  }

  pub(crate) fn current(&self) -> Option<Item> {
    match self {
      SubjectState::Seeded(current) => Some(current.clone()),
      SubjectState::Bounded { buffer, .. } => buffer.back().cloned(),
      SubjectState::Latest(last) => last.clone(),
      SubjectState::Stateless => None,
    }
  }
}
