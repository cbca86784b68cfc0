use crate::prelude::*;

/// A reified stream event, produced by `materialize` and consumed by
/// `dematerialize`.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<Item> {
  Next(Item),
  Error(RxError),
  Complete,
}

impl<Item> Notification<Item> {
  #[inline]
  pub fn is_next(&self) -> bool { matches!(self, Notification::Next(_)) }

  #[inline]
  pub fn is_error(&self) -> bool { matches!(self, Notification::Error(_)) }

  #[inline]
  pub fn is_complete(&self) -> bool { matches!(self, Notification::Complete) }

  /// `Error` and `Complete` end a stream.
  #[inline]
  pub fn is_terminal(&self) -> bool { !self.is_next() }

  pub fn value(&self) -> Option<&Item> {
    match self {
      Notification::Next(v) => Some(v),
      _ => None,
    }
  }

  pub fn into_value(self) -> Option<Item> {
    match self {
      Notification::Next(v) => Some(v),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&RxError> {
    match self {
      Notification::Error(e) => Some(e),
      _ => None,
    }
  }

  /// Delivers this event to `observer`.
  pub fn accept<O>(self, observer: &mut O)
  where
    O: Observer<Item> + ?Sized,
  {
    match self {
      Notification::Next(v) => observer.next(v),
      Notification::Error(e) => observer.error(e),
      Notification::Complete => observer.complete(),
    }
  }
}
