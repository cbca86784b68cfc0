//! Error taxonomy carried on the error channel of every stream.
use std::fmt::Display;

use thiserror::Error;

/// The single error type flowing through `Observer::error`.
///
/// It is `Clone` because subjects replay a terminal error to every late
/// subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RxError {
  /// An error produced by a source, or pushed into a subject by user code.
  #[error("upstream error: {0}")]
  Upstream(String),
  /// A user-supplied callback of an operator failed.
  #[error("operator error: {0}")]
  Operator(String),
  /// An operator or constructor was used with arguments it cannot honour.
  #[error("precondition violation: {0}")]
  PreconditionViolation(String),
  /// A scheduler could not be created or could not accept work.
  #[error("scheduler unavailable: {0}")]
  SchedulerUnavailable(String),
}

impl RxError {
  pub fn upstream(msg: impl Display) -> Self { RxError::Upstream(msg.to_string()) }

  pub fn operator(msg: impl Display) -> Self { RxError::Operator(msg.to_string()) }

  pub fn precondition(msg: impl Display) -> Self {
    RxError::PreconditionViolation(msg.to_string())
  }

  pub fn scheduler(msg: impl Display) -> Self { RxError::SchedulerUnavailable(msg.to_string()) }

  pub fn is_upstream(&self) -> bool { matches!(self, RxError::Upstream(_)) }

  pub fn is_operator(&self) -> bool { matches!(self, RxError::Operator(_)) }

  pub fn is_precondition(&self) -> bool { matches!(self, RxError::PreconditionViolation(_)) }
}

pub type RxResult<T> = Result<T, RxError>;

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn display_names_the_kind() {
    assert_eq!(RxError::upstream("boom").to_string(), "upstream error: boom");
    assert_eq!(RxError::operator(42).to_string(), "operator error: 42");
    assert_eq!(
      RxError::precondition("capacity must be positive").to_string(),
      "precondition violation: capacity must be positive"
    );
  }

  #[test]
  fn kind_predicates() {
    assert!(RxError::upstream("x").is_upstream());
    assert!(RxError::operator("x").is_operator());
    assert!(RxError::precondition("x").is_precondition());
    assert!(!RxError::scheduler("x").is_upstream());
  }
}
