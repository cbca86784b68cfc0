//! Operator implementations. Each operator is a struct wrapping its source,
//! paired with the observer it installs upstream; the entry points live on
//! [`ObservableExt`](crate::observable::ObservableExt).

/// Implements `error`, `complete` and `is_finished` of an observer wrapper by
/// forwarding to its downstream field.
macro_rules! forward_terminal {
  ($field:tt) => {
    #[inline]
    fn error(&mut self, err: RxError) { self.$field.error(err) }

    #[inline]
    fn complete(&mut self) { self.$field.complete() }

    #[inline]
    fn is_finished(&self) -> bool { self.$field.is_finished() }
  };
}

pub mod box_it;
pub mod buffer;
pub mod combine_latest;
pub mod concat;
pub mod delay;
pub mod distinct_until_changed;
pub mod element_at;
pub mod filter;
pub mod flat_map;
pub mod ignore_elements;
pub mod map;
pub mod materialize;
pub mod merge;
pub mod observe_on;
pub mod on_error_resume_next;
pub mod reduce;
pub mod sample;
pub mod scan;
pub mod skip;
pub mod skip_until;
pub mod skip_while;
pub mod start_with;
pub mod subscribe_on;
pub mod switch_map;
pub mod take;
pub mod take_until;
pub mod window;
pub mod with_latest_from;
pub mod zip;
