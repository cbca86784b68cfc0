//! # rxcore: a reactive-streams engine
//!
//! Push-based event pipelines with typed subjects, composable operators,
//! explicit subscription lifetimes and scheduler-aware timing.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxcore::prelude::*;
//!
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A producer; operators live on [`ObservableExt`] |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subject`] | Both at once: a hot, multicasting producer you push into |
//! | [`SubscriptionLike`] | Handle to cancel an active subscription |
//! | [`Scheduler`] | Where and when deferred or periodic work runs |
//!
//! Every stream follows the same grammar: any number of values, then at most
//! one terminal event (`error` or `complete`). Nothing is delivered after the
//! terminal event, and the subscription releases its upstream resources as
//! soon as it is reached.
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `ThreadPoolScheduler`, backed by a
//!   futures thread pool
//! - **`tokio-scheduler`**: `TokioScheduler`, running work on a tokio runtime
//!
//! [`Observable`]: observable::Observable
//! [`ObservableExt`]: observable::ObservableExt
//! [`Observer`]: observer::Observer
//! [`Subject`]: subject::Subject
//! [`SubscriptionLike`]: subscription::SubscriptionLike
//! [`Scheduler`]: scheduler::Scheduler

pub mod error;
pub mod notification;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;
mod type_hint;

// Re-export the prelude module
pub use prelude::*;
