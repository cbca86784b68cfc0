//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Observable core, its operator extension and the source constructors
pub use crate::observable::{
  self, ConnectableObservable, Emitter, Observable, ObservableExt, SingleEmitter,
};
// Observer trait
pub use crate::observer::{BoxedObserver, Observer, ObserverAll};
// Operators
pub use crate::ops::{
  box_it::BoxOp,
  buffer::BufferOp,
  combine_latest::{CombineLatestAll, CombineLatestOp, TryCombineLatestOp},
  concat::Concat,
  delay::DelayOp,
  distinct_until_changed::{DistinctUntilChangedOp, TryDistinctUntilChangedOp},
  element_at::ElementAtOp,
  filter::{FilterOp, TryFilterOp},
  flat_map::FlatMapOp,
  ignore_elements::IgnoreElementsOp,
  map::{MapOp, TryMapOp},
  materialize::{DematerializeOp, MaterializeOp},
  merge::{Merge, MergeOp},
  observe_on::ObserveOnOp,
  on_error_resume_next::OnErrorResumeNextOp,
  reduce::{ReduceOp, TryReduceOp},
  sample::SampleOp,
  scan::{ScanOp, TryScanOp},
  skip::SkipOp,
  skip_until::SkipUntilOp,
  skip_while::{SkipWhileOp, TrySkipWhileOp},
  start_with::StartWithOp,
  subscribe_on::SubscribeOnOp,
  switch_map::SwitchMapOp,
  take::TakeOp,
  take_until::TakeUntilOp,
  window::{Window, WindowOp},
  with_latest_from::WithLatestFromOp,
  zip::{ZipAll, ZipOp},
};
// Shared state
pub use crate::rc::{MutArc, RcDeref, RcDerefMut};
// Schedulers
#[cfg(all(feature = "futures-scheduler", not(target_arch = "wasm32")))]
pub use crate::scheduler::{ThreadPoolScheduler, ThreadPoolSchedulerBuilder};
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioScheduler;
pub use crate::scheduler::{
  Duration, ImmediateScheduler, Scheduler, Task, TaskHandle, TaskState, TestScheduler,
};
// Subject
pub use crate::subject::{Relay, Subject, SubjectSubscription, SubjectView};
// Subscription
pub use crate::subscription::{
  BoxSubscription, ClosureSubscription, CompositeSubscription, SerialSubscription,
  SubscriptionGuard, SubscriptionLike, SubscriptionWrapper, ZipSubscription,
};
pub use crate::{
  error::{RxError, RxResult},
  notification::Notification,
  subscriber::Subscriber,
};
