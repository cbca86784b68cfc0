//! The producer side: the [`Observable`] trait, its operator extension
//! [`ObservableExt`], and the source constructors.
//!
//! ```rust
//! use rxcore::prelude::*;
//!
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```

use std::fmt::Display;

use crate::{
  observer::{log_unhandled_error, noop},
  ops::{
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
    window::WindowOp,
    with_latest_from::WithLatestFromOp,
    zip::{pair, ZipAll, ZipOp},
  },
  prelude::*,
};

mod connectable;
mod create;
mod defer;
mod from_iter;
mod interval;
mod of;
mod trivial;

pub use connectable::ConnectableObservable;
pub use create::{create, create_single, Create, CreateSingle, Emitter, SingleEmitter};
pub use defer::{defer, Defer};
pub use from_iter::{from_iter, just, range, FromIter};
pub use interval::{interval, interval_at, timer, Interval, Timer};
pub use of::{of, ObservableOf};
pub use trivial::{empty, never, throw_err, Empty, Never, ThrowErr};

/// A producer of `Item`s.
///
/// `actual_subscribe` consumes the observable and starts its execution for
/// one observer; what it returns disposes that execution. Sources are cold:
/// clone an observable to run it again for another subscriber.
pub trait Observable<Item>: Sized {
  type Unsub: SubscriptionLike + Send + 'static;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static;
}

/// Merges `sources` into one stream that completes when all of them have
/// completed.
pub fn merge<S, I>(sources: I) -> Merge<S>
where
  I: IntoIterator<Item = S>,
{
  Merge::new(sources.into_iter().collect())
}

/// Subscribes to `sources` one after another, each once the previous one
/// completed.
pub fn concat<S, I>(sources: I) -> Concat<S>
where
  I: IntoIterator<Item = S>,
{
  Concat::new(sources.into_iter().collect())
}

/// Zips `sources` into `Vec`s holding the n-th value of every source, in
/// source order. Completes once any source completed with nothing left to
/// pair; no sources means immediate completion.
pub fn zip_all<S, Item, I>(sources: I) -> ZipAll<S, Item>
where
  I: IntoIterator<Item = S>,
  S: Observable<Item>,
{
  ZipAll::new(sources.into_iter().collect())
}

/// Once every source emitted, emits a `Vec` of their latest values whenever
/// any of them emits.
pub fn combine_latest_all<S, Item, I>(sources: I) -> CombineLatestAll<S, Item>
where
  I: IntoIterator<Item = S>,
  S: Observable<Item>,
{
  CombineLatestAll::new(sources.into_iter().collect())
}

/// Operators and subscription entry points, available on every
/// [`Observable`].
pub trait ObservableExt<Item>: Observable<Item> {
  /// Transforms each value with `f`.
  #[inline]
  fn map<B, F>(self, f: F) -> MapOp<Self, F, Item>
  where
    F: FnMut(Item) -> B,
  {
    MapOp::new(self, f)
  }

  /// Like `map`, but `f` may fail. The first `Err` is delivered downstream as
  /// [`RxError::Operator`] and ends the stream.
  #[inline]
  fn try_map<B, E, F>(self, f: F) -> TryMapOp<Self, F, Item>
  where
    F: FnMut(Item) -> Result<B, E>,
    E: Display,
  {
    TryMapOp::new(self, f)
  }

  /// Emits only the values `filter` accepts.
  #[inline]
  fn filter<F>(self, filter: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    FilterOp::new(self, filter)
  }

  /// Like `filter`, but the predicate may fail with an operator error.
  #[inline]
  fn try_filter<E, F>(self, filter: F) -> TryFilterOp<Self, F>
  where
    F: FnMut(&Item) -> Result<bool, E>,
    E: Display,
  {
    TryFilterOp::new(self, filter)
  }

  /// Drops the first `count` values.
  #[inline]
  fn skip(self, count: usize) -> SkipOp<Self> { SkipOp::new(self, count) }

  /// Emits the first `count` values, then completes.
  #[inline]
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp::new(self, count) }

  /// Drops values while `predicate` holds. Once it fails the gate stays open
  /// for the rest of the stream.
  #[inline]
  fn skip_while<F>(self, predicate: F) -> SkipWhileOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    SkipWhileOp::new(self, predicate)
  }

  /// Like `skip_while`, but `predicate` may fail, ending the stream with
  /// [`RxError::Operator`]. It is not consulted once the gate opened.
  #[inline]
  fn try_skip_while<E, F>(self, predicate: F) -> TrySkipWhileOp<Self, F>
  where
    F: FnMut(&Item) -> Result<bool, E>,
    E: Display,
  {
    TrySkipWhileOp::new(self, predicate)
  }

  /// Mirrors the source until `notifier` emits its first value, then
  /// completes.
  #[inline]
  fn take_until<N, NotifyItem>(self, notifier: N) -> TakeUntilOp<Self, N, NotifyItem>
  where
    N: Observable<NotifyItem>,
  {
    TakeUntilOp::new(self, notifier)
  }

  /// Drops source values until `notifier` emits its first value.
  #[inline]
  fn skip_until<N, NotifyItem>(self, notifier: N) -> SkipUntilOp<Self, N, NotifyItem>
  where
    N: Observable<NotifyItem>,
  {
    SkipUntilOp::new(self, notifier)
  }

  /// Drops values equal to the last emitted one.
  #[inline]
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self, fn(&Item, &Item) -> bool>
  where
    Item: PartialEq,
  {
    fn partial_eq<Item: PartialEq>(a: &Item, b: &Item) -> bool { a == b }
    DistinctUntilChangedOp::new(self, partial_eq::<Item> as fn(&Item, &Item) -> bool)
  }

  /// Drops values `eq` considers equal to the last emitted one.
  #[inline]
  fn distinct_until_changed_by<F>(self, eq: F) -> DistinctUntilChangedOp<Self, F>
  where
    F: FnMut(&Item, &Item) -> bool,
  {
    DistinctUntilChangedOp::new(self, eq)
  }

  /// `distinct_until_changed_by` whose comparison may fail, ending the
  /// stream with [`RxError::Operator`].
  #[inline]
  fn try_distinct_until_changed_by<E, F>(self, eq: F) -> TryDistinctUntilChangedOp<Self, F>
  where
    F: FnMut(&Item, &Item) -> Result<bool, E>,
    E: Display,
  {
    TryDistinctUntilChangedOp::new(self, eq)
  }

  /// Emits only the value at `index` (zero based), then completes. Completes
  /// without a value if the source is shorter.
  #[inline]
  fn element_at(self, index: usize) -> ElementAtOp<Self> { ElementAtOp::new(self, index) }

  /// Drops every value and mirrors only the terminal event.
  #[inline]
  fn ignore_elements(self) -> IgnoreElementsOp<Self> { IgnoreElementsOp::new(self) }

  /// Emits `values` before the source's own values.
  #[inline]
  fn start_with<I>(self, values: I) -> StartWithOp<Self, Item>
  where
    I: IntoIterator<Item = Item>,
  {
    StartWithOp::new(self, values.into_iter().collect())
  }

  /// Collects values into `Vec`s, flushed when `max_count` values are
  /// buffered or `timespan` elapsed since the last flush, whichever comes
  /// first. Either flush restarts the timer. A timer flush emits even an
  /// empty `Vec`.
  #[inline]
  fn buffer<SD>(self, timespan: Duration, max_count: usize, scheduler: SD) -> BufferOp<Self, SD>
  where
    SD: Scheduler,
  {
    BufferOp::new(self, timespan, max_count, scheduler)
  }

  /// Like `buffer`, but emits each group as a nested observable as soon as
  /// it opens.
  #[inline]
  fn window<SD>(self, timespan: Duration, max_count: usize, scheduler: SD) -> WindowOp<Self, SD>
  where
    SD: Scheduler,
  {
    WindowOp::new(self, timespan, max_count, scheduler)
  }

  /// Shifts every event, terminal ones included, later by `delay`.
  #[inline]
  fn delay<SD>(self, delay: Duration, scheduler: SD) -> DelayOp<Self, SD>
  where
    SD: Scheduler,
  {
    DelayOp::new(self, delay, scheduler)
  }

  /// Re-emits every event on `scheduler`, in order.
  #[inline]
  fn observe_on<SD>(self, scheduler: SD) -> ObserveOnOp<Self, SD>
  where
    SD: Scheduler,
  {
    ObserveOnOp::new(self, scheduler)
  }

  /// Performs the subscription to the source on `scheduler`.
  #[inline]
  fn subscribe_on<SD>(self, scheduler: SD) -> SubscribeOnOp<Self, SD>
  where
    SD: Scheduler,
  {
    SubscribeOnOp::new(self, scheduler)
  }

  /// Interleaves the values of both sources; completes when both completed.
  #[inline]
  fn merge<S>(self, other: S) -> MergeOp<Self, S>
  where
    S: Observable<Item>,
  {
    MergeOp::new(self, other)
  }

  /// Emits all of `self`, then all of `other`.
  #[inline]
  fn concat_with(self, other: Self) -> Concat<Self> { Concat::new(vec![self, other]) }

  /// Maps each value to an inner observable and merges all of them.
  #[inline]
  fn flat_map<S, F>(self, f: F) -> FlatMapOp<Self, F, Item>
  where
    F: FnMut(Item) -> S,
  {
    FlatMapOp::new(self, f)
  }

  /// Maps each value to an inner observable, mirroring only the most recent
  /// one.
  #[inline]
  fn switch_map<S, F>(self, f: F) -> SwitchMapOp<Self, F, Item>
  where
    F: FnMut(Item) -> S,
  {
    SwitchMapOp::new(self, f)
  }

  /// Once both sources emitted, emits `f(latest_a, latest_b)` whenever
  /// either emits.
  #[inline]
  fn combine_latest<S, ItemB, Out, F>(self, other: S, f: F) -> CombineLatestOp<Self, S, F, Item, ItemB>
  where
    S: Observable<ItemB>,
    F: FnMut(Item, ItemB) -> Out,
  {
    CombineLatestOp::new(self, other, f)
  }

  /// Like `combine_latest`, but `f` may fail. The first `Err` is delivered
  /// as [`RxError::Operator`] and ends the stream.
  #[inline]
  fn try_combine_latest<S, ItemB, Out, E, F>(
    self,
    other: S,
    f: F,
  ) -> TryCombineLatestOp<Self, S, F, Item, ItemB, Out, E>
  where
    S: Observable<ItemB>,
    F: FnMut(Item, ItemB) -> Result<Out, E>,
    E: Display,
  {
    TryMapOp::new(
      CombineLatestOp::new(self, other, f),
      std::convert::identity::<Result<Out, E>> as fn(Result<Out, E>) -> Result<Out, E>,
    )
  }

  /// Pairs the n-th value of each source.
  #[inline]
  fn zip<S, ItemB>(self, other: S) -> ZipOp<Self, S, fn(Item, ItemB) -> (Item, ItemB), Item, ItemB>
  where
    S: Observable<ItemB>,
  {
    ZipOp::new(self, other, pair::<Item, ItemB> as fn(Item, ItemB) -> (Item, ItemB))
  }

  /// Combines the n-th value of each source with `f`.
  #[inline]
  fn zip_with<S, ItemB, Out, F>(self, other: S, f: F) -> ZipOp<Self, S, F, Item, ItemB>
  where
    S: Observable<ItemB>,
    F: FnMut(Item, ItemB) -> Out,
  {
    ZipOp::new(self, other, f)
  }

  /// Pairs each value with the latest value of `other`. Only `self` drives
  /// emission; nothing is emitted before `other` produced a value.
  #[inline]
  fn with_latest_from<S, ItemB>(self, other: S) -> WithLatestFromOp<Self, S>
  where
    S: Observable<ItemB>,
  {
    WithLatestFromOp::new(self, other)
  }

  /// Emits the most recent unreported source value whenever `sampler`
  /// emits.
  #[inline]
  fn sample<N, NotifyItem>(self, sampler: N) -> SampleOp<Self, N, NotifyItem>
  where
    N: Observable<NotifyItem>,
  {
    SampleOp::new(self, sampler)
  }

  /// Emits every intermediate accumulation.
  #[inline]
  fn scan<Acc, F>(self, seed: Acc, f: F) -> ScanOp<Self, F, Acc, Item>
  where
    F: FnMut(Acc, Item) -> Acc,
  {
    ScanOp::new(self, seed, f)
  }

  /// `scan` whose accumulator may fail; the first `Err` ends the stream with
  /// [`RxError::Operator`].
  #[inline]
  fn try_scan<Acc, E, F>(self, seed: Acc, f: F) -> TryScanOp<Self, F, Acc, Item>
  where
    F: FnMut(Acc, Item) -> Result<Acc, E>,
    E: Display,
  {
    TryScanOp::new(self, seed, f)
  }

  /// Emits only the final accumulation, on completion.
  #[inline]
  fn reduce<Acc, F>(self, seed: Acc, f: F) -> ReduceOp<Self, F, Acc, Item>
  where
    F: FnMut(Acc, Item) -> Acc,
  {
    ReduceOp::new(self, seed, f)
  }

  /// `reduce` whose accumulator may fail. A failure is delivered as
  /// [`RxError::Operator`] instead of the accumulation.
  #[inline]
  fn try_reduce<Acc, E, F>(self, seed: Acc, f: F) -> TryReduceOp<Self, F, Acc, Item>
  where
    F: FnMut(Acc, Item) -> Result<Acc, E>,
    E: Display,
  {
    TryReduceOp::new(self, seed, f)
  }

  /// Collects all values into one `Vec`, emitted on completion.
  #[inline]
  fn to_vec(self) -> ReduceOp<Self, fn(Vec<Item>, Item) -> Vec<Item>, Vec<Item>, Item> {
    fn push<Item>(mut acc: Vec<Item>, v: Item) -> Vec<Item> {
      acc.push(v);
      acc
    }
    ReduceOp::new(self, vec![], push::<Item> as fn(Vec<Item>, Item) -> Vec<Item>)
  }

  /// Turns every event into a [`Notification`] value; the error and
  /// completion become values followed by a completion.
  #[inline]
  fn materialize(self) -> MaterializeOp<Self> { MaterializeOp::new(self) }

  /// The inverse of `materialize`.
  #[inline]
  fn dematerialize<V>(self) -> DematerializeOp<Self>
  where
    Self: Observable<Notification<V>>,
  {
    DematerializeOp::new(self)
  }

  /// On error, continues with the observable `f` builds from it.
  #[inline]
  fn on_error_resume_next<S, F>(self, f: F) -> OnErrorResumeNextOp<Self, F>
  where
    F: FnOnce(RxError) -> S,
    S: Observable<Item>,
  {
    OnErrorResumeNextOp::new(self, f)
  }

  /// Shares one execution of the source among every `fork` of the returned
  /// connectable, starting on `connect`.
  #[inline]
  fn publish(self) -> ConnectableObservable<Self, Item>
  where
    Item: Clone + Send + 'static,
  {
    ConnectableObservable::new(self, Subject::publish())
  }

  /// Like `publish`, but late forks first receive up to `capacity` past
  /// values.
  #[inline]
  fn replay(self, capacity: usize) -> Result<ConnectableObservable<Self, Item>, RxError>
  where
    Item: Clone + Send + 'static,
  {
    Ok(ConnectableObservable::new(self, Subject::replay(capacity)?))
  }

  /// Erases the concrete observable type.
  #[inline]
  fn box_it(self) -> BoxOp<Item>
  where
    Self: Send + 'static,
    Item: 'static,
  {
    BoxOp::new(self)
  }

  /// Subscribes with a value handler. An error reaching it is logged.
  fn subscribe<N>(self, next: N) -> SubscriptionWrapper<CompositeSubscription>
  where
    N: FnMut(Item) + Send + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, log_unhandled_error as fn(RxError), noop as fn()))
  }

  fn subscribe_err<N, E>(self, next: N, error: E) -> SubscriptionWrapper<CompositeSubscription>
  where
    N: FnMut(Item) + Send + 'static,
    E: FnMut(RxError) + Send + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, noop as fn()))
  }

  fn subscribe_complete<N, C>(self, next: N, complete: C) -> SubscriptionWrapper<CompositeSubscription>
  where
    N: FnMut(Item) + Send + 'static,
    C: FnMut() + Send + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, log_unhandled_error as fn(RxError), complete))
  }

  fn subscribe_all<N, E, C>(self, next: N, error: E, complete: C) -> SubscriptionWrapper<CompositeSubscription>
  where
    N: FnMut(Item) + Send + 'static,
    E: FnMut(RxError) + Send + 'static,
    C: FnMut() + Send + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, complete))
  }

  /// Subscribes `observer`, returning the handle disposing the whole chain.
  ///
  /// The handle closes by itself once the stream terminated.
  fn subscribe_with<O>(self, observer: O) -> SubscriptionWrapper<CompositeSubscription>
  where
    O: Observer<Item> + Send + 'static,
  {
    let subscription = CompositeSubscription::new();
    let unsub = self.actual_subscribe(Subscriber::new(observer, subscription.clone()));
    subscription.add(unsub);
    SubscriptionWrapper(subscription)
  }

  /// Like `subscribe_with`, but `make` receives the subscription handle
  /// before anything is emitted. The observer may keep it to dispose its own
  /// chain from a callback, even while a synchronous source is still
  /// emitting.
  fn subscribe_with_handle<O, F>(self, make: F) -> SubscriptionWrapper<CompositeSubscription>
  where
    F: FnOnce(SubscriptionWrapper<CompositeSubscription>) -> O,
    O: Observer<Item> + Send + 'static,
  {
    let subscription = CompositeSubscription::new();
    let observer = make(SubscriptionWrapper(subscription.clone()));
    let unsub = self.actual_subscribe(Subscriber::new(observer, subscription.clone()));
    subscription.add(unsub);
    SubscriptionWrapper(subscription)
  }
}

impl<Item, T> ObservableExt<Item> for T where T: Observable<Item> {}
