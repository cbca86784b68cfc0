use crate::{prelude::*, type_hint::TypeHint};

/// The imperative face of an observer handed to [`create`].
///
/// The emitter enforces the event grammar: after `error` or `complete` every
/// further call is ignored.
pub trait Emitter<Item> {
  fn next(&mut self, value: Item);
  fn error(&mut self, err: RxError);
  fn complete(&mut self);
  /// `true` once the downstream stopped listening; long-running producers
  /// should poll it and return early.
  fn is_finished(&self) -> bool;
}

/// Observable created from a function.
#[derive(Clone)]
pub struct Create<F, Item> {
  f: F,
  _hint: TypeHint<Item>,
}

/// Creates an observable whose `f` drives emission through an [`Emitter`]
/// on each subscription. `f` may return a teardown subscription, run when
/// the subscription is disposed; return `()` when there is nothing to
/// release.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// observable::create(|emitter: &mut dyn Emitter<i32>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
/// })
/// .subscribe(|v| println!("{}", v));
/// ```
pub fn create<Item, F, U>(f: F) -> Create<F, Item>
where
  F: FnOnce(&mut dyn Emitter<Item>) -> U,
  U: SubscriptionLike + Send + 'static,
{
  Create { f, _hint: TypeHint::new() }
}

struct CreateEmitter<O>(Option<O>);

impl<Item, O> Emitter<Item> for CreateEmitter<O>
where
  O: Observer<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) {
    if let Some(observer) = &mut self.0 {
      observer.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: RxError) {
    if let Some(mut observer) = self.0.take() {
      observer.error(err);
    }
  }

  #[inline]
  fn complete(&mut self) {
    if let Some(mut observer) = self.0.take() {
      observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.0.as_ref().map_or(true, |o| o.is_finished()) }
}

/// The emitter handed to [`create_single`]. Only the first `success` or
/// `error` takes effect.
pub trait SingleEmitter<Item> {
  /// Emits `value` and completes.
  fn success(&mut self, value: Item);
  fn error(&mut self, err: RxError);
  fn is_finished(&self) -> bool;
}

impl<Item, O> SingleEmitter<Item> for CreateEmitter<O>
where
  O: Observer<Item>,
{
  fn success(&mut self, value: Item) {
    if let Some(mut observer) = self.0.take() {
      observer.next(value);
      observer.complete();
    }
  }

  fn error(&mut self, err: RxError) {
    if let Some(mut observer) = self.0.take() {
      observer.error(err);
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.0.as_ref().map_or(true, |o| o.is_finished()) }
}

/// Observable producing a single value or an error, created from a function.
#[derive(Clone)]
pub struct CreateSingle<F, Item> {
  f: F,
  _hint: TypeHint<Item>,
}

/// Like [`create`], for sources with exactly one outcome: `f` either
/// succeeds with one value (followed by completion) or fails.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// observable::create_single(|emitter: &mut dyn SingleEmitter<String>| {
///   match std::env::var("HOME") {
///     Ok(home) => emitter.success(home),
///     Err(e) => emitter.error(RxError::upstream(e)),
///   }
/// })
/// .subscribe_err(|home| println!("{}", home), |e| eprintln!("{}", e));
/// ```
pub fn create_single<Item, F, U>(f: F) -> CreateSingle<F, Item>
where
  F: FnOnce(&mut dyn SingleEmitter<Item>) -> U,
  U: SubscriptionLike + Send + 'static,
{
  CreateSingle { f, _hint: TypeHint::new() }
}

impl<Item, F, U> Observable<Item> for CreateSingle<F, Item>
where
  F: FnOnce(&mut dyn SingleEmitter<Item>) -> U,
  U: SubscriptionLike + Send + 'static,
{
  type Unsub = U;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let mut emitter = CreateEmitter(Some(observer));
    (self.f)(&mut emitter)
  }
}

impl<Item, F, U> Observable<Item> for Create<F, Item>
where
  F: FnOnce(&mut dyn Emitter<Item>) -> U,
  U: SubscriptionLike + Send + 'static,
{
  type Unsub = U;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    let mut emitter = CreateEmitter(Some(observer));
    (self.f)(&mut emitter)
  }
}
