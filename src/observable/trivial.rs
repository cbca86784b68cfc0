use crate::{prelude::*, type_hint::TypeHint};

/// Completes immediately without emitting.
#[derive(Clone)]
pub struct Empty<Item>(TypeHint<Item>);

/// Never emits and never terminates; the subscription stays open until it
/// is disposed.
#[derive(Clone)]
pub struct Never<Item>(TypeHint<Item>);

/// Fails immediately with the given error.
#[derive(Clone)]
pub struct ThrowErr<Item> {
  err: RxError,
  _hint: TypeHint<Item>,
}

pub fn empty<Item>() -> Empty<Item> { Empty(TypeHint::new()) }

pub fn never<Item>() -> Never<Item> { Never(TypeHint::new()) }

pub fn throw_err<Item>(err: RxError) -> ThrowErr<Item> { ThrowErr { err, _hint: TypeHint::new() } }

impl<Item> Observable<Item> for Empty<Item> {
  type Unsub = ();

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    observer.complete();
  }
}

impl<Item> Observable<Item> for Never<Item> {
  type Unsub = ();

  fn actual_subscribe<O>(self, _observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
  }
}

impl<Item> Observable<Item> for ThrowErr<Item> {
  type Unsub = ();

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    observer.error(self.err);
  }
}
