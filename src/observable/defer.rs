use crate::{prelude::*, type_hint::TypeHint};

/// Observable built afresh by a factory on every subscription.
///
/// Clones share the factory, so a stateful factory observes every
/// subscription made through any clone.
pub struct Defer<F, Item> {
  factory: MutArc<F>,
  _hint: TypeHint<Item>,
}

impl<F, Item> Clone for Defer<F, Item> {
  fn clone(&self) -> Self { Defer { factory: self.factory.clone(), _hint: TypeHint::new() } }
}

/// Creates an observable that calls `factory` at subscription time.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// let mut flip = false;
/// let source = observable::defer(move || {
///   flip = !flip;
///   if flip { observable::from_iter(1..=3) } else { observable::from_iter(4..=6) }
/// });
/// source.clone().subscribe(|v| println!("{}", v)); // 1 2 3
/// source.subscribe(|v| println!("{}", v)); // 4 5 6
/// ```
pub fn defer<F, S, Item>(factory: F) -> Defer<F, Item>
where
  F: FnMut() -> S,
  S: Observable<Item>,
{
  Defer { factory: MutArc::own(factory), _hint: TypeHint::new() }
}

impl<F, S, Item> Observable<Item> for Defer<F, Item>
where
  F: FnMut() -> S,
  S: Observable<Item>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    // Released before subscribing: the new source may subscribe this defer
    // again.
    let source = {
      let mut factory = self.factory.rc_deref_mut();
      (*factory)()
    };
    source.actual_subscribe(observer)
  }
}
