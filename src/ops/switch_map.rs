use crate::{prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct SwitchMapOp<S, F, Item> {
  source: S,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Item> SwitchMapOp<S, F, Item> {
  pub(crate) fn new(source: S, func: F) -> Self { SwitchMapOp { source, func, _hint: TypeHint::new() } }
}

impl<Item, Out, Inner, S, F> Observable<Out> for SwitchMapOp<S, F, Item>
where
  S: Observable<Item>,
  F: FnMut(Item) -> Inner + Send + 'static,
  Inner: Observable<Out>,
  Out: 'static,
{
  type Unsub = ZipSubscription<S::Unsub, SerialSubscription>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Out> + Send + 'static,
  {
    let current = SerialSubscription::new();
    let state = MutArc::own(SwitchState {
      observer: Some(observer),
      generation: 0,
      inner_active: false,
      outer_done: false,
    });
    let outer = SwitchMapObserver {
      state,
      func: self.func,
      current: current.clone(),
      _hint: TypeHint::new(),
    };
    ZipSubscription::new(self.source.actual_subscribe(outer), current)
  }
}

struct SwitchState<O> {
  observer: Option<O>,
  // Identifies the inner observable currently mirrored.
  generation: u64,
  inner_active: bool,
  outer_done: bool,
}

pub struct SwitchMapObserver<O, F, Out> {
  state: MutArc<SwitchState<O>>,
  func: F,
  current: SerialSubscription,
  _hint: TypeHint<Out>,
}

impl<Item, Out, Inner, O, F> Observer<Item> for SwitchMapObserver<O, F, Out>
where
  O: Observer<Out> + Send + 'static,
  F: FnMut(Item) -> Inner,
  Inner: Observable<Out>,
{
  fn next(&mut self, value: Item) {
    let inner = (self.func)(value);
    let generation = {
      let mut state = self.state.rc_deref_mut();
      state.generation += 1;
      state.inner_active = true;
      state.generation
    };
    let observer = SwitchInnerObserver { state: self.state.clone(), generation };
    self.current.replace(inner.actual_subscribe(observer));
  }

  fn error(&mut self, err: RxError) { self.state.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    let mut state = self.state.rc_deref_mut();
    state.outer_done = true;
    if !state.inner_active {
      state.observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.state.rc_deref().observer.is_finished() }
}

pub struct SwitchInnerObserver<O> {
  state: MutArc<SwitchState<O>>,
  generation: u64,
}

impl<Item, O> Observer<Item> for SwitchInnerObserver<O>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    let mut state = self.state.rc_deref_mut();
    if state.generation == self.generation {
      state.observer.next(value);
    }
  }

  fn error(&mut self, err: RxError) {
    let mut state = self.state.rc_deref_mut();
    if state.generation == self.generation {
      state.observer.error(err);
    }
  }

  fn complete(&mut self) {
    let mut state = self.state.rc_deref_mut();
    if state.generation == self.generation {
      state.inner_active = false;
      if state.outer_done {
        state.observer.complete();
      }
    }
  }

  fn is_finished(&self) -> bool {
    let state = self.state.rc_deref();
    state.generation != self.generation || state.observer.is_finished()
  }
}
