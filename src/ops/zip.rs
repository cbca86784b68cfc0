//! Pairs items of observables by index.

use std::collections::VecDeque;

use crate::{prelude::*, type_hint::TypeHint};

/// Buffers items from each source and emits `func(a, b)` as soon as both
/// sides hold a value at the same index. `zip` uses a tuple constructor.
#[derive(Clone)]
pub struct ZipOp<A, B, F, ItemA, ItemB> {
  a: A,
  b: B,
  func: F,
  _hint: TypeHint<(ItemA, ItemB)>,
}

impl<A, B, F, ItemA, ItemB> ZipOp<A, B, F, ItemA, ItemB> {
  pub(crate) fn new(a: A, b: B, func: F) -> Self { ZipOp { a, b, func, _hint: TypeHint::new() } }
}

pub(crate) fn pair<ItemA, ItemB>(a: ItemA, b: ItemB) -> (ItemA, ItemB) { (a, b) }

impl<Out, ItemA, ItemB, A, B, F> Observable<Out> for ZipOp<A, B, F, ItemA, ItemB>
where
  A: Observable<ItemA>,
  B: Observable<ItemB>,
  F: FnMut(ItemA, ItemB) -> Out + Send + 'static,
  ItemA: Send + 'static,
  ItemB: Send + 'static,
{
  type Unsub = ZipSubscription<A::Unsub, B::Unsub>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Out> + Send + 'static,
  {
    let state = MutArc::own(ZipState {
      observer: Some(observer),
      func: self.func,
      buffer_a: VecDeque::new(),
      buffer_b: VecDeque::new(),
      completed_a: false,
      completed_b: false,
    });
    let a = self.a.actual_subscribe(ZipAObserver(state.clone()));
    let b = self.b.actual_subscribe(ZipBObserver(state));
    ZipSubscription::new(a, b)
  }
}

pub struct ZipState<O, F, ItemA, ItemB> {
  observer: Option<O>,
  func: F,
  buffer_a: VecDeque<ItemA>,
  buffer_b: VecDeque<ItemB>,
  completed_a: bool,
  completed_b: bool,
}

impl<O, F, ItemA, ItemB> ZipState<O, F, ItemA, ItemB> {
  fn emit_pairs<Out>(&mut self)
  where
    O: Observer<Out>,
    F: FnMut(ItemA, ItemB) -> Out,
  {
    while !self.buffer_a.is_empty() && !self.buffer_b.is_empty() {
      if let (Some(a), Some(b)) = (self.buffer_a.pop_front(), self.buffer_b.pop_front()) {
        let value = (self.func)(a, b);
        self.observer.next(value);
      }
    }
    self.check_complete();
  }

  /// Completes once a side is done and its buffer is drained: no further
  /// pair can be formed.
  fn check_complete<Out>(&mut self)
  where
    O: Observer<Out>,
  {
    let exhausted = (self.completed_a && self.buffer_a.is_empty())
      || (self.completed_b && self.buffer_b.is_empty())
      || (self.completed_a && self.completed_b);
    if exhausted {
      self.buffer_a.clear();
      self.buffer_b.clear();
      self.observer.complete();
    }
  }
}

pub struct ZipAObserver<O, F, ItemA, ItemB>(MutArc<ZipState<O, F, ItemA, ItemB>>);

pub struct ZipBObserver<O, F, ItemA, ItemB>(MutArc<ZipState<O, F, ItemA, ItemB>>);

impl<Out, O, F, ItemA, ItemB> Observer<ItemA> for ZipAObserver<O, F, ItemA, ItemB>
where
  O: Observer<Out>,
  F: FnMut(ItemA, ItemB) -> Out,
{
  fn next(&mut self, value: ItemA) {
    let mut state = self.0.rc_deref_mut();
    state.buffer_a.push_back(value);
    state.emit_pairs();
  }

  fn error(&mut self, err: RxError) { self.0.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    let mut state = self.0.rc_deref_mut();
    state.completed_a = true;
    state.check_complete();
  }

  fn is_finished(&self) -> bool { self.0.rc_deref().observer.is_finished() }
}

impl<Out, O, F, ItemA, ItemB> Observer<ItemB> for ZipBObserver<O, F, ItemA, ItemB>
where
  O: Observer<Out>,
  F: FnMut(ItemA, ItemB) -> Out,
{
  fn next(&mut self, value: ItemB) {
    let mut state = self.0.rc_deref_mut();
    state.buffer_b.push_back(value);
    state.emit_pairs();
  }

  fn error(&mut self, err: RxError) { self.0.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    let mut state = self.0.rc_deref_mut();
    state.completed_b = true;
    state.check_complete();
  }

  fn is_finished(&self) -> bool { self.0.rc_deref().observer.is_finished() }
}

/// Zips any number of same-typed sources into `Vec`s, one value per source
/// in source order. Built by [`observable::zip_all`](crate::observable::zip_all).
#[derive(Clone)]
pub struct ZipAll<S, Item> {
  sources: Vec<S>,
  _hint: TypeHint<Item>,
}

impl<S, Item> ZipAll<S, Item> {
  pub(crate) fn new(sources: Vec<S>) -> Self { ZipAll { sources, _hint: TypeHint::new() } }
}

impl<Item, S> Observable<Vec<Item>> for ZipAll<S, Item>
where
  S: Observable<Item>,
  Item: Send + 'static,
{
  type Unsub = CompositeSubscription;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Vec<Item>> + Send + 'static,
  {
    let subscription = CompositeSubscription::new();
    let count = self.sources.len();
    if count == 0 {
      observer.complete();
      return subscription;
    }

    let state = MutArc::own(ZipAllState {
      observer: Some(observer),
      queues: (0..count).map(|_| VecDeque::new()).collect(),
      completed: vec![false; count],
    });
    for (index, source) in self.sources.into_iter().enumerate() {
      let finished = state.rc_deref().observer.is_none();
      if finished {
        break;
      }
      subscription.add(source.actual_subscribe(ZipAllObserver { state: state.clone(), index }));
    }
    subscription
  }
}

pub struct ZipAllState<O, Item> {
  observer: Option<O>,
  queues: Vec<VecDeque<Item>>,
  completed: Vec<bool>,
}

impl<O, Item> ZipAllState<O, Item>
where
  O: Observer<Vec<Item>>,
{
  fn emit_rows(&mut self) {
    while self.queues.iter().all(|queue| !queue.is_empty()) {
      let row: Vec<Item> = self.queues.iter_mut().filter_map(VecDeque::pop_front).collect();
      self.observer.next(row);
    }
    self.check_complete();
  }

  fn check_complete(&mut self) {
    let exhausted =
      self.completed.iter().zip(&self.queues).any(|(done, queue)| *done && queue.is_empty());
    if exhausted {
      self.queues.iter_mut().for_each(VecDeque::clear);
      self.observer.complete();
    }
  }
}

pub struct ZipAllObserver<O, Item> {
  state: MutArc<ZipAllState<O, Item>>,
  index: usize,
}

impl<O, Item> Observer<Item> for ZipAllObserver<O, Item>
where
  O: Observer<Vec<Item>>,
{
  fn next(&mut self, value: Item) {
    let mut state = self.state.rc_deref_mut();
    state.queues[self.index].push_back(value);
    state.emit_rows();
  }

  fn error(&mut self, err: RxError) { self.state.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    let mut state = self.state.rc_deref_mut();
    state.completed[self.index] = true;
    state.check_complete();
  }

  fn is_finished(&self) -> bool { self.state.rc_deref().observer.is_finished() }
}
