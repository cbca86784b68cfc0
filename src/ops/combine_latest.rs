use crate::{ops::map::TryMapOp, prelude::*, type_hint::TypeHint};

#[derive(Clone)]
pub struct CombineLatestOp<A, B, F, ItemA, ItemB> {
  a: A,
  b: B,
  func: F,
  _hint: TypeHint<(ItemA, ItemB)>,
}

impl<A, B, F, ItemA, ItemB> CombineLatestOp<A, B, F, ItemA, ItemB> {
  pub(crate) fn new(a: A, b: B, func: F) -> Self { CombineLatestOp { a, b, func, _hint: TypeHint::new() } }
}

impl<Out, ItemA, ItemB, A, B, F> Observable<Out> for CombineLatestOp<A, B, F, ItemA, ItemB>
where
  A: Observable<ItemA>,
  B: Observable<ItemB>,
  F: FnMut(ItemA, ItemB) -> Out + Send + 'static,
  ItemA: Clone + Send + 'static,
  ItemB: Clone + Send + 'static,
{
  type Unsub = ZipSubscription<A::Unsub, B::Unsub>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Out> + Send + 'static,
  {
    let state = MutArc::own(CombineLatestState {
      observer: Some(observer),
      func: self.func,
      a: None,
      b: None,
      a_done: false,
      b_done: false,
    });
    let a = self.a.actual_subscribe(CombineLatestA(state.clone()));
    let b = self.b.actual_subscribe(CombineLatestB(state));
    ZipSubscription::new(a, b)
  }
}

pub struct CombineLatestState<O, F, ItemA, ItemB> {
  observer: Option<O>,
  func: F,
  a: Option<ItemA>,
  b: Option<ItemB>,
  a_done: bool,
  b_done: bool,
}

impl<O, F, ItemA, ItemB> CombineLatestState<O, F, ItemA, ItemB> {
  fn emit<Out>(&mut self)
  where
    O: Observer<Out>,
    F: FnMut(ItemA, ItemB) -> Out,
    ItemA: Clone,
    ItemB: Clone,
  {
    if let (Some(a), Some(b)) = (&self.a, &self.b) {
      let value = (self.func)(a.clone(), b.clone());
      self.observer.next(value);
    }
  }

  // A side that completes without a value can never produce a combination.
  fn check_complete<Out>(&mut self)
  where
    O: Observer<Out>,
  {
    let stalled = (self.a_done && self.a.is_none()) || (self.b_done && self.b.is_none());
    if stalled || (self.a_done && self.b_done) {
      self.observer.complete();
    }
  }
}

pub struct CombineLatestA<O, F, ItemA, ItemB>(MutArc<CombineLatestState<O, F, ItemA, ItemB>>);

pub struct CombineLatestB<O, F, ItemA, ItemB>(MutArc<CombineLatestState<O, F, ItemA, ItemB>>);

impl<Out, O, F, ItemA, ItemB> Observer<ItemA> for CombineLatestA<O, F, ItemA, ItemB>
where
  O: Observer<Out>,
  F: FnMut(ItemA, ItemB) -> Out,
  ItemA: Clone,
  ItemB: Clone,
{
  fn next(&mut self, value: ItemA) {
    let mut state = self.0.rc_deref_mut();
    state.a = Some(value);
    state.emit();
  }

  fn error(&mut self, err: RxError) { self.0.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    let mut state = self.0.rc_deref_mut();
    state.a_done = true;
    state.check_complete();
  }

  fn is_finished(&self) -> bool { self.0.rc_deref().observer.is_finished() }
}

impl<Out, O, F, ItemA, ItemB> Observer<ItemB> for CombineLatestB<O, F, ItemA, ItemB>
where
  O: Observer<Out>,
  F: FnMut(ItemA, ItemB) -> Out,
  ItemA: Clone,
  ItemB: Clone,
{
  fn next(&mut self, value: ItemB) {
    let mut state = self.0.rc_deref_mut();
    state.b = Some(value);
    state.emit();
  }

  fn error(&mut self, err: RxError) { self.0.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    let mut state = self.0.rc_deref_mut();
    state.b_done = true;
    state.check_complete();
  }

  fn is_finished(&self) -> bool { self.0.rc_deref().observer.is_finished() }
}

/// `combine_latest` whose combiner may fail; the first `Err` ends the stream
/// with [`RxError::Operator`].
pub type TryCombineLatestOp<A, B, F, ItemA, ItemB, Out, E> = TryMapOp<
  CombineLatestOp<A, B, F, ItemA, ItemB>,
  fn(Result<Out, E>) -> Result<Out, E>,
  Result<Out, E>,
>;

/// Combines the latest values of any number of same-typed sources into a
/// `Vec` in source order. Built by
/// [`observable::combine_latest_all`](crate::observable::combine_latest_all).
#[derive(Clone)]
pub struct CombineLatestAll<S, Item> {
  sources: Vec<S>,
  _hint: TypeHint<Item>,
}

impl<S, Item> CombineLatestAll<S, Item> {
  pub(crate) fn new(sources: Vec<S>) -> Self { CombineLatestAll { sources, _hint: TypeHint::new() } }
}

impl<Item, S> Observable<Vec<Item>> for CombineLatestAll<S, Item>
where
  S: Observable<Item>,
  Item: Clone + Send + 'static,
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

    let state = MutArc::own(CombineLatestAllState {
      observer: Some(observer),
      latest: vec![None; count],
      completed: vec![false; count],
    });
    for (index, source) in self.sources.into_iter().enumerate() {
      let finished = state.rc_deref().observer.is_none();
      if finished {
        break;
      }
      let observer = CombineLatestAllObserver { state: state.clone(), index };
      subscription.add(source.actual_subscribe(observer));
    }
    subscription
  }
}

pub struct CombineLatestAllState<O, Item> {
  observer: Option<O>,
  latest: Vec<Option<Item>>,
  completed: Vec<bool>,
}

pub struct CombineLatestAllObserver<O, Item> {
  state: MutArc<CombineLatestAllState<O, Item>>,
  index: usize,
}

impl<O, Item> Observer<Item> for CombineLatestAllObserver<O, Item>
where
  O: Observer<Vec<Item>>,
  Item: Clone,
{
  fn next(&mut self, value: Item) {
    let mut state = self.state.rc_deref_mut();
    state.latest[self.index] = Some(value);
    if state.latest.iter().all(Option::is_some) {
      let row: Vec<Item> = state.latest.iter().flatten().cloned().collect();
      state.observer.next(row);
    }
  }

  fn error(&mut self, err: RxError) { self.state.rc_deref_mut().observer.error(err) }

  fn complete(&mut self) {
    let mut state = self.state.rc_deref_mut();
    state.completed[self.index] = true;
    let stalled = state.latest[self.index].is_none();
    if stalled || state.completed.iter().all(|done| *done) {
      state.observer.complete();
    }
  }

  fn is_finished(&self) -> bool { self.state.rc_deref().observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn hello_world() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    let greeting = Subject::publish();
    let name = Subject::publish();
    greeting
      .clone()
      .combine_latest(name.clone(), |g: &'static str, n: &'static str| format!("{g} {n}"))
      .subscribe(move |v| c_values.lock().unwrap().push(v));

    greeting.next("Hello");
    name.next("World");
    greeting.next("Goodbye");
    name.next("Rust");

    assert_eq!(
      *values.lock().unwrap(),
      vec!["Hello World", "Goodbye World", "Goodbye Rust"]
    );
  }

  #[test]
  fn completes_after_both() {
    let completed = Arc::new(Mutex::new(false));
    let c_completed = completed.clone();
    let a = Subject::publish();
    let b = Subject::publish();
    a.clone()
      .combine_latest(b.clone(), |x: i32, y: i32| x + y)
      .subscribe_complete(|_| {}, move || *c_completed.lock().unwrap() = true);
    a.next(1);
    b.next(2);
    a.complete();
    assert!(!*completed.lock().unwrap());
    b.complete();
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn silent_side_completing_ends_stream() {
    let completed = Arc::new(Mutex::new(false));
    let c_completed = completed.clone();
    let a = Subject::publish();
    observable::empty()
      .combine_latest(a.clone(), |x: i32, y: i32| x * y)
      .subscribe_complete(|_| {}, move || *c_completed.lock().unwrap() = true);
    assert!(*completed.lock().unwrap());
    assert_eq!(a.subscriber_count(), 0);
  }

  #[test]
  fn try_combine_latest_stops_on_failure() {
    let log = Arc::new(Mutex::new(vec![]));
    let (c_next, c_err) = (log.clone(), log.clone());
    let a = Subject::publish();
    let b = Subject::publish();
    a.clone()
      .try_combine_latest(b.clone(), |x: i32, y: i32| x.checked_div(y).ok_or("division by zero"))
      .subscribe_err(
        move |v: i32| c_next.lock().unwrap().push(v.to_string()),
        move |e: RxError| c_err.lock().unwrap().push(e.to_string()),
      );

    a.next(12);
    b.next(4);
    b.next(0);
    b.next(6);

    assert_eq!(*log.lock().unwrap(), vec!["3", "operator error: division by zero"]);
    assert_eq!(a.subscriber_count(), 0);
  }

  #[test]
  fn combine_latest_all_waits_for_every_source() {
    let values = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (c_values, c_completed) = (values.clone(), completed.clone());
    let sources: Vec<Subject<char>> = (0..3).map(|_| Subject::publish()).collect();
    observable::combine_latest_all(sources.clone()).subscribe_complete(
      move |row: Vec<char>| c_values.lock().unwrap().push(row.into_iter().collect::<String>()),
      move || *c_completed.lock().unwrap() = true,
    );

    sources[0].next('a');
    sources[1].next('b');
    assert!(values.lock().unwrap().is_empty());
    sources[2].next('c');
    sources[0].next('x');
    sources[0].complete();
    sources[1].complete();
    sources[2].next('z');
    assert!(!*completed.lock().unwrap());
    sources[2].complete();

    assert_eq!(*values.lock().unwrap(), vec!["abc", "xbc", "xbz"]);
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn combine_latest_all_ends_when_a_source_never_emitted() {
    let completed = Arc::new(Mutex::new(false));
    let c_completed = completed.clone();
    let live = Subject::publish();
    live.next(1);
    observable::combine_latest_all(vec![live.clone().box_it(), observable::empty::<i32>().box_it()])
      .subscribe_complete(|_: Vec<i32>| {}, move || *c_completed.lock().unwrap() = true);
    assert!(*completed.lock().unwrap());
    assert_eq!(live.subscriber_count(), 0);
  }
}
