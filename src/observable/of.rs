use crate::prelude::*;

/// Emits a single value, then completes.
#[derive(Clone)]
pub struct ObservableOf<Item>(pub(crate) Item);

/// Creates an observable producing a single value.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// observable::of(123).subscribe(|v| println!("{},", v));
/// ```
pub fn of<Item>(v: Item) -> ObservableOf<Item> { ObservableOf(v) }

impl<Item> Observable<Item> for ObservableOf<Item> {
  type Unsub = ();

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    if !observer.is_finished() {
      observer.next(self.0);
    }
    observer.complete();
  }
}
