use crate::prelude::*;

/// Emits every item of an iterator, then completes.
#[derive(Clone)]
pub struct FromIter<I>(I);

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error. The
/// iteration stops early once the downstream is finished, so infinite
/// iterators are fine behind `take`.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<I>(iter: I) -> FromIter<I>
where
  I: IntoIterator,
{
  FromIter(iter)
}

/// Creates an observable emitting each element of `values` in order.
pub fn just<Item, const N: usize>(values: [Item; N]) -> FromIter<[Item; N]> { FromIter(values) }

/// Emits the `count` integers starting at `start`.
pub fn range(start: i64, count: usize) -> FromIter<std::ops::Range<i64>> {
  FromIter(start..start.saturating_add(i64::try_from(count).unwrap_or(i64::MAX)))
}

impl<Item, I> Observable<Item> for FromIter<I>
where
  I: IntoIterator<Item = Item>,
{
  type Unsub = ();

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item> + Send + 'static,
  {
    for v in self.0 {
      if observer.is_finished() {
        return;
      }
      observer.next(v);
    }
    observer.complete();
  }
}
