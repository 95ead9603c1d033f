//! Lazy fixed-size batching of change entries
//!
//! Lets a persistence layer write a large change set in bounded transactions.
//! The source is consumed exactly once, in order, and only the batch being
//! built is buffered.

use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// Iterator adapter yielding `Vec`s of `batch_size` items, the last one possibly shorter
///
/// Created by [`batches`] or [`BatchExt::batches`]. Dropping it early needs no cleanup.
#[derive(Debug, Clone)]
pub struct Batches<I> {
    iter: I,
    batch_size: NonZeroUsize,
}

impl<I: Iterator> Batches<I> {
    pub(crate) fn new(iter: I, batch_size: NonZeroUsize) -> Self {
        Self { iter, batch_size }
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.batch_size.get();
        let mut batch = Vec::with_capacity(size);
        batch.extend(self.iter.by_ref().take(size));

        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.batch_size.get();
        let (lower, upper) = self.iter.size_hint();
        (lower.div_ceil(size), upper.map(|n| n.div_ceil(size)))
    }
}

impl<I: FusedIterator> FusedIterator for Batches<I> {}

/// Group `items` into batches of `batch_size`
pub fn batches<I: IntoIterator>(items: I, batch_size: NonZeroUsize) -> Batches<I::IntoIter> {
    Batches::new(items.into_iter(), batch_size)
}

/// Adds `.batches(n)` to every iterator
pub trait BatchExt: Iterator + Sized {
    fn batches(self, batch_size: NonZeroUsize) -> Batches<Self> {
        Batches::new(self, batch_size)
    }
}

impl<I: Iterator> BatchExt for I {}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_batches_with_remainder() {
        let sizes: Vec<usize> = batches(0..100, size(15)).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![15, 15, 15, 15, 15, 15, 10]);
    }

    #[test]
    fn test_batches_exact_multiple_has_no_empty_tail() {
        let all: Vec<Vec<i32>> = (0..6).batches(size(3)).collect();
        assert_eq!(all, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_batches_empty_input() {
        let mut it = batches(Vec::<u8>::new(), size(4));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_batches_consumes_one_shot_source_lazily() {
        let mut pulled = 0;
        let source = std::iter::from_fn(|| {
            pulled += 1;
            (pulled <= 7).then_some(pulled)
        });
        let mut it = source.batches(size(3));

        assert_eq!(it.next(), Some(vec![1, 2, 3]));
        assert_eq!(it.next(), Some(vec![4, 5, 6]));
        assert_eq!(it.next(), Some(vec![7]));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_size_hint() {
        let it = batches(0..31, size(10));
        assert_eq!(it.size_hint(), (4, Some(4)));
        assert_eq!(it.count(), 4);
    }
}
