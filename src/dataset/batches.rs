use std::num::NonZeroUsize;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// An owned batch of examples.
#[derive(Debug, Clone)]
pub struct Batch {
    /// The position of each example within the split it was taken from.
    pub indices: Vec<usize>,
    pub x: Array2<f32>,
    pub y: Array1<f32>,
}

impl Batch {
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Iterator over consecutive chunks of a given visiting order of a split.
///
/// Every index in `order` is yielded exactly once; only the last batch may be
/// shorter than `batch_size`.
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    x: ArrayView2<'a, f32>,
    y: ArrayView1<'a, f32>,
    order: Vec<usize>,
    batch_size: usize,
    cursor: usize,
}

impl<'a> Batches<'a> {
    /// Creates a new `Batches` iterator.
    ///
    /// # Arguments
    /// * `x` - The features of the split.
    /// * `y` - The targets of the split.
    /// * `order` - The order in which the rows of the split are visited.
    /// * `batch_size` - The maximum amount of rows per batch.
    pub fn new(
        x: ArrayView2<'a, f32>,
        y: ArrayView1<'a, f32>,
        order: Vec<usize>,
        batch_size: NonZeroUsize,
    ) -> Self {
        Self {
            x,
            y,
            order,
            batch_size: batch_size.get(),
            cursor: 0,
        }
    }
}

impl Iterator for Batches<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }

        let end = (self.cursor + self.batch_size).min(self.order.len());
        let indices = &self.order[self.cursor..end];
        self.cursor = end;

        Some(Batch {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            indices: indices.to_vec(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.order.len() - self.cursor).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Batches<'_> {}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn batches_follow_the_given_order() {
        let x = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
        let y = array![10.0, 11.0, 12.0, 13.0, 14.0];

        let mut batches = Batches::new(x.view(), y.view(), vec![4, 0, 2, 1, 3], nz(2));
        assert_eq!(batches.len(), 3);

        let b1 = batches.next().unwrap();
        assert_eq!(b1.indices, [4, 0]);
        assert_eq!(b1.x, array![[4.0], [0.0]]);
        assert_eq!(b1.y, array![14.0, 10.0]);

        let b2 = batches.next().unwrap();
        assert_eq!(b2.y, array![12.0, 11.0]);
        assert_eq!(batches.len(), 1);

        let b3 = batches.next().unwrap();
        assert_eq!(b3.len(), 1);
        assert_eq!(b3.y, array![13.0]);

        assert!(batches.next().is_none());
    }

    #[test]
    fn empty_order_yields_nothing() {
        let x = Array2::<f32>::zeros((0, 2));
        let y = Array1::<f32>::zeros(0);

        let mut batches = Batches::new(x.view(), y.view(), vec![], nz(4));
        assert_eq!(batches.len(), 0);
        assert!(batches.next().is_none());
    }

    #[test]
    fn batch_size_larger_than_the_order_yields_one_batch() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![1.0, 2.0, 3.0];

        let batches: Vec<_> = Batches::new(x.view(), y.view(), vec![2, 1, 0], nz(8)).collect();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].indices, [2, 1, 0]);
    }
}
