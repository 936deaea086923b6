use std::fmt::Display;

use rayon::{iter::IndexedParallelIterator, iter::ParallelIterator, slice::ParallelSliceMut};

use crate::texture::Shape2D;

/// How a stage walks the rows of its output.
///
/// Both strategies produce identical buffers; [Strategy::Par] only pays off
/// once there are enough rows to amortize the rayon scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Single threaded row loop.
    Seq,
    /// Rows tiled across the rayon pool.
    Par,
}

impl Strategy {
    /// Detect best-fit strategy for an image shape.
    pub fn auto(shape_hint: Shape2D) -> Self {
        let (width, height) = shape_hint;
        let count = width * height;

        if width < 450 || count < 202500 || rayon::current_num_threads() == 1 {
            return Strategy::Seq;
        }
        Strategy::Par
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Seq => "seq",
            Strategy::Par => "par",
        }
    }

    /// Call `row_fn(y, row)` for every `row_len` sized row of `out`.
    ///
    /// `row_fn` only ever sees its own output row, so anything it reads must
    /// come from buffers that are no longer being written.
    #[inline]
    pub(crate) fn for_each_row<T, F>(self, out: &mut [T], row_len: usize, row_fn: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        debug_assert!(row_len > 0, "rows must hold at least one sample");
        debug_assert_eq!(out.len() % row_len, 0, "buffer is not a whole number of rows");
        match self {
            Strategy::Seq => out
                .chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| row_fn(y, row)),
            Strategy::Par => out
                .par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| row_fn(y, row)),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
