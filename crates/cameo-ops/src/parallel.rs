//! Row-wise iteration, parallel when the `parallel` feature is on.
//!
//! Every operator in this crate writes disjoint output rows, so the only
//! difference between the two builds is scheduling.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sized chunk of `data`.
pub(crate) fn for_each_row<T, F>(data: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Clamps a signed coordinate into `0..len`, replicating the border.
#[inline]
pub(crate) fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
