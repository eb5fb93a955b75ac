//! Fixed-size worker dispatch over contiguous index ranges.
//!
//! Work is split into `workers` contiguous ranges with boundaries
//! `k·total/workers`. Each worker gets exclusive `&mut` access to its own
//! slice of the output, so nothing is locked; the scope joins every worker
//! before returning.

use std::ops::Range;

use log::debug;

use super::LightingError;

/// Split `[0, total)` into `workers` contiguous ranges.
///
/// Ranges may differ in size by one and may be empty when `workers > total`,
/// but together they cover every index exactly once.
pub fn partition(total: usize, workers: usize) -> Vec<Range<usize>> {
    (0..workers)
        .map(|k| (k * total / workers)..((k + 1) * total / workers))
        .collect()
}

/// Run `job(first_index, slice)` on one scoped thread per non-empty range of
/// `output`, then join them all.
///
/// `first_index` is the global index of `slice[0]`.
pub fn dispatch<T, F>(output: &mut [T], workers: usize, job: F) -> Result<(), LightingError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if workers == 0 {
        return Err(LightingError::NoWorkers);
    }

    let ranges = partition(output.len(), workers);
    let job = &job;

    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(ranges.len());
        let mut rest = output;

        for range in ranges {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            if chunk.is_empty() {
                continue;
            }

            debug!("worker {} handling [{}, {})", handles.len(), range.start, range.end);
            handles.push(scope.spawn(move || job(range.start, chunk)));
        }

        // Join everything before reporting, so no worker outlives a failure
        let results: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
        if results.iter().any(|r| r.is_err()) {
            return Err(LightingError::WorkerPanicked);
        }
        Ok(())
    })
}
