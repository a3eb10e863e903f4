use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The number of rows per band must be valid.
    #[error("rows per band must be > 0 for AutoRows strategy")]
    InvalidRowBand(usize),

    /// The row stride does not evenly divide the buffer.
    #[error("buffer of length {0} is not a whole number of rows of stride {1}")]
    InvalidRowStride(usize, usize),
}

/// Controls how the rasterization of a UV map is executed.
///
/// Every strategy produces the same output. Parallel strategies split the
/// output into disjoint bands of rows and replay the full triangle list in
/// order inside each band, so overlapping triangles still resolve with the
/// later triangle winning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process bands of `n` rows in parallel.
    AutoRows(usize),

    /// Run on a local thread pool with `n` threads, one band per thread.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Apply a function to disjoint bands of rows of a buffer.
///
/// # Arguments
///
/// * `data` - The row-major buffer to split.
/// * `row_stride` - The number of elements in one row (width * channels).
/// * `strategy` - The execution strategy.
/// * `f` - Called with the index of the first row of the band and the band itself.
///
/// # Returns
///
/// The results of `f`, ordered by band.
pub fn par_iter_row_bands<T, R, F>(
    data: &mut [T],
    row_stride: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<Vec<R>, ParallelError>
where
    T: Send,
    R: Send,
    F: Fn(usize, &mut [T]) -> R + Send + Sync,
{
    if row_stride == 0 || data.len() % row_stride != 0 {
        return Err(ParallelError::InvalidRowStride(data.len(), row_stride));
    }
    let rows = data.len() / row_stride;

    let run_bands = |data: &mut [T], band_rows: usize| -> Vec<R> {
        data.par_chunks_mut(band_rows * row_stride)
            .enumerate()
            .map(|(i, band)| f(i * band_rows, band))
            .collect()
    };

    match strategy {
        ExecutionStrategy::Serial => Ok(vec![f(0, data)]),
        ExecutionStrategy::AutoRows(band_rows) => {
            if band_rows == 0 {
                return Err(ParallelError::InvalidRowBand(band_rows));
            }
            Ok(run_bands(data, band_rows))
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            let band_rows = rows.div_ceil(n).max(1);
            Ok(pool.install(|| run_bands(data, band_rows)))
        }
    }
}
