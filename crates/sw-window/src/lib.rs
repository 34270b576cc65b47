#![forbid(unsafe_code)]

//! Index-arithmetic operators over finite in-memory sequences: sliding
//! windows, offset accessors, and fixed-size chunking.
//!
//! Every operator materializes its source into an indexable buffer before
//! emitting anything; window and chunk arithmetic needs random access and a
//! total count. Size and step configuration is validated before the source
//! is consumed.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    #[error("window size must be at least 1")]
    WindowSizeZero,
    #[error("window step must be at least 1")]
    StepZero,
    #[error("chunk size must be at least 1")]
    ChunkSizeZero,
}

// ---------------------------------------------------------------------------
// Sliding windows
// ---------------------------------------------------------------------------

/// Emit every contiguous window of `size` elements, advancing by one.
pub fn windowed<S, T>(source: S, size: usize) -> Result<Vec<Vec<T>>, WindowError>
where
    S: IntoIterator<Item = T>,
    T: Clone,
{
    windowed_step(source, size, 1)
}

/// Emit contiguous windows of `size` elements, advancing by `step`.
///
/// Windows may overlap (`step < size`) or skip elements (`step > size`).
/// A source shorter than `size` emits nothing. The number of windows is
/// `max(0, (n - size) / step + 1)`.
pub fn windowed_step<S, T>(source: S, size: usize, step: usize) -> Result<Vec<Vec<T>>, WindowError>
where
    S: IntoIterator<Item = T>,
    T: Clone,
{
    windowed_map(source, size, step, |window, _| window.to_vec())
}

/// Emit `selector(window, window_index)` for every window of `size` elements
/// advancing by `step`. The window index is zero-based and increments once
/// per emitted window.
pub fn windowed_map<S, T, R, F>(
    source: S,
    size: usize,
    step: usize,
    mut selector: F,
) -> Result<Vec<R>, WindowError>
where
    S: IntoIterator<Item = T>,
    F: FnMut(&[T], usize) -> R,
{
    if size == 0 {
        return Err(WindowError::WindowSizeZero);
    }
    if step == 0 {
        return Err(WindowError::StepZero);
    }

    let values: Vec<T> = source.into_iter().collect();
    let n = values.len();

    let mut out = Vec::new();
    let mut start = 0usize;
    let mut window_index = 0usize;
    while start + size <= n {
        out.push(selector(&values[start..start + size], window_index));
        window_index += 1;
        start += step;
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Offset accessors
// ---------------------------------------------------------------------------

/// For each position, the value `offset` positions behind, or `None` when
/// there is no such position. Output length always equals input length.
pub fn lag<S, T>(source: S, offset: usize) -> Vec<Option<T>>
where
    S: IntoIterator<Item = T>,
    T: Clone,
{
    let values: Vec<T> = source.into_iter().collect();
    (0..values.len())
        .map(|i| i.checked_sub(offset).map(|j| values[j].clone()))
        .collect()
}

/// `lag` with an explicit fill value at the boundary instead of `None`.
pub fn lag_or<S, T>(source: S, offset: usize, fill: T) -> Vec<T>
where
    S: IntoIterator<Item = T>,
    T: Clone,
{
    lag(source, offset)
        .into_iter()
        .map(|v| v.unwrap_or_else(|| fill.clone()))
        .collect()
}

/// For each position, the value `offset` positions ahead, or `None` past the
/// end. Output length always equals input length.
pub fn lead<S, T>(source: S, offset: usize) -> Vec<Option<T>>
where
    S: IntoIterator<Item = T>,
    T: Clone,
{
    let values: Vec<T> = source.into_iter().collect();
    let n = values.len();
    (0..n)
        .map(|i| {
            let j = i.checked_add(offset)?;
            if j < n { Some(values[j].clone()) } else { None }
        })
        .collect()
}

/// `lead` with an explicit fill value at the boundary instead of `None`.
pub fn lead_or<S, T>(source: S, offset: usize, fill: T) -> Vec<T>
where
    S: IntoIterator<Item = T>,
    T: Clone,
{
    lead(source, offset)
        .into_iter()
        .map(|v| v.unwrap_or_else(|| fill.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed chunking
// ---------------------------------------------------------------------------

/// Partition the source in order into consecutive chunks of `size` elements.
///
/// The final chunk holds `n mod size` elements when the length does not
/// divide evenly; every other chunk is full. Chunk count is `ceil(n / size)`.
pub fn buffer<S, T>(source: S, size: usize) -> Result<Vec<Vec<T>>, WindowError>
where
    S: IntoIterator<Item = T>,
{
    if size == 0 {
        return Err(WindowError::ChunkSizeZero);
    }

    let mut chunks: Vec<Vec<T>> = Vec::new();
    let mut current: Vec<T> = Vec::with_capacity(size);
    for element in source {
        current.push(element);
        if current.len() == size {
            chunks.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    Ok(chunks)
}
