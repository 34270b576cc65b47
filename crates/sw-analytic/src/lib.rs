#![forbid(unsafe_code)]

//! The window-function operator: partition a source by key, order each
//! partition, and compute a clamped frame of neighbouring rows for every row.
//!
//! `window_by` produces exactly one output per input row. Partitioning uses
//! global bucketing (`sw_group::group_by` semantics, raw key equality), never
//! run partitioning: rows with equal partition keys land together regardless
//! of position. Frame bounds saturate at the partition edges rather than
//! wrapping or erroring.

use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticError {
    #[error("frame bound `preceding` must be non-negative but was {value}")]
    NegativePreceding { value: i64 },
    #[error("frame bound `following` must be non-negative but was {value}")]
    NegativeFollowing { value: i64 },
}

/// The neighbourhood shape around each row: `preceding` rows behind,
/// `following` rows ahead, plus the row itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFrame {
    pub preceding: usize,
    pub following: usize,
    /// When set, a row whose clamped window holds fewer than
    /// `preceding + following + 1` rows sees an empty window instead of a
    /// partial one.
    pub require_full_window: bool,
}

impl Default for WindowFrame {
    fn default() -> Self {
        Self {
            preceding: 0,
            following: 0,
            require_full_window: true,
        }
    }
}

impl WindowFrame {
    /// Build a frame from signed bounds, rejecting negatives. Full windows
    /// are required by default.
    pub fn new(preceding: i64, following: i64) -> Result<Self, AnalyticError> {
        let preceding = usize::try_from(preceding)
            .map_err(|_| AnalyticError::NegativePreceding { value: preceding })?;
        let following = usize::try_from(following)
            .map_err(|_| AnalyticError::NegativeFollowing { value: following })?;
        Ok(Self {
            preceding,
            following,
            require_full_window: true,
        })
    }

    /// Same frame, but short boundary windows are passed through instead of
    /// being emptied.
    #[must_use]
    pub fn allow_partial(mut self) -> Self {
        self.require_full_window = false;
        self
    }

    /// Row count of an unclamped window.
    #[must_use]
    pub fn full_size(&self) -> usize {
        self.preceding
            .saturating_add(self.following)
            .saturating_add(1)
    }
}

/// Everything a window selector sees for one row of one partition.
#[derive(Debug, Clone, Copy)]
pub struct WindowContext<'a, K, T> {
    /// Raw partition key shared by every row of `partition`.
    pub partition_key: &'a K,
    /// The row this window surrounds.
    pub row: &'a T,
    /// Zero-based position of `row` within the sorted partition.
    pub index: usize,
    /// The full sorted partition.
    pub partition: &'a [T],
    /// The clamped frame slice around `row`; empty when the frame requires a
    /// full window the partition cannot supply.
    pub window: &'a [T],
}

/// Partition, order, and evaluate a window selector for every row.
///
/// Pipeline: global-group the source by `partition_key_selector` (first-
/// occurrence partition order), stably sort each partition's rows by
/// `order_key_selector` (ties keep source-relative order), then for each row
/// clamp `[index - preceding, index + following]` to the partition and invoke
/// `selector` with a borrowed `WindowContext`. Output cardinality always
/// equals input cardinality; callers needing a specific global output order
/// re-sort the result themselves.
pub fn window_by<S, T, K, O, R, FK, FO, FS>(
    source: S,
    partition_key_selector: FK,
    mut order_key_selector: FO,
    frame: WindowFrame,
    mut selector: FS,
) -> Vec<R>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    K: Hash + Eq + Clone,
    FO: FnMut(&T) -> O,
    O: Ord,
    FS: FnMut(WindowContext<'_, K, T>) -> R,
{
    let full_size = frame.full_size();
    let mut out = Vec::new();

    for group in sw_group::group_by(source, partition_key_selector) {
        let (partition_key, unsorted) = group.into_pair();

        // Decorate-sort-undecorate: the order selector runs once per row and
        // Vec's stable sort preserves source-relative order between ties.
        let mut decorated: Vec<(O, T)> = unsorted
            .into_iter()
            .map(|row| (order_key_selector(&row), row))
            .collect();
        decorated.sort_by(|a, b| a.0.cmp(&b.0));
        let rows: Vec<T> = decorated.into_iter().map(|(_, row)| row).collect();

        let n = rows.len();
        for index in 0..n {
            let start = index.saturating_sub(frame.preceding);
            let end = index.saturating_add(frame.following).min(n - 1);
            let clamped = &rows[start..=end];
            let window = if frame.require_full_window && clamped.len() < full_size {
                &rows[0..0]
            } else {
                clamped
            };
            out.push(selector(WindowContext {
                partition_key: &partition_key,
                row: &rows[index],
                index,
                partition: &rows,
                window,
            }));
        }
    }

    out
}
