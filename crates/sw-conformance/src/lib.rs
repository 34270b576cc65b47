#![forbid(unsafe_code)]

//! Shared fixtures and reference oracles for the SliceWise conformance
//! suites. The property and scenario tests under `tests/` check every
//! operator against these independently computed expectations.

/// One row of the sales fixture used by the window-function scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRow {
    pub region: &'static str,
    pub month: u32,
    pub amount: i64,
}

impl SaleRow {
    #[must_use]
    pub fn new(region: &'static str, month: u32, amount: i64) -> Self {
        Self {
            region,
            month,
            amount,
        }
    }
}

/// Regions "east" (months 1,2) and "west" (months 1,2,3), delivered in a
/// deliberately shuffled source order.
#[must_use]
pub fn sales_fixture() -> Vec<SaleRow> {
    vec![
        SaleRow::new("east", 1, 10),
        SaleRow::new("west", 2, 25),
        SaleRow::new("east", 2, 20),
        SaleRow::new("west", 1, 15),
        SaleRow::new("west", 3, 35),
    ]
}

/// File-name fixture whose extension key produces 5 runs but 3 global groups.
#[must_use]
pub fn file_fixture() -> Vec<&'static str> {
    vec!["a.xls", "b.xls", "a.pdf", "c.jpg", "d.pdf", "e.xls"]
}

/// Extension of a file name, empty when there is no dot.
#[must_use]
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map_or("", |(_, ext)| ext)
}

/// Reference count of sliding windows of `size` advancing by `step` over a
/// source of length `n`.
#[must_use]
pub fn expected_window_count(n: usize, size: usize, step: usize) -> usize {
    if n < size { 0 } else { (n - size) / step + 1 }
}

/// Reference count of maximal contiguous equal-key segments.
#[must_use]
pub fn segment_count<K: PartialEq>(keys: &[K]) -> usize {
    let mut count = 0;
    let mut previous: Option<&K> = None;
    for key in keys {
        if previous != Some(key) {
            count += 1;
            previous = Some(key);
        }
    }
    count
}
