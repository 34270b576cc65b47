#![forbid(unsafe_code)]

//! End-to-end scenarios for the SliceWise operators, exercised together the
//! way a caller composes them: grouping feeding window arithmetic feeding
//! per-row analytics.

use sw_analytic::{WindowFrame, window_by};
use sw_conformance::{SaleRow, extension_of, file_fixture, sales_fixture};
use sw_group::{group_by, group_by_select, partition_by, partition_by_select};
use sw_window::{buffer, lag_or, windowed_map};

// ---------------------------------------------------------------------------
// Scenario 1: fixed chunking
// ---------------------------------------------------------------------------

#[test]
fn e2e_scenario1_chunking_one_to_ten_by_three() {
    let chunks = buffer(1..=10, 3).expect("chunking");
    assert_eq!(
        chunks,
        vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9], vec![10]]
    );
}

// ---------------------------------------------------------------------------
// Scenario 2: runs vs. global groups over the same key
// ---------------------------------------------------------------------------

#[test]
fn e2e_scenario2_extension_runs_differ_from_groups() {
    let files = file_fixture();

    // Adjacency-sensitive: 5 runs, the pdf and xls keys reappear.
    let runs = partition_by(files.clone(), |f| extension_of(f));
    let run_shapes: Vec<(&str, Vec<&str>)> =
        runs.into_iter().map(|r| r.into_pair()).collect();
    assert_eq!(
        run_shapes,
        vec![
            ("xls", vec!["a.xls", "b.xls"]),
            ("pdf", vec!["a.pdf"]),
            ("jpg", vec!["c.jpg"]),
            ("pdf", vec!["d.pdf"]),
            ("xls", vec!["e.xls"]),
        ]
    );

    // Global: 3 groups, each holding every matching file.
    let groups = group_by(files, |f| extension_of(f));
    let group_shapes: Vec<(&str, Vec<&str>)> =
        groups.into_iter().map(|g| g.into_pair()).collect();
    assert_eq!(
        group_shapes,
        vec![
            ("xls", vec!["a.xls", "b.xls", "e.xls"]),
            ("pdf", vec!["a.pdf", "d.pdf"]),
            ("jpg", vec!["c.jpg"]),
        ]
    );
}

// ---------------------------------------------------------------------------
// Scenario 3: trailing window sums per region
// ---------------------------------------------------------------------------

#[test]
fn e2e_scenario3_trailing_sum_per_region() {
    let frame = WindowFrame::new(1, 0).expect("frame");
    let sums = window_by(
        sales_fixture(),
        |r| r.region,
        |r| r.month,
        frame,
        |ctx| {
            (
                *ctx.partition_key,
                ctx.row.month,
                ctx.window.iter().map(|r| r.amount).collect::<Vec<i64>>(),
            )
        },
    );

    assert_eq!(
        sums,
        vec![
            ("east", 1, vec![]),
            ("east", 2, vec![10, 20]),
            ("west", 1, vec![]),
            ("west", 2, vec![15, 25]),
            ("west", 3, vec![25, 35]),
        ]
    );
}

// ---------------------------------------------------------------------------
// Scenario 4: composed pipeline
// ---------------------------------------------------------------------------

#[test]
fn e2e_scenario4_grouped_totals_feed_window_arithmetic() {
    // Monthly totals per region via the result-selector form.
    let totals: Vec<(&str, i64)> = group_by_select(
        sales_fixture(),
        |r| r.region,
        |key, members| (*key, members.iter().map(|r| r.amount).sum()),
    );
    assert_eq!(totals, vec![("east", 30), ("west", 75)]);

    // Month-over-month deltas on one region's ordered amounts.
    let west: Vec<i64> = {
        let mut rows: Vec<SaleRow> = sales_fixture()
            .into_iter()
            .filter(|r| r.region == "west")
            .collect();
        rows.sort_by_key(|r| r.month);
        rows.into_iter().map(|r| r.amount).collect()
    };
    let previous = lag_or(west.clone(), 1, 0);
    let deltas: Vec<i64> = west
        .iter()
        .zip(&previous)
        .map(|(now, before)| now - before)
        .collect();
    assert_eq!(deltas, vec![15, 10, 10]);

    // Pairwise means over the same series via the window selector form.
    let means = windowed_map(west, 2, 1, |w, _| w.iter().sum::<i64>() / w.len() as i64)
        .expect("windowed");
    assert_eq!(means, vec![20, 30]);
}

// ---------------------------------------------------------------------------
// Scenario 5: run summaries via the result-selector form
// ---------------------------------------------------------------------------

#[test]
fn e2e_scenario5_run_summaries() {
    let summary = partition_by_select(file_fixture(), |f| extension_of(f), |key, members| {
        format!("{key}x{}", members.len())
    });
    assert_eq!(summary, vec!["xlsx2", "pdfx1", "jpgx1", "pdfx2", "xlsx1"]);
}
