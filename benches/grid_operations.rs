//! Benchmarks for table parsing and structural operations
//!
//! Run with: cargo bench grid_operations

use pipegrid::table::{
    decode, encode, format_grid, merge, parse_text, shift, Anchor, ByteRange, Coordinate,
    Direction, Grid, Selection,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn ragged_table(rows: usize) -> String {
    (0..rows)
        .map(|y| format!("|{y}|value {}|{}|  x |", y * 7, "w".repeat(y % 13)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn table(rows: usize) -> Grid {
    let raw = parse_text(&ragged_table(rows), 0, '|').unwrap();
    parse_text(&format_grid(&raw), 0, '|').unwrap()
}

// ============================================================================
// Parsing and formatting
// ============================================================================

#[divan::bench(args = [10, 100, 500])]
fn parse(bencher: divan::Bencher, rows: usize) {
    let text = ragged_table(rows);
    bencher.bench(|| parse_text(divan::black_box(&text), 0, '|'));
}

#[divan::bench(args = [10, 100, 500])]
fn format(bencher: divan::Bencher, rows: usize) {
    let grid = parse_text(&ragged_table(rows), 0, '|').unwrap();
    bencher.bench(|| format_grid(divan::black_box(&grid)));
}

// ============================================================================
// Structural operations
// ============================================================================

#[divan::bench(args = [10, 100, 500])]
fn shift_column(bencher: divan::Bencher, rows: usize) {
    let grid = table(rows);
    bencher.bench(|| shift(&grid, Coordinate::new(1, rows / 2), Direction::Right));
}

#[divan::bench(args = [10, 100, 500])]
fn shift_row(bencher: divan::Bencher, rows: usize) {
    let grid = table(rows);
    bencher.bench(|| shift(&grid, Coordinate::new(0, rows / 2), Direction::Down));
}

#[divan::bench(args = [10, 100, 500])]
fn copy_then_merge(bencher: divan::Bencher, rows: usize) {
    let grid = table(rows);
    let existing = grid.to_detached();
    bencher.bench(|| {
        let copied = encode(&grid.extract(Selection::columns(1, 2, rows)));
        let incoming = decode(&copied, '|');
        merge(&existing, &incoming, Anchor::new(3, 0))
    });
}

#[divan::bench]
fn locate_cell_in_500_rows(bencher: divan::Bencher) {
    let grid = table(500);
    let middle = grid.range.start + grid.range.len() / 2;
    bencher.bench(|| pipegrid::table::locate(&grid, divan::black_box(middle)));
}

#[divan::bench]
fn parse_inside_document() {
    let document = format!("Feature: x\n\n{}\n\nThen done", ragged_table(200));
    let grid = pipegrid::table::parse_table(&document, ByteRange::new(0, document.len()), '|');
    divan::black_box(grid);
}
