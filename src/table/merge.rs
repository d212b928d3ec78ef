//! Paste merging
//!
//! Overlays an incoming detached grid onto an existing one at an anchor.
//! One rule covers overwriting in place, widening past the last column,
//! growing past the last row, and pasting left of or above the table.

use super::model::{Coordinate, DetachedGrid};

/// Where the incoming grid's top-left cell lands, relative to the existing
/// grid's origin; negative values paste left of or above the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchor {
    pub column: isize,
    pub row: isize,
}

impl Anchor {
    pub fn new(column: isize, row: isize) -> Self {
        Self { column, row }
    }
}

impl From<Coordinate> for Anchor {
    fn from(at: Coordinate) -> Self {
        Self {
            column: isize::try_from(at.column).unwrap_or(isize::MAX),
            row: isize::try_from(at.row).unwrap_or(isize::MAX),
        }
    }
}

/// Origins of both grids inside the merged result
///
/// The smaller of the existing origin and the anchor becomes `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub existing: Coordinate,
    pub incoming: Coordinate,
}

impl Placement {
    pub fn for_anchor(anchor: Anchor) -> Self {
        let shift = |v: isize| (v.unsigned_abs(), v < 0);
        let (columns, left) = shift(anchor.column);
        let (rows, above) = shift(anchor.row);
        Self {
            existing: Coordinate::new(
                if left { columns } else { 0 },
                if above { rows } else { 0 },
            ),
            incoming: Coordinate::new(
                if left { 0 } else { columns },
                if above { 0 } else { rows },
            ),
        }
    }
}

/// Merge `incoming` over `existing` at `anchor`
///
/// The result is `max` of both extents in each direction; incoming cells
/// overwrite existing ones and cells neither grid writes stay empty.
pub fn merge(existing: &DetachedGrid, incoming: &DetachedGrid, anchor: Anchor) -> DetachedGrid {
    let placement = Placement::for_anchor(anchor);

    let width = (placement.existing.column + existing.column_count())
        .max(placement.incoming.column + incoming.column_count());
    let height = (placement.existing.row + existing.row_count())
        .max(placement.incoming.row + incoming.row_count());

    let mut merged = DetachedGrid::with_size(width, height);
    feed(&mut merged, existing, placement.existing);
    feed(&mut merged, incoming, placement.incoming);

    tracing::debug!(
        width,
        height,
        grew = width > existing.column_count() || height > existing.row_count(),
        "merged pasted cells"
    );
    merged
}

fn feed(target: &mut DetachedGrid, source: &DetachedGrid, origin: Coordinate) {
    for (y, row) in source.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            target.set(Coordinate::new(origin.column + x, origin.row + y), cell.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> DetachedGrid {
        DetachedGrid::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_merge_overwrites_within_bounds() {
        let existing = grid(&[&["a", "b"], &["c", "d"]]);
        let merged = merge(&existing, &grid(&[&["X"]]), Anchor::new(1, 1));
        assert_eq!(merged, grid(&[&["a", "b"], &["c", "X"]]));
    }

    #[test]
    fn test_merge_widens_past_last_column() {
        let existing = grid(&[&["a", "b", "c"], &["1", "2", "3"], &["4", "5", "6"]]);
        let incoming = grid(&[&["x", "y"], &["z", "w"]]);
        let merged = merge(&existing, &incoming, Anchor::new(3, 0));

        assert_eq!(
            merged,
            grid(&[
                &["a", "b", "c", "x", "y"],
                &["1", "2", "3", "z", "w"],
                &["4", "5", "6", "", ""],
            ])
        );
    }

    #[test]
    fn test_merge_grows_downward() {
        let existing = grid(&[&["a", "b"]]);
        let merged = merge(&existing, &grid(&[&["x"], &["y"]]), Anchor::new(1, 1));
        assert_eq!(merged, grid(&[&["a", "b"], &["", "x"], &["", "y"]]));
    }

    #[test]
    fn test_merge_left_of_table_shifts_existing() {
        let existing = grid(&[&["a"], &["b"]]);
        let incoming = grid(&[&["x", "y"]]);
        let merged = merge(&existing, &incoming, Anchor::new(-2, 0));
        assert_eq!(merged, grid(&[&["x", "y", "a"], &["", "", "b"]]));
    }

    #[test]
    fn test_merge_above_table() {
        let existing = grid(&[&["a"]]);
        let merged = merge(&existing, &grid(&[&["x"]]), Anchor::new(0, -1));
        assert_eq!(merged, grid(&[&["x"], &["a"]]));
    }

    #[test]
    fn test_placement_normalizes_origin() {
        let placement = Placement::for_anchor(Anchor::new(-1, 2));
        assert_eq!(placement.existing, Coordinate::new(1, 0));
        assert_eq!(placement.incoming, Coordinate::new(0, 2));
    }
}
