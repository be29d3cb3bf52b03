use std::collections::BTreeMap;

use super::Point;

/// Points bucketed by row: `y -> ascending x`. Each entry is one terminal line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMap {
    rows: BTreeMap<i32, Vec<i32>>,
}

impl RowMap {
    /// Group points by y. Input order does not matter; every row is sorted
    /// once all points are in.
    pub fn group(points: &[Point]) -> Self {
        let mut rows: BTreeMap<i32, Vec<i32>> = BTreeMap::new();

        for p in points {
            rows.entry(p.y).or_default().push(p.x);
        }

        for xs in rows.values_mut() {
            xs.sort_unstable();
        }

        Self { rows }
    }

    /// Occupied columns of row `y`; empty when nothing lands there.
    pub fn row(&self, y: i32) -> &[i32] {
        self.rows.get(&y).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn max_y(&self) -> Option<i32> {
        self.rows.keys().next_back().copied()
    }

    /// Widest occupied column across all rows.
    pub fn max_x(&self) -> Option<i32> {
        self.rows.values().filter_map(|xs| xs.last().copied()).max()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
