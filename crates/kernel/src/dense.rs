use serde::{Deserialize, Serialize};
use sparselife_common::Coord;

/// A dense, nested-array description of cell values.
///
/// `Cells` is one axis: the value at index `i` sits at coordinate `[i]`.
/// `Rows` nests one axis deeper; row `r` contributes `r` as the *next*
/// axis after those of its contents. A grid `Rows([Cells(row0), ...])`
/// therefore places `rows[y][x]` at `[x, y]`, and a stack of grids places
/// `planes[z][y][x]` at `[x, y, z]`.
///
/// Deserializes untagged from nested JSON/YAML arrays. Rows are expected to
/// have matching depth; ragged lengths are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dense {
    Cells(Vec<i64>),
    Rows(Vec<Dense>),
}

impl Default for Dense {
    fn default() -> Self {
        Self::Cells(Vec::new())
    }
}

impl Dense {
    /// One-dimensional input.
    pub fn flat(values: &[i64]) -> Self {
        Self::Cells(values.to_vec())
    }

    /// Two-dimensional input, outer slice indexed by row (`y`).
    pub fn grid<const W: usize>(rows: &[[i64; W]]) -> Self {
        Self::Rows(rows.iter().map(|row| Self::Cells(row.to_vec())).collect())
    }

    /// Two-dimensional input from owned rows, which may differ in length.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Self {
        Self::Rows(rows.into_iter().map(Self::Cells).collect())
    }

    /// Number of axes, judged from the first row at each level.
    pub fn rank(&self) -> usize {
        match self {
            Self::Cells(_) => 1,
            Self::Rows(rows) => 1 + rows.first().map_or(1, Dense::rank),
        }
    }

    /// Whether the input holds no values at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Cells(values) => values.is_empty(),
            Self::Rows(rows) => rows.iter().all(Dense::is_empty),
        }
    }

    /// Every nonzero value with its coordinate, in row-major order.
    /// Negative values count as nonzero.
    pub fn nonzero(&self) -> Vec<(Coord, i64)> {
        let mut out = Vec::new();
        self.walk(&[], &mut out);
        out
    }

    fn walk(&self, outer: &[i64], out: &mut Vec<(Coord, i64)>) {
        match self {
            Self::Cells(values) => {
                for (i, &value) in values.iter().enumerate() {
                    if value != 0 {
                        let mut coord = Coord::with_capacity(outer.len() + 1);
                        coord.push(i as i64);
                        coord.extend_from_slice(outer);
                        out.push((coord, value));
                    }
                }
            }
            Self::Rows(rows) => {
                let mut inner = Vec::with_capacity(outer.len() + 1);
                for (r, row) in rows.iter().enumerate() {
                    inner.clear();
                    inner.push(r as i64);
                    inner.extend_from_slice(outer);
                    row.walk(&inner, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(dense: &Dense) -> Vec<(Vec<i64>, i64)> {
        dense
            .nonzero()
            .into_iter()
            .map(|(c, v)| (c.to_vec(), v))
            .collect()
    }

    #[test]
    fn flat_uses_index_as_coordinate() {
        let d = Dense::flat(&[0, 1, 1, 0, 1]);
        assert_eq!(d.rank(), 1);
        assert_eq!(coords(&d), vec![(vec![1], 1), (vec![2], 1), (vec![4], 1)]);
    }

    #[test]
    fn grid_puts_column_before_row() {
        let d = Dense::grid(&[[0, 1], [1, 0]]);
        assert_eq!(d.rank(), 2);
        assert_eq!(coords(&d), vec![(vec![1, 0], 1), (vec![0, 1], 1)]);
    }

    #[test]
    fn nested_planes_generalise_to_three_axes() {
        let d = Dense::Rows(vec![
            Dense::grid(&[[0, 0], [0, 0]]),
            Dense::grid(&[[0, 0], [0, 7]]),
        ]);
        assert_eq!(d.rank(), 3);
        assert_eq!(coords(&d), vec![(vec![1, 1, 1], 7)]);
    }

    #[test]
    fn empty_inputs() {
        assert!(Dense::default().is_empty());
        assert!(Dense::Rows(vec![]).is_empty());
        assert!(Dense::grid::<0>(&[]).nonzero().is_empty());
        assert!(Dense::from_rows(vec![vec![], vec![]]).is_empty());
        assert!(!Dense::flat(&[0]).is_empty());
    }

    #[test]
    fn deserializes_from_nested_json_arrays() {
        let flat: Dense = serde_json::from_str("[0, 1]").unwrap();
        assert_eq!(flat, Dense::flat(&[0, 1]));

        let grid: Dense = serde_json::from_str("[[0, 1], [1, 0]]").unwrap();
        assert_eq!(grid, Dense::grid(&[[0, 1], [1, 0]]));

        let empty: Dense = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty());

        assert!(serde_json::from_str::<Dense>("[[0, 1], 1]").is_err());
    }

    #[test]
    fn negative_values_are_nonzero() {
        let d: Dense = serde_json::from_str("[-1, 0, 1]").unwrap();
        assert_eq!(coords(&d), vec![(vec![0], -1), (vec![2], 1)]);
    }
}
