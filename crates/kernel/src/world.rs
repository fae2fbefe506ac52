use serde::{Deserialize, Serialize};
use sparselife_common::{Coord, CoordError};
use std::collections::BTreeMap;

use crate::dense::Dense;

/// State value stored for every live cell.
pub const ALIVE: u8 = 1;

/// A sparse set of live cells on the integer lattice.
///
/// Only live cells are stored; absence means dead. Uses BTreeMap so that
/// iteration, serialization and [`World::state_hash`] are deterministic.
///
/// Serializes as an object of coordinate keys, e.g. `{"0,1": 1, "1,0": 1}`.
///
/// All coordinates in one world must have the same number of axes. This is
/// a precondition of every operation and is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u8>", into = "BTreeMap<String, u8>")]
pub struct World {
    cells: BTreeMap<Coord, u8>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a world from a dense array, keeping only nonzero cells.
    pub fn from_dense(dense: &Dense) -> Self {
        dense.nonzero().into_iter().map(|(coord, _)| coord).collect()
    }

    /// Build a world with exactly the given live cells.
    pub fn from_cells<const N: usize>(cells: impl IntoIterator<Item = [i64; N]>) -> Self {
        cells.into_iter().map(|c| Coord::from_slice(&c)).collect()
    }

    /// Whether the cell at `coord` is alive.
    pub fn is_alive(&self, coord: &[i64]) -> bool {
        self.cells.contains_key(coord)
    }

    /// Cell state at `coord`: [`ALIVE`] or 0.
    pub fn get(&self, coord: &[i64]) -> u8 {
        self.cells.get(coord).copied().unwrap_or(0)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Live cells in coordinate order.
    pub fn cells(&self) -> impl Iterator<Item = &Coord> + '_ {
        self.cells.keys()
    }

    /// Live cells with their state value.
    pub fn iter(&self) -> impl Iterator<Item = (&Coord, u8)> + '_ {
        self.cells.iter().map(|(c, v)| (c, *v))
    }

    /// Canonical string keys of the live cells, in coordinate order.
    pub fn keys(&self) -> Vec<String> {
        self.cells.keys().map(|c| sparselife_common::format(c)).collect()
    }

    /// Number of axes, or `None` for an empty world.
    pub fn dimensions(&self) -> Option<usize> {
        self.cells.keys().next().map(|c| c.len())
    }

    /// Per-axis inclusive minimum and maximum over the live cells.
    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        let mut cells = self.cells.keys();
        let first = cells.next()?;
        let mut lo = first.clone();
        let mut hi = first.clone();
        for c in cells {
            for ((l, h), &v) in lo.iter_mut().zip(hi.iter_mut()).zip(c) {
                *l = (*l).min(v);
                *h = (*h).max(v);
            }
        }
        Some((lo, hi))
    }

    /// Compute a deterministic hash of the live set for cycle detection.
    /// Uses canonical (BTreeMap) iteration order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for coord in self.cells.keys() {
            mix(&mut h, &(coord.len() as u64).to_le_bytes());
            for v in coord {
                mix(&mut h, &v.to_le_bytes());
            }
        }
        h
    }
}

impl FromIterator<Coord> for World {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|c| (c, ALIVE)).collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, u8>> for World {
    type Error = CoordError;

    /// Zero-valued entries are dropped so the sparse invariant holds.
    fn try_from(map: BTreeMap<String, u8>) -> Result<Self, Self::Error> {
        let mut cells = BTreeMap::new();
        for (key, value) in map {
            let coord = sparselife_common::parse(&key)?;
            if value != 0 {
                cells.insert(coord, ALIVE);
            }
        }
        Ok(Self { cells })
    }
}

impl From<World> for BTreeMap<String, u8> {
    fn from(world: World) -> Self {
        world
            .cells
            .into_iter()
            .map(|(c, v)| (sparselife_common::format(&c), v))
            .collect()
    }
}

/// Live-neighbour counts produced by [`crate::propagate`].
///
/// Holds an entry for every cell with at least one live neighbour; cells
/// with none are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighbourCounts {
    counts: BTreeMap<Coord, u32>,
}

impl NeighbourCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a count map from a dense array of counts; zeros are omitted.
    /// Negative entries are taken by magnitude, saturating at `u32::MAX`.
    pub fn from_dense(dense: &Dense) -> Self {
        Self {
            counts: dense
                .nonzero()
                .into_iter()
                .map(|(c, v)| (c, u32::try_from(v.unsigned_abs()).unwrap_or(u32::MAX)))
                .collect(),
        }
    }

    pub(crate) fn increment(&mut self, coord: Coord) {
        *self.counts.entry(coord).or_insert(0) += 1;
    }

    /// Count at `coord`, 0 when absent.
    pub fn get(&self, coord: &[i64]) -> u32 {
        self.counts.get(coord).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Coord, u32)> + '_ {
        self.counts.iter().map(|(c, n)| (c, *n))
    }
}
