//! Shared types for the sparselife workspace.
//!
//! # Invariants
//! - `parse(&format(c)) == c` for every coordinate `c`.
//! - Distinct coordinates never share a key.

pub mod coord;

pub use coord::{Coord, CoordError, KEY_DELIMITER, format, parse};
