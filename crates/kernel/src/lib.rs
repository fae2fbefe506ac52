//! Sparse Life kernel: neighbourhoods, world building, generation stepping.
//!
//! # Invariants
//! - A [`World`] stores only live cells; dead cells are absent.
//! - [`propagate`] and [`tick`] are pure: they return new values and never
//!   mutate their input.
//! - A cell never counts itself as its own neighbour.

pub mod dense;
pub mod generation;
pub mod neighbours;
pub mod pattern;
pub mod rule;
pub mod simulation;
pub mod world;

pub use dense::Dense;
pub use generation::{propagate, tick, tick_with};
pub use neighbours::{Neighbourhood, neighbour_coords};
pub use pattern::{Pattern, PatternError};
pub use rule::{Rule, RuleError};
pub use simulation::{Outcome, RunReport, Simulation, SimulationConfig};
pub use sparselife_common::{Coord, CoordError};
pub use world::{ALIVE, NeighbourCounts, World};
