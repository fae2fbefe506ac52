use crate::neighbours::Neighbourhood;
use crate::rule::Rule;
use crate::world::{NeighbourCounts, World};

/// Count, for every cell next to a live cell, how many live neighbours it has.
///
/// Each live cell adds one to every member of its Moore neighbourhood except
/// itself. The result includes dead cells bordering the live set and omits
/// live cells with no live neighbours.
pub fn propagate(world: &World) -> NeighbourCounts {
    let _span = tracing::debug_span!("propagate", population = world.population()).entered();
    let mut counts = NeighbourCounts::new();
    for cell in world.cells() {
        for neighbour in Neighbourhood::new(cell) {
            if neighbour != *cell {
                counts.increment(neighbour);
            }
        }
    }
    tracing::trace!(candidates = counts.len(), "propagate complete");
    counts
}

/// Advance one generation under Conway's rule (B3/S23).
pub fn tick(world: &World) -> World {
    tick_with(world, &Rule::conway())
}

/// Advance one generation under an arbitrary birth/survival rule.
///
/// Returns a new world; `world` is left untouched.
pub fn tick_with(world: &World, rule: &Rule) -> World {
    let _span = tracing::debug_span!("tick", %rule).entered();
    let next: World = propagate(world)
        .iter()
        .filter(|(cell, count)| rule.fires(world.is_alive(cell), *count))
        .map(|(cell, _)| cell.clone())
        .collect();
    tracing::debug!(
        before = world.population(),
        after = next.population(),
        "generation advanced"
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::Dense;
    use proptest::prelude::*;

    fn flat(values: &[i64]) -> World {
        World::from_dense(&Dense::flat(values))
    }

    #[test]
    fn empty_world_propagates_to_nothing() {
        assert!(propagate(&World::new()).is_empty());
        assert!(tick(&World::new()).is_empty());
    }

    #[test]
    fn lone_cell_counts_its_neighbours_but_not_itself() {
        let counts = propagate(&flat(&[0, 1, 0]));
        assert_eq!(counts, NeighbourCounts::from_dense(&Dense::flat(&[1, 0, 1])));
        assert_eq!(counts.get(&[1]), 0);
    }

    #[test]
    fn lone_cell_dies() {
        assert!(tick(&flat(&[0, 1, 0])).is_empty());
    }

    #[test]
    fn tick_does_not_mutate_input() {
        let w = World::from_cells([[0, 0], [1, 0], [2, 0]]);
        let before = w.clone();
        let _ = tick(&w);
        assert_eq!(w, before);
    }

    #[test]
    fn block_is_still_life() {
        let block = World::from_cells([[0, 0], [1, 0], [0, 1], [1, 1]]);
        assert_eq!(tick(&block), block);
    }

    #[test]
    fn blinker_has_period_two() {
        let horizontal = World::from_cells([[0, 1], [1, 1], [2, 1]]);
        let vertical = World::from_cells([[1, 0], [1, 1], [1, 2]]);
        assert_eq!(tick(&horizontal), vertical);
        assert_eq!(tick(&vertical), horizontal);
    }

    #[test]
    fn custom_rule_changes_outcome() {
        // Under B1/S the lone cell's neighbours are all born and it dies.
        let rule: Rule = "B1/S".parse().unwrap();
        let next = tick_with(&flat(&[0, 1, 0]), &rule);
        assert_eq!(next, World::from_cells([[0], [2]]));
    }

    #[test]
    fn cells_on_the_lattice_edge_propagate() {
        let top = World::from_cells([[i64::MAX]]);
        let counts = propagate(&top);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&[i64::MAX - 1]), 1);
        assert!(tick(&top).is_empty());

        let corner = World::from_cells([[i64::MIN, i64::MIN], [i64::MIN + 1, i64::MIN]]);
        let counts = propagate(&corner);
        assert_eq!(counts.get(&[i64::MIN, i64::MIN]), 1);
        assert_eq!(counts.get(&[i64::MIN + 2, i64::MIN + 1]), 1);
        assert_eq!(counts.len(), 6);
        assert!(tick(&corner).is_empty());
    }

    proptest! {
        #[test]
        fn self_is_never_counted(cells in prop::collection::btree_set((-6i64..6, -6i64..6), 0..20)) {
            let world = World::from_cells(cells.iter().map(|&(x, y)| [x, y]));
            let counts = propagate(&world);
            for (cell, count) in counts.iter() {
                let expected = crate::neighbours::neighbour_coords(cell)
                    .iter()
                    .filter(|n| n.as_slice() != cell.as_slice() && world.is_alive(n))
                    .count() as u32;
                prop_assert_eq!(count, expected);
            }
            for cell in world.cells() {
                let live_neighbours = crate::neighbours::neighbour_coords(cell)
                    .iter()
                    .filter(|n| n.as_slice() != cell.as_slice() && world.is_alive(n))
                    .count() as u32;
                prop_assert_eq!(counts.get(cell), live_neighbours);
            }
        }

        #[test]
        fn conway_rule_matches_tick(cells in prop::collection::btree_set((-5i64..5, -5i64..5), 0..25)) {
            let world = World::from_cells(cells.iter().map(|&(x, y)| [x, y]));
            prop_assert_eq!(tick_with(&world, &Rule::conway()), tick(&world));
        }
    }
}
