use sparselife_common::Coord;

/// Iterator over the Moore neighbourhood of a coordinate, centre included.
///
/// Yields `3^N` coordinates for an `N`-axis centre. The first axis varies
/// fastest and the last axis slowest, so for `[x, y]` the order is the
/// `y - 1` row (`x - 1, x, x + 1`), then the `y` row, then the `y + 1` row.
///
/// The lattice ends at `i64::MIN` and `i64::MAX`: members that would step
/// past either end are skipped, so a centre on the edge has fewer than
/// `3^N` neighbours. Order among the remaining members is unchanged.
#[derive(Debug, Clone)]
pub struct Neighbourhood<'a> {
    centre: &'a [i64],
    next: usize,
    len: usize,
}

impl<'a> Neighbourhood<'a> {
    pub fn new(centre: &'a [i64]) -> Self {
        Self {
            centre,
            next: 0,
            len: 3usize.saturating_pow(centre.len() as u32),
        }
    }

    /// The member at `index` in enumeration order, or `None` when it lies
    /// off the lattice.
    fn coord_at(&self, index: usize) -> Option<Coord> {
        let mut rest = index;
        self.centre
            .iter()
            .map(|&v| {
                let offset = (rest % 3) as i64 - 1;
                rest /= 3;
                v.checked_add(offset)
            })
            .collect()
    }
}

impl Iterator for Neighbourhood<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        while self.next < self.len {
            let index = self.next;
            self.next += 1;
            if let Some(coord) = self.coord_at(index) {
                return Some(coord);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.len - self.next))
    }
}

impl std::iter::FusedIterator for Neighbourhood<'_> {}

/// Every coordinate within one step of `coord` on each axis, `coord` included.
pub fn neighbour_coords(coord: &[i64]) -> Vec<Coord> {
    Neighbourhood::new(coord).collect()
}
