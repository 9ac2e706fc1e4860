use rand::Rng;

use super::{Step, carve, choose, union_find::UnionFind};
use crate::{
    error::Result,
    maze::{Coord, Grid, Progress},
};

/// Merges sets of connected rooms until one remains, always growing one of the smallest sets.
///
/// Each step looks at the rooms that still border a different set, keeps those whose own set
/// is smallest, picks one at random and joins it to a random neighbor from another set.
/// Progress is `rooms - sets + 1`, reaching the goal exactly when a single set is left.
///
/// Random draws per step: one pick among the lightest rooms, then one among their foreign
/// neighbors.
pub struct Kruskal {
    sets: UnionFind,
}

impl Kruskal {
    pub fn new(grid: &Grid) -> Self {
        Kruskal {
            sets: UnionFind::new(grid.len()),
        }
    }

    /// Neighbors of `coord` that belong to a different set.
    fn foreign_neighbors(&mut self, grid: &Grid, coord: Coord) -> Vec<Coord> {
        let idx = grid.ravel_index(coord);
        grid.neighbors(coord)
            .map(|(_, c)| c)
            .filter(|&c| !self.sets.same(idx, grid.ravel_index(c)))
            .collect()
    }

    /// Rooms with a foreign neighbor whose set is as small as any such room's set.
    fn lightest_rooms(&mut self, grid: &Grid) -> Vec<Coord> {
        let mut lowest = usize::MAX;
        let mut rooms = Vec::new();
        for idx in 0..grid.len() {
            let weight = self.sets.size_of(idx);
            if weight > lowest {
                continue;
            }
            let coord = grid.unravel_index(idx);
            if self.foreign_neighbors(grid, coord).is_empty() {
                continue;
            }
            if weight < lowest {
                lowest = weight;
                rooms.clear();
            }
            rooms.push(coord);
        }
        rooms
    }
}

impl Step for Kruskal {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        _start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        let candidates = self.lightest_rooms(grid);
        let room = choose(rng, &candidates, "kruskal lightest rooms")?;
        let neighbors = self.foreign_neighbors(grid, room);
        let other = choose(rng, &neighbors, "kruskal foreign neighbors")?;

        self.sets
            .unite(grid.ravel_index(room), grid.ravel_index(other));
        carve(grid, room, other)?;

        progress.set_count(grid.len() - self.sets.set_count() + 1);
        Ok(())
    }
}
