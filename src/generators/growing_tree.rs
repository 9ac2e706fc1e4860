use rand::Rng;

use super::{Step, carve, choose, neighbors_where_visited, random_coord};
use crate::{
    error::{MazeError, Result},
    maze::{Coord, Grid, Progress},
};

/// Grows the maze from a list of active rooms, picking either a random active room or the
/// newest one as the next pivot with even odds.
///
/// Random draws per step: on the first step a column then a row; then one boolean; then an
/// index into the active list if the boolean came up true; then one neighbor pick if the
/// pivot has unvisited neighbors.
#[derive(Default)]
pub struct GrowingTree {
    active: Vec<Coord>,
}

impl Step for GrowingTree {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        _start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        if !grid.has_any_visited() {
            self.active.clear();
            self.active.push(random_coord(grid, rng));
        }
        if self.active.is_empty() {
            return Err(MazeError::EmptyChoice("growing tree active rooms"));
        }

        let index = if rng.random_bool(0.5) {
            rng.random_range(0..self.active.len())
        } else {
            self.active.len() - 1
        };
        let pivot = self.active[index];

        let options = neighbors_where_visited(grid, pivot, false);
        if options.is_empty() {
            // Order matters: the last entry is the newest room
            self.active.remove(index);
        } else {
            let next = choose(rng, &options, "growing tree neighbors")?;
            carve(grid, pivot, next)?;
            self.active.push(next);
        }

        progress.set_count(grid.visited_count());
        Ok(())
    }
}
