use rand::Rng;

use super::{Step, choose, neighbors_where_visited, random_coord};
use crate::{
    error::{MazeError, Result},
    maze::{Coord, Grid, Progress},
};

/// Randomized Prim's: every step takes a random frontier room into the maze.
///
/// Random draws per step: on the first step a column then a row; then a frontier index;
/// then, once the maze has started, one pick among the room's visited neighbors.
pub struct Prim {
    frontier: Vec<Coord>,
    /// Membership flags for `frontier`, by room index
    in_frontier: Vec<bool>,
}

impl Prim {
    pub fn new(grid: &Grid) -> Self {
        Prim {
            frontier: Vec::new(),
            in_frontier: vec![false; grid.len()],
        }
    }

    fn push_frontier(&mut self, grid: &Grid, coord: Coord) {
        let idx = grid.ravel_index(coord);
        if !self.in_frontier[idx] {
            self.in_frontier[idx] = true;
            self.frontier.push(coord);
        }
    }
}

impl Step for Prim {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        _start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        let started = grid.has_any_visited();
        if !started {
            let seed = random_coord(grid, rng);
            self.push_frontier(grid, seed);
        }
        if self.frontier.is_empty() {
            return Err(MazeError::EmptyChoice("prim frontier"));
        }

        let index = rng.random_range(0..self.frontier.len());
        let room = self.frontier[index];

        if started {
            let visited = neighbors_where_visited(grid, room, true);
            let other = choose(rng, &visited, "prim visited neighbors")?;
            grid.join(room, other)?;
        }
        grid.set_visited(room, true);

        for coord in neighbors_where_visited(grid, room, false) {
            self.push_frontier(grid, coord);
        }

        self.frontier.remove(index);
        self.in_frontier[grid.ravel_index(room)] = false;

        progress.increase();
        Ok(())
    }
}
