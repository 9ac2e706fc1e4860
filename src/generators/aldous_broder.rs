use rand::Rng;

use super::{Step, carve, choose, neighbors_where_visited, random_coord};
use crate::{
    error::Result,
    maze::{Coord, Grid, Progress},
};

/// Past this completion ratio unvisited rooms get rare, so the walk starts preferring them.
const LOCATE_TARGET_PROGRESS_RATIO: f64 = 0.8;

/// Random walk that carves into every unvisited room it stumbles on.
///
/// Pure Aldous-Broder can wander for a long time near the end. Two biases bound that:
/// unvisited neighbors are preferred once progress passes [`LOCATE_TARGET_PROGRESS_RATIO`]
/// or the walk has failed too often, and after too many failures in a row the walk jumps
/// next to an unvisited room.
///
/// Random draws per step: on the first step a column then a row; then one neighbor pick;
/// then, only when jumping, one pick among the jump targets.
pub struct AldousBroder {
    current: Coord,
    /// Consecutive steps that landed on an already visited room
    failures: usize,
    failure_limit: usize,
}

impl AldousBroder {
    pub fn new(grid: &Grid) -> Self {
        AldousBroder {
            current: (0, 0),
            failures: 0,
            failure_limit: grid.len() / 2,
        }
    }

    /// Moves next to an unvisited room by picking one of the visited rooms bordering one.
    fn jump<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Result<()> {
        let targets = grid
            .coords_where_visited(false)
            .into_iter()
            .flat_map(|coord| neighbors_where_visited(grid, coord, true))
            .collect::<Vec<_>>();
        self.current = choose(rng, &targets, "aldous-broder jump targets")?;
        tracing::debug!(
            "[aldous-broder] stalled after {} failures, jumped to {:?}",
            self.failures,
            self.current
        );
        Ok(())
    }
}

impl Step for AldousBroder {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        _start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        if !grid.has_any_visited() {
            self.current = random_coord(grid, rng);
        }

        let mut options = if progress.ratio() >= LOCATE_TARGET_PROGRESS_RATIO
            || self.failures > self.failure_limit
        {
            neighbors_where_visited(grid, self.current, false)
        } else {
            Vec::new()
        };

        if options.is_empty() {
            self.failures += 1;
            options = grid.neighbors(self.current).map(|(_, c)| c).collect();
        }

        let next = choose(rng, &options, "aldous-broder neighbors")?;
        let from = std::mem::replace(&mut self.current, next);

        if !grid.is_visited(next) {
            self.failures = 0;
            carve(grid, from, next)?;
        } else if self.failures > self.failure_limit {
            self.jump(grid, rng)?;
        }

        progress.set_count(grid.visited_count());
        Ok(())
    }
}
