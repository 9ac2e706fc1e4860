use rand::Rng;

use super::{Step, carve, choose, neighbors_where_visited};
use crate::{
    error::{MazeError, Result},
    maze::{Coord, Grid, Progress},
};

/// Depth-first carving from the maze's start room with an explicit stack of steps.
///
/// Random draws per step: one neighbor pick when moving forward, none when backtracking.
#[derive(Default)]
pub struct RecurBacktrack {
    current: Coord,
    /// Rooms on the path from the start to `current`
    steps: Vec<Coord>,
}

impl Step for RecurBacktrack {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        if !grid.has_any_visited() {
            self.current = start;
            self.steps.clear();
            self.steps.push(start);
        }

        let options = neighbors_where_visited(grid, self.current, false);
        if options.is_empty() {
            // Dead end: drop it and go back to the room before
            self.steps.pop();
            self.current = *self
                .steps
                .last()
                .ok_or(MazeError::EmptyChoice("recursive backtracking steps"))?;
        } else {
            let next = choose(rng, &options, "recursive backtracking neighbors")?;
            carve(grid, self.current, next)?;
            self.current = next;
            self.steps.push(next);
        }

        progress.set_count(grid.visited_count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, tests::assert_perfect};

    #[test]
    fn test_starts_from_start_room() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut progress = Progress::new(grid.len());
        let mut generator = RecurBacktrack::default();
        generator
            .step(&mut grid, &mut progress, (2, 3), &mut get_rng(Some(0)))
            .unwrap();
        assert!(grid.is_visited((2, 3)));
        assert_eq!(generator.steps.len(), 2);
        assert_eq!(generator.steps[0], (2, 3));
    }

    #[test]
    fn test_stack_unwinds_on_dead_end() {
        // A 2x2 grid walked fully leaves nothing to carve, so the next step backtracks
        let mut grid = Grid::new(2, 2).unwrap();
        let mut progress = Progress::new(grid.len());
        let mut generator = RecurBacktrack::default();
        let mut rng = get_rng(Some(8));
        for _ in 0..3 {
            generator
                .step(&mut grid, &mut progress, (0, 0), &mut rng)
                .unwrap();
        }
        assert!(progress.is_complete());
        assert_eq!(generator.steps.len(), 4);
        generator
            .step(&mut grid, &mut progress, (0, 0), &mut rng)
            .unwrap();
        assert_eq!(generator.steps.len(), 3);
        assert_perfect(&grid);
    }
}
