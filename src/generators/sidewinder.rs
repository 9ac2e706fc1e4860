use rand::Rng;

use super::{Step, carve, choose};
use crate::{
    error::{MazeError, Result},
    maze::{Coord, Direction, Grid, Progress},
};

/// Sweeps each row left to right, collecting rooms into a run that is either extended east or
/// closed off by a single passage north from one of its members. The top row has nowhere to go
/// north, so it always extends.
///
/// Random draws per step: outside the top row, one boolean; then one run index whenever a run
/// closes. The last room of a row is handled in the same step as the room before it.
#[derive(Default)]
pub struct Sidewinder {
    cursor: Coord,
    run: Vec<Coord>,
}

impl Sidewinder {
    /// Opens a passage north from a random member of the run and starts a new one.
    fn close_run<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> Result<()> {
        let member = choose(rng, &self.run, "sidewinder run")?;
        let north = grid
            .neighbor(member, Direction::North)
            .ok_or(MazeError::EmptyChoice("sidewinder north neighbor"))?;
        carve(grid, member, north)?;
        self.run.clear();
        Ok(())
    }
}

impl Step for Sidewinder {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        _start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        let (col, row) = self.cursor;
        self.run.push(self.cursor);
        grid.set_visited(self.cursor, true);

        if row == 0 || rng.random_bool(0.5) {
            let east = grid
                .neighbor(self.cursor, Direction::East)
                .ok_or(MazeError::EmptyChoice("sidewinder east neighbor"))?;
            carve(grid, self.cursor, east)?;
        } else {
            self.close_run(grid, rng)?;
        }

        let col = col + 1;
        if col + 1 == grid.cols() {
            let last = (col, row);
            self.run.push(last);
            grid.set_visited(last, true);
            if row > 0 {
                self.close_run(grid, rng)?;
            }
            self.run.clear();
            self.cursor = (0, row + 1);
        } else {
            self.cursor = (col, row);
        }

        progress.set_count(grid.visited_count());
        Ok(())
    }
}
