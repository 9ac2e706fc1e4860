use rand::Rng;

use super::{Step, carve, choose, neighbors_where_visited, random_coord};
use crate::{
    error::Result,
    maze::{Coord, Grid, Progress},
};

/// Walks randomly into unvisited rooms until stuck, then hunts in row-major order for the
/// first unvisited room bordering the maze and continues from there.
///
/// Random draws per step: on the first step a column then a row; then one pick, either among
/// the visited neighbors of the hunted room or among the unvisited neighbors of the walker.
#[derive(Default)]
pub struct HuntKill {
    current: Coord,
    dead_end: bool,
}

impl HuntKill {
    /// First unvisited room, row by row, that has a visited neighbor, with those neighbors.
    fn hunt(grid: &Grid) -> Option<(Coord, Vec<Coord>)> {
        grid.coords_where_visited(false)
            .into_iter()
            .map(|coord| (coord, neighbors_where_visited(grid, coord, true)))
            .find(|(_, visited)| !visited.is_empty())
    }
}

impl Step for HuntKill {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        _start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        if !grid.has_any_visited() {
            self.current = random_coord(grid, rng);
            grid.set_visited(self.current, true);
        } else if self.dead_end {
            if let Some((room, visited)) = HuntKill::hunt(grid) {
                let neighbor = choose(rng, &visited, "hunt-kill hunted neighbors")?;
                carve(grid, room, neighbor)?;
                tracing::debug!("[hunt-kill] hunt resumed the walk at {:?}", room);
                self.current = room;
                self.dead_end = false;
                progress.set_count(grid.visited_count());
                return Ok(());
            }
        }

        let options = neighbors_where_visited(grid, self.current, false);
        if options.is_empty() {
            self.dead_end = true;
        } else {
            let next = choose(rng, &options, "hunt-kill walk")?;
            carve(grid, self.current, next)?;
            self.current = next;
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
    fn test_hunt_scans_row_major() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_visited((2, 2), true);
        grid.set_visited((0, 1), true);
        // (0, 0) borders the visited (0, 1) and comes first
        let (room, visited) = HuntKill::hunt(&grid).unwrap();
        assert_eq!(room, (0, 0));
        assert_eq!(visited, vec![(0, 1)]);
    }

    #[test]
    fn test_hunt_finds_nothing_when_all_visited() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.reset_visited(true);
        assert!(HuntKill::hunt(&grid).is_none());
    }

    #[test]
    fn test_generates_perfect_maze() {
        let mut grid = Grid::new(9, 7).unwrap();
        let mut progress = Progress::new(grid.len());
        let mut generator = HuntKill::default();
        let mut rng = get_rng(Some(4));
        while !progress.is_complete() {
            generator
                .step(&mut grid, &mut progress, (0, 0), &mut rng)
                .unwrap();
        }
        assert_perfect(&grid);
    }
}
