use rand::Rng;

use super::{Step, carve, choose, random_coord};
use crate::{
    error::{MazeError, Result},
    maze::{Coord, Direction, Grid, Progress},
};

/// A random walk in progress, not yet attached to the maze.
#[derive(Debug, Clone, Copy)]
struct Walk {
    origin: Coord,
    current: Coord,
    /// Steps taken without touching the maze
    stall: usize,
}

/// Loop-erased random walks: each walk wanders from an unvisited room until it touches the
/// maze, then the path it took (with loops erased) is carved in one go.
///
/// Each room remembers only the last direction the walk left it by, so retracing from the
/// origin skips every loop. A walk that has taken more than `rooms / 2` steps starts heading
/// for the nearest maze room instead of wandering.
///
/// Random draws per step: on the first step a column then a row; when a walk starts, one pick
/// among the unvisited rooms; then one direction pick.
pub struct Wilson {
    walk: Option<Walk>,
    /// Last exit taken from each room by the current walk, by room index
    exits: Vec<Option<Direction>>,
    /// Room indices with an exit recorded
    trail: Vec<usize>,
    stall_limit: usize,
}

impl Wilson {
    pub fn new(grid: &Grid) -> Self {
        Wilson {
            walk: None,
            exits: vec![None; grid.len()],
            trail: Vec::new(),
            stall_limit: grid.len() / 2,
        }
    }

    /// Carves the loop-erased path from `origin` until it meets the maze.
    fn splice(&mut self, grid: &mut Grid, origin: Coord) -> Result<usize> {
        let mut cursor = origin;
        let mut length = 0;
        while !grid.is_visited(cursor) {
            let next = self.exits[grid.ravel_index(cursor)]
                .and_then(|direction| grid.neighbor(cursor, direction))
                .ok_or(MazeError::EmptyChoice("wilson walk exits"))?;
            carve(grid, cursor, next)?;
            cursor = next;
            length += 1;
        }
        for idx in self.trail.drain(..) {
            self.exits[idx] = None;
        }
        Ok(length)
    }
}

/// Directions from `coord` that close in on the nearest visited room.
fn toward_nearest_visited(grid: &Grid, coord: Coord) -> Vec<Direction> {
    let (col, row) = (coord.0 as i64, coord.1 as i64);
    let mut nearest = None;
    let mut best = i64::MAX;
    for room in grid.rooms().filter(|room| room.is_visited()) {
        let (dc, dr) = (room.col() as i64 - col, room.row() as i64 - row);
        let distance = dc * dc + dr * dr;
        if distance < best {
            best = distance;
            nearest = Some(room.coord());
        }
    }

    let Some((target_col, target_row)) = nearest else {
        return Vec::new();
    };
    let mut directions = Vec::with_capacity(2);
    if target_col > coord.0 {
        directions.push(Direction::East);
    } else if target_col < coord.0 {
        directions.push(Direction::West);
    }
    if target_row > coord.1 {
        directions.push(Direction::South);
    } else if target_row < coord.1 {
        directions.push(Direction::North);
    }
    directions
}

impl Step for Wilson {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        _start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        if !grid.has_any_visited() {
            grid.set_visited(random_coord(grid, rng), true);
            progress.set_count(grid.visited_count());
            return Ok(());
        }

        let mut walk = match self.walk {
            Some(walk) => walk,
            None => {
                let unvisited = grid.coords_where_visited(false);
                let origin = choose(rng, &unvisited, "wilson walk origins")?;
                Walk {
                    origin,
                    current: origin,
                    stall: 0,
                }
            }
        };

        let directions = if walk.stall >= self.stall_limit {
            toward_nearest_visited(grid, walk.current)
        } else {
            grid.neighbors(walk.current).map(|(d, _)| d).collect()
        };
        let direction = choose(rng, &directions, "wilson walk directions")?;
        let next = grid
            .neighbor(walk.current, direction)
            .ok_or(MazeError::EmptyChoice("wilson walk directions"))?;

        let idx = grid.ravel_index(walk.current);
        if self.exits[idx].replace(direction).is_none() {
            self.trail.push(idx);
        }

        if grid.is_visited(next) {
            let length = self.splice(grid, walk.origin)?;
            tracing::debug!(
                "[wilson] walk from {:?} spliced {} rooms after {} steps",
                walk.origin,
                length,
                walk.stall + 1
            );
            self.walk = None;
        } else {
            walk.current = next;
            walk.stall += 1;
            self.walk = Some(walk);
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
    fn test_first_step_seeds_maze() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut progress = Progress::new(grid.len());
        let mut generator = Wilson::new(&grid);
        generator
            .step(&mut grid, &mut progress, (0, 0), &mut get_rng(Some(4)))
            .unwrap();
        assert_eq!(grid.visited_count(), 1);
        assert_eq!(progress.count(), 1);
        assert!(generator.walk.is_none());
    }

    #[test]
    fn test_exits_cleared_after_each_splice() {
        let mut grid = Grid::new(8, 8).unwrap();
        let mut progress = Progress::new(grid.len());
        let mut generator = Wilson::new(&grid);
        let mut rng = get_rng(Some(99));
        while !progress.is_complete() {
            generator
                .step(&mut grid, &mut progress, (0, 0), &mut rng)
                .unwrap();
            if generator.walk.is_none() {
                assert!(generator.trail.is_empty());
                assert!(generator.exits.iter().all(Option::is_none));
            }
        }
        assert_perfect(&grid);
    }

    #[test]
    fn test_loops_are_erased() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set_visited((2, 0), true);
        let mut generator = Wilson::new(&grid);
        // A walk (0,1) -> (0,0) -> (1,0) -> (1,1) -> (0,1), then leaves again east twice
        let mut record = |grid: &Grid, coord: Coord, direction: Direction| {
            let idx = grid.ravel_index(coord);
            if generator.exits[idx].replace(direction).is_none() {
                generator.trail.push(idx);
            }
        };
        record(&grid, (0, 1), Direction::North);
        record(&grid, (0, 0), Direction::East);
        record(&grid, (1, 0), Direction::South);
        record(&grid, (1, 1), Direction::West);
        record(&grid, (0, 1), Direction::East);
        record(&grid, (1, 1), Direction::East);
        record(&grid, (2, 1), Direction::North);

        let length = generator.splice(&mut grid, (0, 1)).unwrap();
        assert_eq!(length, 3);
        assert!(grid.is_open((0, 1), Direction::East));
        assert!(grid.is_open((1, 1), Direction::East));
        assert!(grid.is_open((2, 1), Direction::North));
        assert!(!grid.is_visited((0, 0)));
        assert!(!grid.is_visited((1, 0)));
        assert!(generator.trail.is_empty());
    }

    #[test]
    fn test_nearest_visited_bias() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_visited((4, 4), true);
        grid.set_visited((0, 3), true);
        assert_eq!(toward_nearest_visited(&grid, (0, 0)), vec![Direction::South]);
        assert_eq!(
            toward_nearest_visited(&grid, (3, 1)),
            vec![Direction::East, Direction::South]
        );
    }
}
