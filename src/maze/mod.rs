mod cost;
pub mod grid;
pub mod progress;
pub mod room;

use rand::Rng;

use crate::{
    error::{MazeError, Result},
    generators::{Generator, GeneratorState},
};
pub use grid::Grid;
pub use progress::Progress;
pub use room::{Direction, Room, WallSet};

/// A `(column, row)` location in the maze.
pub type Coord = (u16, u16);

/// Smallest number of columns and rows a maze can have.
pub const MIN_DIMENSION: u16 = 2;

/// A maze being carved by one of the [`Generator`] algorithms.
///
/// Generation is incremental: each [`Maze::update`] does one bounded unit of work, so a
/// caller can interleave generation with drawing frames. The grid can be inspected at any
/// point in between.
pub struct Maze {
    grid: Grid,
    start: Coord,
    finish: Option<Coord>,
    progress: Progress,
    state: GeneratorState,
    /// Number of updates that did work
    updates: usize,
}

impl Maze {
    /// Creates a fully walled maze that `generator` will carve.
    pub fn new(cols: u16, rows: u16, generator: Generator) -> Result<Self> {
        let grid = Grid::new(cols, rows)?;
        let state = GeneratorState::new(generator, &grid);
        Ok(Maze {
            progress: Progress::new(grid.len()),
            grid,
            start: (0, 0),
            finish: None,
            state,
            updates: 0,
        })
    }

    pub fn generator(&self) -> Generator {
        self.state.generator()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    pub fn rows(&self) -> u16 {
        self.grid.rows()
    }

    /// Bounds-checked room lookup; `None` outside the maze.
    pub fn room(&self, col: i32, row: i32) -> Option<&Room> {
        self.grid.room(col, row)
    }

    /// Whether the room at `coord` is walled on `direction`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the maze; use [`Maze::room`] for unchecked input.
    pub fn has_wall(&self, coord: Coord, direction: Direction) -> bool {
        self.grid.has_wall(coord, direction)
    }

    /// Advances generation by one step. Does nothing once the maze is complete.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        let Maze {
            grid,
            start,
            progress,
            state,
            ..
        } = self;
        state.step(grid, progress, *start, rng)?;
        self.updates += 1;

        if self.is_complete() {
            tracing::info!(
                "[maze] {} finished a {}x{} maze after {} updates",
                self.generator(),
                self.cols(),
                self.rows(),
                self.updates
            );
        }
        Ok(())
    }

    /// Runs [`Maze::update`] until the maze is complete and returns the number of updates made.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        let before = self.updates;
        while !self.is_complete() {
            self.update(rng)?;
        }
        Ok(self.updates - before)
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Generation progress in `[0.0, 1.0]`.
    pub fn progress_ratio(&self) -> f64 {
        self.progress.ratio()
    }

    /// Number of updates that advanced generation so far.
    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    /// Recursive backtracking starts carving from here, so set it before the first update.
    pub fn set_start(&mut self, col: i32, row: i32) -> Result<()> {
        self.start = self.checked_coord(col, row)?;
        Ok(())
    }

    pub fn finish(&self) -> Option<Coord> {
        self.finish
    }

    pub fn set_finish(&mut self, col: i32, row: i32) -> Result<()> {
        self.finish = Some(self.checked_coord(col, row)?);
        Ok(())
    }

    /// Assigns each room its distance from the start. See [`Grid::compute_cost`].
    ///
    /// The cost pass rewrites the visited flags generators work from, so it is refused
    /// until generation is complete.
    pub fn compute_cost(&mut self) -> Result<()> {
        if !self.is_complete() {
            return Err(MazeError::Incomplete {
                count: self.progress.count(),
                goal: self.progress.goal(),
            });
        }
        self.grid.compute_cost(self.start);
        Ok(())
    }

    /// Computes costs from the start and makes the farthest room the finish.
    ///
    /// The finish is left unchanged when no room is reachable from the start.
    pub fn locate_finish(&mut self) -> Result<Option<Coord>> {
        self.compute_cost()?;
        if let Some(farthest) = self.grid.farthest() {
            self.finish = Some(farthest);
        }
        tracing::debug!("[maze] finish located at {:?}", self.finish);
        Ok(self.finish)
    }

    fn checked_coord(&self, col: i32, row: i32) -> Result<Coord> {
        self.grid
            .room(col, row)
            .map(Room::coord)
            .ok_or(MazeError::OutOfBounds { col, row })
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Room;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.grid[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_construction_bounds() {
        assert!(matches!(
            Maze::new(1, 5, Generator::Prim),
            Err(MazeError::InvalidDimensions { cols: 1, rows: 5 })
        ));
        assert!(matches!(
            Maze::new(5, 1, Generator::Prim),
            Err(MazeError::InvalidDimensions { cols: 5, rows: 1 })
        ));
        assert!(Maze::new(2, 2, Generator::Prim).is_ok());
    }

    #[test]
    fn test_start_and_finish() {
        let mut maze = Maze::new(4, 3, Generator::Sidewinder).unwrap();
        assert_eq!(maze.start(), (0, 0));
        assert_eq!(maze.finish(), None);

        maze.set_start(3, 2).unwrap();
        assert_eq!(maze.start(), (3, 2));
        assert_eq!(
            maze.set_start(4, 0),
            Err(MazeError::OutOfBounds { col: 4, row: 0 })
        );
        assert!(maze.set_finish(-1, 0).is_err());
        maze.set_finish(1, 1).unwrap();
        assert_eq!(maze.finish(), Some((1, 1)));
    }

    #[test]
    fn test_update_is_noop_once_complete() {
        let mut rng = get_rng(Some(7));
        let mut maze = Maze::new(5, 4, Generator::BinaryTree).unwrap();
        let updates = maze.generate(&mut rng).unwrap();
        assert_eq!(updates, 20);
        assert!(maze.is_complete());
        assert_eq!(maze.progress_ratio(), 1.0);

        let walls = maze.grid().rooms().map(Room::walls).collect::<Vec<_>>();
        maze.update(&mut rng).unwrap();
        assert_eq!(maze.updates(), 20);
        assert_eq!(
            maze.grid().rooms().map(Room::walls).collect::<Vec<_>>(),
            walls
        );
    }

    #[test]
    fn test_locate_finish_is_farthest() {
        let mut rng = get_rng(Some(3));
        let mut maze = Maze::new(6, 6, Generator::RecurBacktrack).unwrap();
        maze.generate(&mut rng).unwrap();

        let finish = maze.locate_finish().unwrap().unwrap();
        let max_cost = maze.grid().rooms().map(Room::cost).max().unwrap();
        assert_eq!(maze[finish].cost(), max_cost);
        assert_eq!(maze[maze.start()].cost(), 0);
        // A perfect maze reaches every room from the start
        assert!(maze.grid().rooms().all(Room::is_visited));
    }

    #[test]
    fn test_post_processing_waits_for_completion() {
        for generator in Generator::ALL {
            let mut rng = get_rng(Some(1));
            let mut maze = Maze::new(8, 8, generator).unwrap();
            for _ in 0..20 {
                maze.update(&mut rng).unwrap();
            }
            if maze.is_complete() {
                continue;
            }
            maze.set_start(7, 7).unwrap();

            let visited = maze.grid().coords_where_visited(true);
            let walls = maze.grid().rooms().map(Room::walls).collect::<Vec<_>>();
            let err = MazeError::Incomplete {
                count: maze.progress().count(),
                goal: 64,
            };
            assert_eq!(maze.locate_finish(), Err(err.clone()), "{generator}");
            assert_eq!(maze.compute_cost(), Err(err), "{generator}");
            assert_eq!(maze.finish(), None);
            assert_eq!(maze.grid().coords_where_visited(true), visited, "{generator}");
            assert_eq!(
                maze.grid().rooms().map(Room::walls).collect::<Vec<_>>(),
                walls
            );

            // Generation carries on undisturbed
            maze.generate(&mut rng).unwrap();
            crate::generators::tests::assert_perfect(maze.grid());
            assert!(maze.locate_finish().unwrap().is_some());
        }
    }

    #[test]
    #[should_panic]
    fn test_has_wall_panics_outside() {
        let maze = Maze::new(3, 3, Generator::Prim).unwrap();
        let _ = maze.has_wall((3, 0), Direction::East);
    }

    #[test]
    fn test_boundary_lookups() {
        let maze = Maze::new(3, 3, Generator::Kruskal).unwrap();
        assert!(maze.room(-1, 0).is_none());
        assert!(maze.room(3, 0).is_none());
        assert!(maze.room(2, 2).is_some());
    }
}
