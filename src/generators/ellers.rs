use rand::Rng;

use super::{Step, carve, union_find::UnionFind};
use crate::{
    error::Result,
    maze::{Coord, Direction, Grid, Progress},
};

/// Builds the maze one row at a time, tracking which rooms are already connected with a
/// disjoint-set forest so no join ever closes a loop.
///
/// Each step processes one room: maybe join it east. Finishing a row also settles it: every
/// room may drop a passage south, and every set in the row is guaranteed at least one. The
/// last row instead joins every neighboring pair still in different sets. Progress counts the
/// rooms processed.
///
/// Random draws per step: one boolean for the east join; at the end of any row but the last,
/// one boolean per column for the south joins.
pub struct Ellers {
    cursor: Coord,
    sets: UnionFind,
    /// Scratch flags by set root: whether the set reaches the next row
    continues: Vec<bool>,
}

impl Ellers {
    pub fn new(grid: &Grid) -> Self {
        Ellers {
            cursor: (0, 0),
            sets: UnionFind::new(grid.len()),
            continues: vec![false; grid.len()],
        }
    }

    /// Joins two neighbors unless they are already connected.
    fn join_sets(&mut self, grid: &mut Grid, from: Coord, to: Coord) -> Result<bool> {
        let (a, b) = (grid.ravel_index(from), grid.ravel_index(to));
        if !self.sets.unite(a, b) {
            return Ok(false);
        }
        carve(grid, from, to)?;
        Ok(true)
    }

    /// Set roots of the rooms in `row`, one per column.
    fn row_roots(&mut self, grid: &Grid, row: u16) -> Vec<usize> {
        (0..grid.cols())
            .map(|col| self.sets.find(grid.ravel_index((col, row))))
            .collect()
    }

    fn settle_row<R: Rng + ?Sized>(&mut self, grid: &mut Grid, row: u16, rng: &mut R) -> Result<()> {
        if row + 1 < grid.rows() {
            for col in 0..grid.cols() {
                if rng.random_bool(0.5) {
                    self.join_sets(grid, (col, row), (col, row + 1))?;
                }
            }
            // Every set must continue into the next row or it would be cut off
            let below = self.row_roots(grid, row + 1);
            for &root in &below {
                self.continues[root] = true;
            }
            let mut marked = below;
            for col in 0..grid.cols() {
                let idx = grid.ravel_index((col, row));
                let root = self.sets.find(idx);
                if !self.continues[root] {
                    self.join_sets(grid, (col, row), (col, row + 1))?;
                    let root = self.sets.find(idx);
                    self.continues[root] = true;
                    marked.push(root);
                }
            }
            for root in marked {
                self.continues[root] = false;
            }
            tracing::debug!(
                "[ellers] row {} settled, {} sets remain",
                row,
                self.sets.set_count()
            );
        } else {
            for col in 0..grid.cols() - 1 {
                self.join_sets(grid, (col, row), (col + 1, row))?;
            }
        }
        Ok(())
    }
}

impl Step for Ellers {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        _start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        if rng.random_bool(0.5) {
            if let Some(east) = grid.neighbor(self.cursor, Direction::East) {
                self.join_sets(grid, self.cursor, east)?;
            }
        }
        grid.set_visited(self.cursor, true);
        progress.increase();

        let (col, row) = self.cursor;
        if col + 1 >= grid.cols() {
            self.settle_row(grid, row, rng)?;
            self.cursor = (0, row + 1);
        } else {
            self.cursor = (col + 1, row);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, tests::assert_perfect};

    fn run(cols: u16, rows: u16, seed: u64) -> (Grid, Ellers) {
        let mut grid = Grid::new(cols, rows).unwrap();
        let mut progress = Progress::new(grid.len());
        let mut generator = Ellers::new(&grid);
        let mut rng = get_rng(Some(seed));
        while !progress.is_complete() {
            generator
                .step(&mut grid, &mut progress, (0, 0), &mut rng)
                .unwrap();
        }
        (grid, generator)
    }

    #[test]
    fn test_single_set_at_end() {
        for seed in 0..25 {
            let (grid, generator) = run(8, 6, seed);
            assert_eq!(generator.sets.set_count(), 1);
            assert_perfect(&grid);
        }
    }

    #[test]
    fn test_rows_stay_connected_downward() {
        let mut grid = Grid::new(5, 3).unwrap();
        let mut progress = Progress::new(grid.len());
        let mut generator = Ellers::new(&grid);
        let mut rng = get_rng(Some(31));
        // Finish the first row only
        for _ in 0..5 {
            generator
                .step(&mut grid, &mut progress, (0, 0), &mut rng)
                .unwrap();
        }
        assert_eq!(generator.cursor, (0, 1));
        let below = generator.row_roots(&grid, 1);
        for root in generator.row_roots(&grid, 0) {
            assert!(below.contains(&root));
        }
        assert!(generator.continues.iter().all(|&flag| !flag));
    }

    #[test]
    fn test_forced_joins_once_per_set() {
        let mut grid = Grid::new(4, 2).unwrap();
        let mut generator = Ellers::new(&grid);
        // Top row is one set, so a single south join settles it
        for col in 0..3 {
            generator.join_sets(&mut grid, (col, 0), (col + 1, 0)).unwrap();
        }
        let mut rng = crate::generators::tests::MaxRng;
        generator.settle_row(&mut grid, 0, &mut rng).unwrap();
        let south = (0..4)
            .filter(|&col| grid.is_open((col, 0), Direction::South))
            .count();
        assert_eq!(south, 1);
        assert!(grid.is_open((0, 0), Direction::South));
    }

    #[test]
    fn test_join_sets_skips_connected_rooms() {
        let mut grid = Grid::new(3, 2).unwrap();
        let mut generator = Ellers::new(&grid);
        assert!(generator.join_sets(&mut grid, (0, 0), (1, 0)).unwrap());
        assert!(generator.join_sets(&mut grid, (1, 0), (1, 1)).unwrap());
        assert!(generator.join_sets(&mut grid, (1, 1), (0, 1)).unwrap());
        // Closing the square would make a loop
        assert!(!generator.join_sets(&mut grid, (0, 1), (0, 0)).unwrap());
        assert!(grid.has_wall((0, 1), Direction::North));
    }
}
