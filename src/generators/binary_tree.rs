use rand::Rng;

use super::{Step, carve, choose};
use crate::{
    error::Result,
    maze::{Coord, Direction, Grid, Progress},
};

/// The diagonal every passage leans towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Diagonal {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Diagonal {
    const ALL: [Diagonal; 4] = [
        Diagonal::NorthEast,
        Diagonal::NorthWest,
        Diagonal::SouthEast,
        Diagonal::SouthWest,
    ];

    /// The horizontal then vertical side a room may open towards.
    fn directions(self) -> [Direction; 2] {
        match self {
            Diagonal::NorthEast => [Direction::East, Direction::North],
            Diagonal::NorthWest => [Direction::West, Direction::North],
            Diagonal::SouthEast => [Direction::East, Direction::South],
            Diagonal::SouthWest => [Direction::West, Direction::South],
        }
    }
}

/// Visits rooms in row-major order, opening each one towards one of the two sides of a
/// diagonal picked once per maze. Progress counts the rooms processed.
///
/// Random draws: the diagonal on the first step; then one pick per room that has at least
/// one neighbor along the diagonal.
#[derive(Default)]
pub struct BinaryTree {
    cursor: Coord,
    diagonal: Option<Diagonal>,
}

impl Step for BinaryTree {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        _start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        let diagonal = match self.diagonal {
            Some(diagonal) => diagonal,
            None => {
                let diagonal = choose(rng, &Diagonal::ALL, "binary tree diagonals")?;
                tracing::debug!("[binary-tree] leaning passages {:?}", diagonal);
                *self.diagonal.insert(diagonal)
            }
        };

        let options = diagonal
            .directions()
            .into_iter()
            .filter_map(|d| grid.neighbor(self.cursor, d))
            .collect::<Vec<_>>();

        // Only the corner the diagonal points at has no options
        if !options.is_empty() {
            let other = choose(rng, &options, "binary tree neighbors")?;
            carve(grid, self.cursor, other)?;
        }
        grid.set_visited(self.cursor, true);

        let (col, row) = self.cursor;
        self.cursor = if col + 1 >= grid.cols() {
            (0, row + 1)
        } else {
            (col + 1, row)
        };

        progress.increase();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, tests::assert_perfect};

    #[test]
    fn test_passages_follow_diagonal() {
        let mut grid = Grid::new(6, 5).unwrap();
        let mut progress = Progress::new(grid.len());
        let mut generator = BinaryTree::default();
        let mut rng = get_rng(Some(12));
        while !progress.is_complete() {
            generator
                .step(&mut grid, &mut progress, (0, 0), &mut rng)
                .unwrap();
        }
        assert_eq!(progress.count(), 30);
        assert_perfect(&grid);

        let [horizontal, vertical] = generator.diagonal.unwrap().directions();
        // Every room except the diagonal's corner opens towards one of the two sides
        let closed = grid
            .rooms()
            .filter(|room| room.has_wall(horizontal) && room.has_wall(vertical))
            .count();
        assert_eq!(closed, 1);
    }

    #[test]
    fn test_one_room_per_step() {
        let mut grid = Grid::new(3, 2).unwrap();
        let mut progress = Progress::new(grid.len());
        let mut generator = BinaryTree::default();
        let mut rng = get_rng(Some(1));
        generator
            .step(&mut grid, &mut progress, (0, 0), &mut rng)
            .unwrap();
        assert_eq!(generator.cursor, (1, 0));
        generator
            .step(&mut grid, &mut progress, (0, 0), &mut rng)
            .unwrap();
        generator
            .step(&mut grid, &mut progress, (0, 0), &mut rng)
            .unwrap();
        assert_eq!(generator.cursor, (0, 1));
        assert_eq!(progress.count(), 3);
    }
}
