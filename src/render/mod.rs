//! Read-only view of a maze as a grid of tiles, for terminal drawing and text dumps.
//!
//! Rooms sit on odd tile coordinates; the tiles between them are the wall slots.

pub mod tile;

pub use tile::Tile;

use crate::maze::{Direction, Maze};

/// Tiles of a maze laid out `(2 * cols + 1) x (2 * rows + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    tiles: Box<[Tile]>,
    width: usize,
    height: usize,
}

impl TileMap {
    pub fn from_maze(maze: &Maze) -> Self {
        let width = 2 * maze.cols() as usize + 1;
        let height = 2 * maze.rows() as usize + 1;
        let mut tiles = vec![Tile::Wall; width * height].into_boxed_slice();

        for room in maze.grid().rooms() {
            let coord = room.coord();
            let x = 2 * room.col() as usize + 1;
            let y = 2 * room.row() as usize + 1;

            tiles[y * width + x] = if maze.finish() == Some(coord) {
                Tile::Finish
            } else if maze.start() == coord {
                Tile::Start
            } else if room.is_visited() {
                Tile::Visited
            } else {
                Tile::Unvisited
            };

            if !room.has_wall(Direction::East) {
                tiles[y * width + x + 1] = Tile::Open;
            }
            if !room.has_wall(Direction::South) {
                tiles[(y + 1) * width + x] = Tile::Open;
            }
        }

        TileMap {
            tiles,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    /// Tiles row by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width)
    }

    /// One line per tile row, each ending in a newline.
    pub fn to_plain_string(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            out.extend(row.iter().map(|tile| tile.symbol()));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, get_rng};

    #[test]
    fn test_fresh_maze_is_all_walls() {
        let maze = Maze::new(2, 2, Generator::Prim).unwrap();
        let map = TileMap::from_maze(&maze);
        assert_eq!((map.width(), map.height()), (5, 5));
        assert_eq!(
            map.to_plain_string(),
            "#####\n#S#.#\n#####\n#.#.#\n#####\n"
        );
    }

    #[test]
    fn test_open_slots_follow_walls() {
        let mut maze = Maze::new(6, 4, Generator::RecurBacktrack).unwrap();
        maze.generate(&mut get_rng(Some(10))).unwrap();
        let map = TileMap::from_maze(&maze);

        for room in maze.grid().rooms() {
            let x = 2 * room.col() as usize + 1;
            let y = 2 * room.row() as usize + 1;
            assert_eq!(
                map.get(x + 1, y).map(Tile::is_wall),
                Some(room.has_wall(Direction::East))
            );
            assert_eq!(
                map.get(x, y + 1).map(Tile::is_wall),
                Some(room.has_wall(Direction::South))
            );
        }
        // Rooms plus the n - 1 passages of a perfect maze
        let open = map.rows().flatten().filter(|tile| !tile.is_wall()).count();
        assert_eq!(open, 2 * 24 - 1);
        assert_eq!(map.get(map.width(), 0), None);
    }

    #[test]
    fn test_markers_after_locating_finish() {
        let mut maze = Maze::new(4, 3, Generator::Kruskal).unwrap();
        maze.generate(&mut get_rng(Some(3))).unwrap();
        let finish = maze.locate_finish().unwrap().unwrap();
        let map = TileMap::from_maze(&maze);

        assert_eq!(map.get(1, 1), Some(Tile::Start));
        let (x, y) = (2 * finish.0 as usize + 1, 2 * finish.1 as usize + 1);
        assert_eq!(map.get(x, y), Some(Tile::Finish));
        let plain = map.to_plain_string();
        assert_eq!(plain.matches('S').count(), 1);
        assert_eq!(plain.matches('F').count(), 1);
        assert!(!plain.contains('.'));
    }
}
