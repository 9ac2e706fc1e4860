use super::{
    Coord, MIN_DIMENSION,
    room::{Direction, Room},
};
use crate::error::{MazeError, Result};

/// The fixed `cols x rows` array of rooms a maze is carved out of.
#[derive(Debug, Clone)]
pub struct Grid {
    rooms: Box<[Room]>,
    cols: u16,
    rows: u16,
    /// Number of rooms whose visited flag is set, kept in step with every flag change
    visited: usize,
}

impl Grid {
    /// Creates a grid where every room has all four walls.
    pub fn new(cols: u16, rows: u16) -> Result<Self> {
        if cols < MIN_DIMENSION || rows < MIN_DIMENSION {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }
        let rooms = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (col, row)))
            .map(|(col, row)| {
                let mut room = Room::new(col, row);
                room.add_all_walls();
                room
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Grid {
            rooms,
            cols,
            rows,
            visited: 0,
        })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Total number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Always `false`; kept alongside [`Grid::len`].
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn is_in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }

    /// Looks up a room, returning `None` for any location outside the grid.
    pub fn room(&self, col: i32, row: i32) -> Option<&Room> {
        self.is_in_bounds(col, row)
            .then(|| &self.rooms[self.ravel_index((col as u16, row as u16))])
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Row-major index of a room, usable as a dense key.
    pub fn ravel_index(&self, coord: Coord) -> usize {
        coord.1 as usize * self.cols as usize + coord.0 as usize
    }

    pub fn unravel_index(&self, index: usize) -> Coord {
        let cols = self.cols as usize;
        ((index % cols) as u16, (index / cols) as u16)
    }

    /// The location one step away in `direction`, if it is still inside the grid.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dc, dr) = direction.delta();
        let (col, row) = (coord.0 as i32 + dc, coord.1 as i32 + dr);
        self.is_in_bounds(col, row).then_some((col as u16, row as u16))
    }

    /// In-bounds neighbors, in [`Direction::ALL`] order.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(coord, d).map(|c| (d, c)))
    }

    pub fn has_wall(&self, coord: Coord, direction: Direction) -> bool {
        self[coord].has_wall(direction)
    }

    /// Checks whether two neighbors are connected by an open passage.
    pub fn is_open(&self, coord: Coord, direction: Direction) -> bool {
        self.neighbor(coord, direction).is_some() && !self.has_wall(coord, direction)
    }

    /// Joins two adjacent rooms by removing the wall on each side of their shared border.
    ///
    /// This is the only mutation generators use to carve passages, which keeps the two
    /// sides of every border in agreement.
    pub fn join(&mut self, from: Coord, to: Coord) -> Result<()> {
        let direction = Direction::between(from, to)
            .filter(|_| self.contains(from) && self.contains(to))
            .ok_or(MazeError::NotNeighbors { from, to })?;
        self[from].remove_wall(direction);
        self[to].remove_wall(direction.opposite());
        Ok(())
    }

    /// Puts all four walls back on every room.
    pub fn fill_walls(&mut self) {
        self.rooms.iter_mut().for_each(Room::add_all_walls);
    }

    /// Removes every wall, including the outer boundary.
    pub fn clear_walls(&mut self) {
        self.rooms.iter_mut().for_each(Room::remove_all_walls);
    }

    pub fn is_visited(&self, coord: Coord) -> bool {
        self[coord].is_visited()
    }

    pub fn set_visited(&mut self, coord: Coord, visited: bool) {
        let idx = self.ravel_index(coord);
        let room = &mut self.rooms[idx];
        if room.is_visited() != visited {
            room.set_visited(visited);
            if visited {
                self.visited += 1;
            } else {
                self.visited -= 1;
            }
        }
    }

    /// Number of rooms currently flagged visited.
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Whether any room has been visited yet, i.e. whether generation has started.
    pub fn has_any_visited(&self) -> bool {
        self.visited > 0
    }

    /// Sets the visited flag on every room.
    pub fn reset_visited(&mut self, visited: bool) {
        self.rooms.iter_mut().for_each(|room| room.set_visited(visited));
        self.visited = if visited { self.rooms.len() } else { 0 };
    }

    /// Locations of all rooms matching `visited`, in row-major order.
    pub fn coords_where_visited(&self, visited: bool) -> Vec<Coord> {
        self.rooms
            .iter()
            .filter(|room| room.is_visited() == visited)
            .map(Room::coord)
            .collect()
    }

    pub(crate) fn room_mut(&mut self, coord: Coord) -> &mut Room {
        let idx = self.ravel_index(coord);
        &mut self.rooms[idx]
    }

    fn contains(&self, coord: Coord) -> bool {
        coord.0 < self.cols && coord.1 < self.rows
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Room;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.rooms[self.ravel_index(index)]
    }
}

impl std::ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        self.room_mut(index)
    }
}
