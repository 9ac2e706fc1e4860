use std::fmt;

use super::Coord;

/// One side of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Every direction, in the order generators enumerate neighbors.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// Column and row offset of the neighbor on this side.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// The side the neighbor sees this wall from.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Direction leading from `from` to `to`, if the two locations are grid-adjacent.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let dc = to.0 as i32 - from.0 as i32;
        let dr = to.1 as i32 - from.1 as i32;
        Direction::ALL.into_iter().find(|d| d.delta() == (dc, dr))
    }

    const fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::South => 0b0010,
            Direction::East => 0b0100,
            Direction::West => 0b1000,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

/// The walls standing around a room, one bit per side.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WallSet(u8);

impl WallSet {
    pub const NONE: WallSet = WallSet(0);
    pub const ALL: WallSet = WallSet(0b1111);

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Returns `false` if the wall was already there.
    pub fn insert(&mut self, direction: Direction) -> bool {
        let had = self.contains(direction);
        self.0 |= direction.bit();
        !had
    }

    /// Returns `false` if there was no wall to remove.
    pub fn remove(&mut self, direction: Direction) -> bool {
        let had = self.contains(direction);
        self.0 &= !direction.bit();
        had
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

/// A single room of the maze.
///
/// The location is fixed at creation. Walls are tracked per room, so a passage between two
/// neighbors only exists when both sides have been removed; [`super::Grid::join`] is the one
/// place that does that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    col: u16,
    row: u16,
    walls: WallSet,
    visited: bool,
    /// Number of rooms away from the start, filled in by [`super::Grid::compute_cost`].
    cost: u32,
}

impl Room {
    /// The lowest cost a room can have.
    pub const COST_MINIMUM: u32 = 0;

    /// Creates an unvisited room with no walls.
    pub fn new(col: u16, row: u16) -> Self {
        Room {
            col,
            row,
            walls: WallSet::NONE,
            visited: false,
            cost: Room::COST_MINIMUM,
        }
    }

    pub fn col(&self) -> u16 {
        self.col
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn coord(&self) -> Coord {
        (self.col, self.row)
    }

    pub fn has_location(&self, col: i32, row: i32) -> bool {
        self.col as i32 == col && self.row as i32 == row
    }

    pub fn walls(&self) -> WallSet {
        self.walls
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.contains(direction)
    }

    /// Returns `false` if the wall already existed.
    pub fn add_wall(&mut self, direction: Direction) -> bool {
        self.walls.insert(direction)
    }

    /// Returns `false` if there was no wall on that side.
    pub fn remove_wall(&mut self, direction: Direction) -> bool {
        self.walls.remove(direction)
    }

    pub fn add_all_walls(&mut self) {
        self.walls = WallSet::ALL;
    }

    pub fn remove_all_walls(&mut self) {
        self.walls = WallSet::NONE;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn set_cost(&mut self, cost: u32) {
        self.cost = cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_are_symmetric() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            let (dc, dr) = direction.delta();
            let (oc, or) = direction.opposite().delta();
            assert_eq!((dc + oc, dr + or), (0, 0));
        }
    }

    #[test]
    fn test_between() {
        assert_eq!(Direction::between((1, 1), (2, 1)), Some(Direction::East));
        assert_eq!(Direction::between((1, 1), (1, 0)), Some(Direction::North));
        assert_eq!(Direction::between((1, 1), (2, 2)), None);
        assert_eq!(Direction::between((1, 1), (3, 1)), None);
        assert_eq!(Direction::between((1, 1), (1, 1)), None);
    }

    #[test]
    fn test_wall_add_remove() {
        let mut room = Room::new(3, 4);
        assert!(room.walls().is_empty());
        assert!(room.add_wall(Direction::North));
        // Adding the same wall again is a no-op
        assert!(!room.add_wall(Direction::North));
        assert!(room.remove_wall(Direction::North));
        // Removing an absent wall reports nothing removed
        assert!(!room.remove_wall(Direction::North));

        room.add_all_walls();
        assert_eq!(room.walls().len(), 4);
        assert!(Direction::ALL.iter().all(|&d| room.has_wall(d)));
        room.remove_all_walls();
        assert_eq!(room.walls(), WallSet::NONE);
    }

    #[test]
    fn test_location() {
        let room = Room::new(3, 4);
        assert!(room.has_location(3, 4));
        assert!(!room.has_location(4, 3));
        assert_eq!(room.coord(), (3, 4));
        assert_eq!(room.cost(), Room::COST_MINIMUM);
        assert!(!room.is_visited());
    }
}
