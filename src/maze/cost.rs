use std::collections::VecDeque;

use super::{Coord, grid::Grid, room::Room};

impl Grid {
    /// Assigns every room its distance from `start`, walking only through open passages.
    ///
    /// Visited flags are reset first and end up set exactly on the rooms reached. Rooms that
    /// cannot be reached keep cost 0 and stay unvisited.
    pub fn compute_cost(&mut self, start: Coord) {
        self.reset_visited(false);
        for idx in 0..self.len() {
            let coord = self.unravel_index(idx);
            self[coord].set_cost(Room::COST_MINIMUM);
        }

        self[start].set_cost(Room::COST_MINIMUM);
        self.set_visited(start, true);

        let mut frontier = VecDeque::from([start]);
        while let Some(current) = frontier.pop_front() {
            let next_cost = self[current].cost() + 1;
            let reachable = self
                .neighbors(current)
                .filter(|&(direction, coord)| {
                    !self.has_wall(current, direction) && !self.is_visited(coord)
                })
                .map(|(_, coord)| coord)
                .collect::<Vec<_>>();

            for coord in reachable {
                self[coord].set_cost(next_cost);
                self.set_visited(coord, true);
                frontier.push_back(coord);
            }
        }
    }

    /// The room with the strictly highest cost, scanning in row-major order so the first one
    /// found wins ties. `None` when no room has a cost above the minimum.
    pub fn farthest(&self) -> Option<Coord> {
        self.rooms()
            .fold(None::<&Room>, |best, room| match best {
                Some(b) if room.cost() <= b.cost() => Some(b),
                _ if room.cost() > Room::COST_MINIMUM => Some(room),
                _ => best,
            })
            .map(Room::coord)
    }
}
