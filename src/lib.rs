pub mod app;
pub mod error;
pub mod generators;
pub mod maze;
pub mod render;

pub use error::{MazeError, Result};
pub use generators::{Generator, get_rng};
pub use maze::{Coord, Direction, Maze};
