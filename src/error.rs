use thiserror::Error;

use crate::maze::Coord;

/// Errors raised while building or stepping a maze.
///
/// None of these are recoverable at runtime: apart from [`MazeError::InvalidDimensions`]
/// and [`MazeError::OutOfBounds`], which come from caller input, every variant points at a
/// broken invariant inside a generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Both dimensions must be at least [`crate::maze::MIN_DIMENSION`].
    #[error("maze must be at least 2x2, got {cols}x{rows}")]
    InvalidDimensions { cols: u16, rows: u16 },

    /// Two rooms were joined that do not share a wall.
    #[error("rooms {from:?} and {to:?} are not neighbors")]
    NotNeighbors { from: Coord, to: Coord },

    /// A location outside the grid was used where a room is required.
    #[error("location ({col}, {row}) is outside the maze")]
    OutOfBounds { col: i32, row: i32 },

    /// A random choice was attempted over an empty candidate list.
    #[error("no candidates to choose from: {0}")]
    EmptyChoice(&'static str),

    /// Post-processing was requested while the generator still relies on the visited flags.
    #[error("maze generation is not complete ({count}/{goal})")]
    Incomplete { count: usize, goal: usize },

    /// A generator name that does not match any [`crate::generators::Generator`].
    #[error("unknown generator '{0}'")]
    UnknownGenerator(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
