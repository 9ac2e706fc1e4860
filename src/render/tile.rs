use crossterm::style::{Color, Stylize};

use std::fmt;

/// One square of the rendered maze: either a room or the slot between two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// A wall slot, a post or the outer frame.
    Wall,
    /// A wall slot that has been carved open.
    Open,
    /// A room the generator has reached.
    Visited,
    /// A room the generator has not reached yet.
    Unvisited,
    /// The maze's start room.
    Start,
    /// The maze's finish room.
    Finish,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;

    /// Single character used by the plain text dump.
    pub fn symbol(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Open | Tile::Visited => ' ',
            Tile::Unvisited => '.',
            Tile::Start => 'S',
            Tile::Finish => 'F',
        }
    }

    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Open | Tile::Visited => "  ".with(Color::Reset),
            Tile::Unvisited => ". ".with(Color::DarkGrey),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Finish => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tile_is_two_columns() {
        use unicode_width::UnicodeWidthStr;
        for tile in [
            Tile::Wall,
            Tile::Open,
            Tile::Visited,
            Tile::Unvisited,
            Tile::Start,
            Tile::Finish,
        ] {
            // Display panics in debug builds if the glyph is the wrong width
            let rendered = tile.to_string();
            assert!(!rendered.is_empty());
            assert_eq!(tile.symbol().to_string().width(), 1);
        }
    }
}
