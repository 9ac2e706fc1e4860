use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    maze::Maze,
    render::{Tile, TileMap},
};

/// Number of cells in the progress bar.
const PROGRESS_BAR_WIDTH: usize = 30;

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Whether the last frame was the "terminal too small" notice
    showing_resize_notice: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
            showing_resize_notice: false,
        }
    }

    /// Check if terminal size is sufficient for the tile map plus the status line.
    /// If not, display a message asking for a resize and return Ok(false)
    fn check_resize(&mut self, map: &TileMap) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let needed_width = map.width() * Tile::WIDTH as usize;
        let needed_height = map.height() + 2;
        if (term_width as usize) < needed_width || (term_height as usize) < needed_height {
            let msg = format!(
                "Terminal size is too small ({}x{}) for the maze to display ({}x{} needed). Please resize the terminal.\r\n",
                term_width, term_height, needed_width, needed_height
            );
            queue!(
                self.stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            self.stdout.flush()?;
            self.showing_resize_notice = true;
            return Ok(false);
        }
        if self.showing_resize_notice {
            self.stdout.queue(terminal::Clear(ClearType::All))?;
            self.showing_resize_notice = false;
        }
        Ok(true)
    }

    /// Draw the maze and its progress line.
    /// Returns Ok(false) if the terminal is too small to draw anything
    pub fn draw(&mut self, maze: &Maze) -> std::io::Result<bool> {
        let map = TileMap::from_maze(maze);
        if !self.check_resize(&map)? {
            return Ok(false);
        }

        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for row in map.rows() {
            for tile in row {
                self.stdout.queue(style::Print(tile))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }

        let status = format!(
            "{} {} {:>3}%  updates: {}",
            maze.generator(),
            progress_bar(maze.progress_ratio()),
            (maze.progress_ratio() * 100.0).floor() as u32,
            maze.updates()
        );
        let color = if maze.is_complete() {
            Color::Green
        } else {
            Color::Cyan
        };
        queue!(
            self.stdout,
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(status.with(color).attribute(Attribute::Bold)),
            style::Print("\r\n")
        )?;
        self.stdout.flush()?;
        Ok(true)
    }

    /// Print a styled message below the maze.
    pub fn message(&mut self, msg: &str, color: Color) -> std::io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(msg.with(color).attribute(Attribute::Bold)),
            style::Print("\r\n")
        )?;
        self.stdout.flush()
    }
}

/// Text progress bar such as `[#####-----]`.
fn progress_bar(ratio: f64) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * PROGRESS_BAR_WIDTH as f64).floor() as usize)
        .min(PROGRESS_BAR_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}
