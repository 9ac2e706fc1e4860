pub mod logging;
mod renderer;

use std::{
    io::{Stdout, Write},
    str::FromStr,
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app::renderer::Renderer,
    error::MazeError,
    generators::{Generator, get_rng},
    maze::Maze,
};

/// Environment variable overriding [`App::steps_per_frame`].
pub const STEPS_PER_FRAME_VAR: &str = "MAZESTEP_STEPS_PER_FRAME";
/// Environment variable overriding the frame duration, in milliseconds.
pub const FRAME_MS_VAR: &str = "MAZESTEP_FRAME_MS";

/// How a visualizer run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Cancelled,
}

/// Result of one headless generation run.
#[derive(Debug, Clone)]
pub struct ProfileReport {
    pub generator: Generator,
    pub updates: usize,
    pub elapsed: Duration,
}

/// Terminal visualizer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    /// Number of maze updates between two drawn frames
    steps_per_frame: usize,
    /// Time between frames, also how long to wait for input each frame
    frame_time: Duration,
}

impl Default for App {
    fn default() -> Self {
        Self {
            steps_per_frame: 1,
            frame_time: Duration::from_millis(16),
        }
    }
}

impl App {
    pub fn new(steps_per_frame: usize, frame_time: Duration) -> Self {
        Self {
            steps_per_frame: steps_per_frame.max(1),
            frame_time,
        }
    }

    /// Default configuration overridden by the `MAZESTEP_*` environment variables.
    pub fn from_env() -> Self {
        App::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = App::default();
        let steps_per_frame = parse_or(&lookup, STEPS_PER_FRAME_VAR, default.steps_per_frame);
        let frame_ms = parse_or(
            &lookup,
            FRAME_MS_VAR,
            default.frame_time.as_millis() as u64,
        );
        App::new(steps_per_frame, Duration::from_millis(frame_ms))
    }

    pub fn steps_per_frame(&self) -> usize {
        self.steps_per_frame
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Generate a maze frame by frame, then mark its start and finish.
    /// Returns once the user presses Esc, either during generation or after it.
    pub fn run(
        &self,
        stdout: &mut Stdout,
        cols: u16,
        rows: u16,
        generator: Generator,
        seed: Option<u64>,
    ) -> std::io::Result<RunStatus> {
        let mut maze = Maze::new(cols, rows, generator).map_err(std::io::Error::other)?;
        let mut rng = get_rng(seed);
        let mut renderer = Renderer::new();
        tracing::info!(
            "[app] generating {}x{} maze with {} (seed: {:?})",
            cols,
            rows,
            generator,
            seed
        );

        stdout.execute(terminal::Clear(ClearType::All))?;
        loop {
            if App::esc_pressed(self.frame_time)? {
                tracing::info!("[app] generation cancelled after {} updates", maze.updates());
                return Ok(RunStatus::Cancelled);
            }

            for _ in 0..self.steps_per_frame {
                if maze.is_complete() {
                    break;
                }
                maze.update(&mut rng).map_err(std::io::Error::other)?;
            }
            renderer.draw(&maze)?;

            if maze.is_complete() {
                break;
            }
        }

        maze.locate_finish().map_err(std::io::Error::other)?;
        renderer.draw(&maze)?;
        renderer.message("Maze complete! Press Esc to exit...", Color::Blue)?;
        App::wait_for_esc()?;
        Ok(RunStatus::Completed)
    }

    /// Profiling mode: generate mazes without touching the terminal
    /// Runs every generator in `generators` `iterations` times, seeding run `i` with `seed + i`
    /// when a seed is given
    pub fn profile(
        &self,
        cols: u16,
        rows: u16,
        generators: &[Generator],
        iterations: usize,
        seed: Option<u64>,
    ) -> Result<Vec<ProfileReport>, MazeError> {
        let mut reports = Vec::with_capacity(generators.len() * iterations);
        for &generator in generators {
            for i in 0..iterations {
                let mut rng = get_rng(seed.map(|s| s.wrapping_add(i as u64)));
                let mut maze = Maze::new(cols, rows, generator)?;
                let started = Instant::now();
                let updates = maze.generate(&mut rng)?;
                let elapsed = started.elapsed();
                tracing::debug!(
                    "[profile] {} run {} took {} updates in {:?}",
                    generator,
                    i,
                    updates,
                    elapsed
                );
                reports.push(ProfileReport {
                    generator,
                    updates,
                    elapsed,
                });
            }
        }
        Ok(reports)
    }

    /// Wait up to `timeout` for a key press, returning whether it was Esc
    fn esc_pressed(timeout: Duration) -> std::io::Result<bool> {
        if !event::poll(timeout)? {
            return Ok(false);
        }
        Ok(matches!(
            event::read()?,
            event::Event::Key(event::KeyEvent {
                code: KeyCode::Esc,
                kind: event::KeyEventKind::Press,
                ..
            })
        ))
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Print a bold error line, for use before the terminal is set up
    pub fn print_error(stdout: &mut Stdout, msg: &str) -> std::io::Result<()> {
        stdout.execute(style::PrintStyledContent(
            format!("{msg}\n").with(Color::Red).attribute(Attribute::Bold),
        ))?;
        Ok(())
    }
}

/// Parse `key` from `lookup`, keeping `default` when it is missing or malformed.
fn parse_or<T: FromStr + Copy + std::fmt::Debug>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("[config] ignoring {}={:?}, using {:?}", key, raw, default);
                default
            }
        },
    }
}
