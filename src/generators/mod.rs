mod aldous_broder;
mod binary_tree;
mod ellers;
mod growing_tree;
mod hunt_kill;
mod kruskal;
mod prim;
mod recur_backtrack;
mod sidewinder;
pub mod union_find;
mod wilson;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::{MazeError, Result},
    maze::{Coord, Grid, Progress},
};
use aldous_broder::AldousBroder;
use binary_tree::BinaryTree;
use ellers::Ellers;
use growing_tree::GrowingTree;
use hunt_kill::HuntKill;
use kruskal::Kruskal;
use prim::Prim;
use recur_backtrack::RecurBacktrack;
use sidewinder::Sidewinder;
use wilson::Wilson;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// The maze generation algorithms on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    AldousBroder,
    HuntKill,
    RecurBacktrack,
    BinaryTree,
    Ellers,
    GrowingTree,
    Kruskal,
    Prim,
    Sidewinder,
    Wilson,
}

impl Generator {
    pub const ALL: [Generator; 10] = [
        Generator::AldousBroder,
        Generator::HuntKill,
        Generator::RecurBacktrack,
        Generator::BinaryTree,
        Generator::Ellers,
        Generator::GrowingTree,
        Generator::Kruskal,
        Generator::Prim,
        Generator::Sidewinder,
        Generator::Wilson,
    ];

    /// Short name used on the command line and in logs.
    pub fn slug(self) -> &'static str {
        match self {
            Generator::AldousBroder => "aldous-broder",
            Generator::HuntKill => "hunt-kill",
            Generator::RecurBacktrack => "recur-backtrack",
            Generator::BinaryTree => "binary-tree",
            Generator::Ellers => "ellers",
            Generator::GrowingTree => "growing-tree",
            Generator::Kruskal => "kruskal",
            Generator::Prim => "prim",
            Generator::Sidewinder => "sidewinder",
            Generator::Wilson => "wilson",
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::AldousBroder => write!(f, "Aldous-Broder"),
            Generator::HuntKill => write!(f, "Hunt-and-Kill"),
            Generator::RecurBacktrack => write!(f, "Recursive Backtracking"),
            Generator::BinaryTree => write!(f, "Binary Tree"),
            Generator::Ellers => write!(f, "Eller's Algorithm"),
            Generator::GrowingTree => write!(f, "Growing Tree"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Sidewinder => write!(f, "Sidewinder"),
            Generator::Wilson => write!(f, "Wilson's Algorithm"),
        }
    }
}

impl std::str::FromStr for Generator {
    type Err = MazeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Generator::ALL
            .into_iter()
            .find(|g| g.slug() == wanted)
            .ok_or(MazeError::UnknownGenerator(s.to_string()))
    }
}

/// One bounded unit of carving work.
///
/// `start` is the maze's configured start room; only recursive backtracking uses it.
pub(crate) trait Step {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        start: Coord,
        rng: &mut R,
    ) -> Result<()>;
}

/// Per-algorithm generation state.
pub(crate) enum GeneratorState {
    AldousBroder(AldousBroder),
    HuntKill(HuntKill),
    RecurBacktrack(RecurBacktrack),
    BinaryTree(BinaryTree),
    Ellers(Ellers),
    GrowingTree(GrowingTree),
    Kruskal(Kruskal),
    Prim(Prim),
    Sidewinder(Sidewinder),
    Wilson(Wilson),
}

impl GeneratorState {
    pub fn new(generator: Generator, grid: &Grid) -> Self {
        match generator {
            Generator::AldousBroder => GeneratorState::AldousBroder(AldousBroder::new(grid)),
            Generator::HuntKill => GeneratorState::HuntKill(HuntKill::default()),
            Generator::RecurBacktrack => GeneratorState::RecurBacktrack(RecurBacktrack::default()),
            Generator::BinaryTree => GeneratorState::BinaryTree(BinaryTree::default()),
            Generator::Ellers => GeneratorState::Ellers(Ellers::new(grid)),
            Generator::GrowingTree => GeneratorState::GrowingTree(GrowingTree::default()),
            Generator::Kruskal => GeneratorState::Kruskal(Kruskal::new(grid)),
            Generator::Prim => GeneratorState::Prim(Prim::new(grid)),
            Generator::Sidewinder => GeneratorState::Sidewinder(Sidewinder::default()),
            Generator::Wilson => GeneratorState::Wilson(Wilson::new(grid)),
        }
    }

    pub fn generator(&self) -> Generator {
        match self {
            GeneratorState::AldousBroder(_) => Generator::AldousBroder,
            GeneratorState::HuntKill(_) => Generator::HuntKill,
            GeneratorState::RecurBacktrack(_) => Generator::RecurBacktrack,
            GeneratorState::BinaryTree(_) => Generator::BinaryTree,
            GeneratorState::Ellers(_) => Generator::Ellers,
            GeneratorState::GrowingTree(_) => Generator::GrowingTree,
            GeneratorState::Kruskal(_) => Generator::Kruskal,
            GeneratorState::Prim(_) => Generator::Prim,
            GeneratorState::Sidewinder(_) => Generator::Sidewinder,
            GeneratorState::Wilson(_) => Generator::Wilson,
        }
    }

    pub fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        progress: &mut Progress,
        start: Coord,
        rng: &mut R,
    ) -> Result<()> {
        match self {
            GeneratorState::AldousBroder(g) => g.step(grid, progress, start, rng),
            GeneratorState::HuntKill(g) => g.step(grid, progress, start, rng),
            GeneratorState::RecurBacktrack(g) => g.step(grid, progress, start, rng),
            GeneratorState::BinaryTree(g) => g.step(grid, progress, start, rng),
            GeneratorState::Ellers(g) => g.step(grid, progress, start, rng),
            GeneratorState::GrowingTree(g) => g.step(grid, progress, start, rng),
            GeneratorState::Kruskal(g) => g.step(grid, progress, start, rng),
            GeneratorState::Prim(g) => g.step(grid, progress, start, rng),
            GeneratorState::Sidewinder(g) => g.step(grid, progress, start, rng),
            GeneratorState::Wilson(g) => g.step(grid, progress, start, rng),
        }
    }
}

/// Picks one option uniformly at random. An empty list means a generator broke its own
/// invariant.
fn choose<R: Rng + ?Sized, T: Copy>(rng: &mut R, options: &[T], what: &'static str) -> Result<T> {
    if options.is_empty() {
        return Err(MazeError::EmptyChoice(what));
    }
    Ok(options[rng.random_range(0..options.len())])
}

/// Uniformly random location, column drawn before row.
fn random_coord<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Coord {
    (
        rng.random_range(0..grid.cols()),
        rng.random_range(0..grid.rows()),
    )
}

/// Neighbors of `coord` whose visited flag equals `visited`.
fn neighbors_where_visited(grid: &Grid, coord: Coord, visited: bool) -> Vec<Coord> {
    grid.neighbors(coord)
        .map(|(_, c)| c)
        .filter(|&c| grid.is_visited(c) == visited)
        .collect()
}

/// Marks both rooms visited and opens the passage between them.
fn carve(grid: &mut Grid, from: Coord, to: Coord) -> Result<()> {
    grid.set_visited(from, true);
    grid.set_visited(to, true);
    grid.join(from, to)
}
