use std::time::Duration;

use mazestep::{
    app::{App, logging::init_logging},
    generators::Generator,
};

const PROFILE_COLS: u16 = 100;
const PROFILE_ROWS: u16 = 100;

/// Headless timing of every generator on a large grid.
/// Usage: profile [iterations] [seed]
fn main() -> std::io::Result<()> {
    let _guard = init_logging();
    let app = App::default();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let iterations = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(3);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    let (cols, rows) = (PROFILE_COLS, PROFILE_ROWS);
    let reports = app
        .profile(cols, rows, &Generator::ALL, iterations, seed)
        .map_err(std::io::Error::other)?;

    println!("{cols}x{rows}, {iterations} runs each");
    for generator in Generator::ALL {
        let runs = reports
            .iter()
            .filter(|r| r.generator == generator)
            .collect::<Vec<_>>();
        if runs.is_empty() {
            continue;
        }
        let updates = runs.iter().map(|r| r.updates).sum::<usize>() / runs.len();
        let elapsed = runs.iter().map(|r| r.elapsed).sum::<Duration>() / runs.len() as u32;
        println!("{:<24} {:>10} updates {:>12.2?}", generator.to_string(), updates, elapsed);
    }
    Ok(())
}
