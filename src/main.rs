use mazestep::{
    app::{App, RunStatus, logging::init_logging},
    generators::Generator,
};
use rand::Rng;

const USAGE: &str = "Usage: mazestep [cols] [rows] [generator] [seed]";
const DEFAULT_COLS: u16 = 20;
const DEFAULT_ROWS: u16 = 15;

fn main() -> std::io::Result<()> {
    let _guard = init_logging();
    let mut stdout = std::io::stdout();

    let mut args = std::env::args();
    args.next(); // Skip executable name

    let cols = match args.next().map(|s| s.parse::<u16>()) {
        None => DEFAULT_COLS,
        Some(Ok(cols)) => cols,
        Some(Err(_)) => return App::print_error(&mut stdout, USAGE),
    };
    let rows = match args.next().map(|s| s.parse::<u16>()) {
        None => DEFAULT_ROWS,
        Some(Ok(rows)) => rows,
        Some(Err(_)) => return App::print_error(&mut stdout, USAGE),
    };
    let generator = match args.next().map(|s| s.parse::<Generator>()) {
        None => Generator::ALL[rand::rng().random_range(0..Generator::ALL.len())],
        Some(Ok(generator)) => generator,
        Some(Err(e)) => {
            let names = Generator::ALL.map(Generator::slug).join(", ");
            return App::print_error(&mut stdout, &format!("{e}. Available: {names}"));
        }
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        None => None,
        Some(Ok(seed)) => Some(seed),
        Some(Err(_)) => return App::print_error(&mut stdout, USAGE),
    };

    let app = App::from_env();
    tracing::info!("[main] starting with {:?}", app);

    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout, cols, rows, generator, seed);
    App::restore_terminal(&mut stdout)?;

    match result {
        Ok(RunStatus::Cancelled) => tracing::info!("[main] cancelled by user"),
        Ok(RunStatus::Completed) => tracing::info!("[main] done"),
        Err(e) => {
            tracing::error!("[main] {}", e);
            App::print_error(&mut stdout, &e.to_string())?;
        }
    }
    Ok(())
}
