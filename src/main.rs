mod cli;

use timesheet::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::report::Report;

fn main() {
    // Tracing is opt-in via RUST_LOG
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let matches = cli::app().get_matches();
    if let Err(err) = cli::run(&matches) {
        // parse errors were already reported with their context
        if !matches!(err, Error::Parse(_)) {
            eprintln!("{}", Report::new(&err));
        }
        std::process::exit(err.exit_code());
    }
}
