//! Terminal A* visualizer.
//!
//! Run: cargo run -- --size 30 --seed 7

use std::fs::File;

use pathviz::{ConfigError, USAGE, Visualizer, VizConfig};
use pathviz_core::app::{App, AppConfig};
use pathviz_crossterm::CrosstermDriver;

fn main() {
    let config = match VizConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    if let Some(path) = &config.log_file {
        match File::create(path) {
            Ok(file) => env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("info"),
            )
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init(),
            Err(e) => {
                eprintln!("Error: cannot open log file {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    let model = match Visualizer::new(&config) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    let screen = model.screen_size();
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new(),
        width: screen.x,
        height: screen.y,
        tick: Some(config.tick()),
    });

    if let Err(e) = app.run() {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
