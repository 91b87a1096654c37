use std::env;
use std::path::PathBuf;

mod config;
mod effects;
mod error;
mod frame;
mod logging;
mod runner;
mod terminal;

use config::Settings;
use effects::fireworks::FireworksEffect;
use terminal::CrosstermTerminal;

fn main() -> error::Result<()> {
    let log_path = env::var_os(config::LOG_ENV).map(PathBuf::from);
    logging::init(log_path.as_deref())?;

    let settings = Settings::default();
    let mut rng = fastrand::Rng::new();

    // Dropping the terminal restores it, on error paths and panics too.
    let mut terminal = CrosstermTerminal::enter()?;
    let outcome = runner::run::<FireworksEffect, _>(&mut terminal, &settings, &mut rng)?;
    drop(terminal);

    log::info!("exiting after {:?}", outcome);
    Ok(())
}
