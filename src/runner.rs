use crate::config::Settings;
use crate::effects::Effect;
use crate::frame::FrameBuffer;
use crate::terminal::{Input, Terminal};
use fastrand::Rng;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// How a run ended. Both are normal exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Quit,
    TooSmall,
}

/// Drives `E` frame by frame until the user quits.
pub fn run<E: Effect, T: Terminal>(
    terminal: &mut T,
    settings: &Settings,
    rng: &mut Rng,
) -> io::Result<RunOutcome> {
    let viewport = terminal.size()?;
    log::info!("viewport is {}x{}", viewport.rows, viewport.cols);

    if viewport.rows < settings.min_rows || viewport.cols < settings.min_cols {
        log::warn!(
            "viewport {}x{} is below the {}x{} minimum",
            viewport.rows,
            viewport.cols,
            settings.min_rows,
            settings.min_cols
        );
        terminal.show_message(&settings.too_small_message())?;
        pause(settings.warning_pause);
        return Ok(RunOutcome::TooSmall);
    }

    let mut frame = FrameBuffer::new(viewport);
    let mut effect = E::new(settings);

    loop {
        let frame_start = Instant::now();

        match terminal.poll_input()? {
            Input::Quit => {
                log::info!("quit requested");
                return Ok(RunOutcome::Quit);
            }
            Input::Resize(viewport) => {
                log::info!("resized to {}x{}", viewport.rows, viewport.cols);
                frame.resize(viewport);
            }
            Input::Nothing => {}
        }

        frame.clear();
        effect.update(&mut frame, rng);
        terminal.present(&mut frame)?;

        if let Some(rest) = settings.frame_interval.checked_sub(frame_start.elapsed()) {
            pause(rest);
        }
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
