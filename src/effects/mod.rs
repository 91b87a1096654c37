use crate::config::Settings;
use crate::frame::FrameBuffer;
use fastrand::Rng;

pub mod fireworks;

pub trait Effect {
    fn new(settings: &Settings) -> Self
    where
        Self: Sized;
    /// Composes one frame into `frame`, which the caller has already cleared.
    /// The current screen size is `frame.viewport()`.
    fn update(&mut self, frame: &mut FrameBuffer, rng: &mut Rng);
}
