pub mod firework;
pub mod phase;

use super::Effect;
use crate::config::Settings;
use crate::frame::{FrameBuffer, Viewport};
use fastrand::Rng;
use firework::Firework;
use std::ops::RangeInclusive;

// Shells launch at least this many columns away from either edge.
const EDGE_MARGIN: usize = 10;

pub struct FireworksEffect {
    fireworks: Vec<Firework>,
    max_concurrent: usize,
    spawn_probability: f64,
}

impl Effect for FireworksEffect {
    fn new(settings: &Settings) -> Self {
        Self {
            fireworks: Vec::with_capacity(settings.max_concurrent),
            max_concurrent: settings.max_concurrent,
            spawn_probability: settings.spawn_probability,
        }
    }

    fn update(&mut self, frame: &mut FrameBuffer, rng: &mut Rng) {
        self.maybe_spawn(frame.viewport(), rng);

        // Spawn order is draw order; retain keeps survivors in place.
        self.fireworks.retain_mut(|firework| {
            firework.render_and_advance(frame, rng);
            if firework.is_done() {
                log::debug!("firework at x={} finished", firework.x());
                false
            } else {
                true
            }
        });
    }
}

impl FireworksEffect {
    #[cfg(test)]
    pub fn live(&self) -> &[Firework] {
        &self.fireworks
    }

    #[cfg(test)]
    pub fn push(&mut self, firework: Firework) {
        self.fireworks.push(firework);
    }

    fn maybe_spawn(&mut self, viewport: Viewport, rng: &mut Rng) {
        if self.fireworks.len() >= self.max_concurrent {
            return;
        }
        if rng.f64() >= self.spawn_probability {
            return;
        }

        let firework = Self::launch(viewport, rng);
        log::debug!(
            "launching firework at x={} max_height={} ({} live)",
            firework.x(),
            firework.max_height(),
            self.fireworks.len() + 1
        );
        self.fireworks.push(firework);
    }

    /// Picks a launch column and burst altitude for the given screen.
    fn launch(viewport: Viewport, rng: &mut Rng) -> Firework {
        let x = rng.usize(Self::column_range(viewport.cols));
        let max_height = rng.usize(Self::height_range(viewport.rows));
        Firework::new(x, max_height)
    }

    fn column_range(cols: usize) -> RangeInclusive<usize> {
        EDGE_MARGIN..=cols.saturating_sub(EDGE_MARGIN).max(EDGE_MARGIN)
    }

    /// Burst altitudes between 40% and 84% of the screen height, both truncated.
    fn height_range(rows: usize) -> RangeInclusive<usize> {
        let low = (rows as f64 * 0.4) as usize;
        let high = ((rows as f64 * 0.84) as usize).max(low);
        low..=high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::phase::{Phase, TOTAL_TICKS};

    fn settings(spawn_probability: f64) -> Settings {
        Settings {
            spawn_probability,
            ..Settings::default()
        }
    }

    #[test]
    fn test_launch_stays_inside_ranges() {
        let mut rng = Rng::with_seed(21);
        let viewport = Viewport::new(24, 80);
        for _ in 0..500 {
            let fw = FireworksEffect::launch(viewport, &mut rng);
            assert!((10..=70).contains(&fw.x()));
            assert!((9..=20).contains(&fw.max_height()));
        }
    }

    #[test]
    fn test_height_range_keeps_whole_percent_bounds() {
        assert_eq!(FireworksEffect::height_range(24), 9..=20);
        assert_eq!(FireworksEffect::height_range(75), 30..=63);
        assert_eq!(FireworksEffect::height_range(150), 60..=126);
        assert_eq!(FireworksEffect::height_range(300), 120..=252);
        assert_eq!(FireworksEffect::column_range(80), 10..=70);
        assert_eq!(FireworksEffect::column_range(50), 10..=40);
    }

    #[test]
    fn test_launch_reaches_both_ends_of_each_range() {
        let mut rng = Rng::with_seed(22);
        for (rows, cols, heights) in [(24, 80, 9..=20), (75, 120, 30..=63)] {
            let viewport = Viewport::new(rows, cols);
            let mut xs = Vec::new();
            let mut hs = Vec::new();
            for _ in 0..5000 {
                let fw = FireworksEffect::launch(viewport, &mut rng);
                xs.push(fw.x());
                hs.push(fw.max_height());
            }
            assert_eq!(xs.iter().min(), Some(&10));
            assert_eq!(xs.iter().max(), Some(&(cols - 10)));
            assert_eq!(hs.iter().min(), Some(heights.start()));
            assert_eq!(hs.iter().max(), Some(heights.end()));
        }
    }

    #[test]
    fn test_certain_spawn_adds_one_per_frame_up_to_cap() {
        let mut rng = Rng::with_seed(1);
        let mut frame = FrameBuffer::new(Viewport::new(24, 80));
        let mut effect = FireworksEffect::new(&settings(1.0));

        for expected in 1..=8 {
            frame.clear();
            effect.update(&mut frame, &mut rng);
            assert_eq!(effect.live().len(), expected);
        }
        for _ in 0..5 {
            frame.clear();
            effect.update(&mut frame, &mut rng);
            assert_eq!(effect.live().len(), 8);
        }
    }

    #[test]
    fn test_no_spawn_when_at_cap() {
        let mut rng = Rng::with_seed(2);
        let mut frame = FrameBuffer::new(Viewport::new(24, 80));
        let mut effect = FireworksEffect::new(&settings(1.0));
        for i in 0..8 {
            effect.push(Firework::new(10 + i * 5, 12));
        }

        effect.update(&mut frame, &mut rng);
        assert_eq!(effect.live().len(), 8);
        let xs: Vec<usize> = effect.live().iter().map(|f| f.x()).collect();
        assert_eq!(xs, vec![10, 15, 20, 25, 30, 35, 40, 45]);
    }

    #[test]
    fn test_zero_probability_never_spawns() {
        let mut rng = Rng::with_seed(3);
        let mut frame = FrameBuffer::new(Viewport::new(24, 80));
        let mut effect = FireworksEffect::new(&settings(0.0));
        for _ in 0..100 {
            effect.update(&mut frame, &mut rng);
        }
        assert!(effect.live().is_empty());
    }

    #[test]
    fn test_finished_fireworks_are_reaped_in_order() {
        let mut rng = Rng::with_seed(4);
        let mut frame = FrameBuffer::new(Viewport::new(24, 80));
        let mut effect = FireworksEffect::new(&settings(0.0));

        effect.push(Firework::new(20, 12));
        for _ in 0..10 {
            effect.update(&mut frame, &mut rng);
        }
        effect.push(Firework::new(40, 12));
        effect.push(Firework::new(60, 12));

        // The first shell reaches its last tick after 47 updates.
        for _ in 10..(TOTAL_TICKS - 1) {
            effect.update(&mut frame, &mut rng);
        }
        let xs: Vec<usize> = effect.live().iter().map(|f| f.x()).collect();
        assert_eq!(xs, vec![40, 60]);
        for fw in effect.live() {
            assert_eq!(fw.phases().tick(), TOTAL_TICKS - 1 - 10);
            assert_eq!(fw.phases().current(), Phase::Spark);
        }
    }

    #[test]
    fn test_update_draws_live_fireworks() {
        let mut rng = Rng::with_seed(5);
        let mut frame = FrameBuffer::new(Viewport::new(24, 80));
        let mut effect = FireworksEffect::new(&settings(0.0));
        effect.push(Firework::new(40, 16));

        effect.update(&mut frame, &mut rng);
        assert_eq!(frame.lit_cells(), vec![(23, 40)]);
    }
}
