use super::phase::{Phase, PhaseSequence, TOTAL_TICKS};
use crate::frame::{FrameBuffer, Viewport};
use fastrand::Rng;

pub const GLYPH: char = '*';
pub const SPARK_COUNT: usize = 30;

// Ring is sampled every 10 degrees.
const RING_POINTS: usize = 36;

/// A falling point released when the shell bursts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub row: f64,
    pub col: f64,
    pub row_velocity: f64, // Positive is downward
    pub col_velocity: f64,
}

impl Spark {
    fn on_ring(center_row: f64, center_col: f64, radius: f64, rng: &mut Rng) -> Self {
        let angle = rng.f64() * std::f64::consts::TAU;
        Self {
            row: center_row + radius * angle.sin(),
            col: center_col + radius * angle.cos(),
            row_velocity: 0.2 + rng.f64() * 0.6,  // 0.2 to 0.8 rows per frame
            col_velocity: -0.2 + rng.f64() * 0.4, // -0.2 to 0.2 cols per frame
        }
    }

    fn step(&mut self) {
        self.row += self.row_velocity;
        self.col += self.col_velocity;
    }
}

/// One shell: rises from the bottom row, bursts into a ring, then showers sparks.
pub struct Firework {
    x: usize,
    max_height: usize,
    phases: PhaseSequence,
    sparks: Option<[Spark; SPARK_COUNT]>,
}

impl Firework {
    pub fn new(x: usize, max_height: usize) -> Self {
        Self {
            x,
            max_height,
            phases: PhaseSequence::new(),
            sparks: None,
        }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn max_height(&self) -> usize {
        self.max_height
    }

    #[cfg(test)]
    pub fn phases(&self) -> &PhaseSequence {
        &self.phases
    }

    #[cfg(test)]
    pub fn sparks(&self) -> &[Spark] {
        match &self.sparks {
            Some(sparks) => sparks,
            None => &[],
        }
    }

    /// True on the final tick of the cycle.
    pub fn is_done(&self) -> bool {
        self.phases.current() == Phase::Spark && self.phases.tick() == TOTAL_TICKS - 1
    }

    /// Draws the current phase into `frame`, then moves one tick forward.
    pub fn render_and_advance(&mut self, frame: &mut FrameBuffer, rng: &mut Rng) {
        let viewport = frame.viewport();
        match self.phases.current() {
            Phase::Rise => {
                let row = self.rise_row(viewport);
                Self::plot(frame, row, self.x as i32);
            }
            Phase::Expand => self.draw_ring(frame),
            Phase::Spark => self.draw_sparks(frame, rng),
        }
        self.phases.advance();
    }

    pub(crate) fn rise_row(&self, viewport: Viewport) -> i32 {
        let climb = (self.max_height / Phase::Rise.duration() as usize) as i32;
        viewport.rows as i32 - 1 - self.phases.phase_tick() as i32 * climb
    }

    /// Final ring radius, reached as Expand hands over to Spark.
    pub(crate) fn burst_radius(viewport: Viewport) -> f64 {
        (viewport.rows.min(viewport.cols) / 4) as f64
    }

    pub(crate) fn expand_radius(&self, viewport: Viewport) -> f64 {
        Self::burst_radius(viewport) / Phase::Expand.duration() as f64
            * self.phases.phase_tick() as f64
    }

    fn draw_ring(&self, frame: &mut FrameBuffer) {
        let viewport = frame.viewport();
        let radius = self.expand_radius(viewport);
        // Centered on max_height counted from the top edge, not the rise apex.
        let center_y = self.max_height as f64;

        for i in 0..RING_POINTS {
            let angle = ((i * 360 / RING_POINTS) as f64).to_radians();
            let row = viewport.rows as i32 - (center_y - radius * angle.sin()) as i32;
            let col = (self.x as f64 + radius * angle.cos()) as i32;
            Self::plot(frame, row, col);
        }
    }

    fn draw_sparks(&mut self, frame: &mut FrameBuffer, rng: &mut Rng) {
        let viewport = frame.viewport();
        let seeding = self.sparks.is_none();
        let center_row = viewport.rows as f64 - self.max_height as f64;
        let center_col = self.x as f64;
        let radius = Self::burst_radius(viewport);

        let sparks = self.sparks.get_or_insert_with(|| {
            std::array::from_fn(|_| Spark::on_ring(center_row, center_col, radius, rng))
        });
        if seeding {
            log::debug!("firework at x={} burst into {} sparks", self.x, SPARK_COUNT);
        }

        let moving = self.phases.phase_tick() > 0;
        for spark in sparks.iter_mut() {
            if moving {
                spark.step();
            }
            Self::plot(frame, spark.row as i32, spark.col as i32);
        }
    }

    fn plot(frame: &mut FrameBuffer, row: i32, col: i32) {
        if let Some((row, col)) = frame.viewport().clip(row, col) {
            frame.put(row, col, GLYPH);
        }
    }
}
