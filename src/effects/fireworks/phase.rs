/// Lifecycle stage of a firework. Stages repeat in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Rise,
    Expand,
    Spark,
}

impl Phase {
    pub const ORDER: [Phase; 3] = [Phase::Rise, Phase::Expand, Phase::Spark];

    /// Ticks spent in this phase per cycle.
    pub const fn duration(self) -> u32 {
        match self {
            Phase::Rise => 8,
            Phase::Expand => 10,
            Phase::Spark => 30,
        }
    }

    pub const fn next(self) -> Phase {
        match self {
            Phase::Rise => Phase::Expand,
            Phase::Expand => Phase::Spark,
            Phase::Spark => Phase::Rise,
        }
    }
}

// Cumulative end offsets, in `Phase::ORDER`.
const BOUNDS: [u32; 3] = [
    Phase::Rise.duration(),
    Phase::Rise.duration() + Phase::Expand.duration(),
    Phase::Rise.duration() + Phase::Expand.duration() + Phase::Spark.duration(),
];

pub const TOTAL_TICKS: u32 = BOUNDS[2];

/// Cyclic tick counter that knows which phase it is in.
#[derive(Debug, Clone)]
pub struct PhaseSequence {
    tick: u32,
    phase_tick: u32,
    current: Phase,
}

impl PhaseSequence {
    pub fn new() -> Self {
        Self {
            tick: 0,
            phase_tick: 0,
            current: Phase::Rise,
        }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn phase_tick(&self) -> u32 {
        self.phase_tick
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn advance(&mut self) {
        let previous = self.current;
        self.tick = (self.tick + 1) % TOTAL_TICKS;
        self.phase_tick += 1;
        self.current = Self::phase_at(self.tick);
        if self.current != previous {
            debug_assert_eq!(self.current, previous.next());
            self.phase_tick = 0;
        }
    }

    /// First phase whose cumulative end lies past `tick`.
    pub fn phase_at(tick: u32) -> Phase {
        BOUNDS
            .iter()
            .position(|&end| tick < end)
            .map_or(Phase::Spark, |i| Phase::ORDER[i])
    }
}
