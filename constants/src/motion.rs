/// Fraction of the remaining distance each particle covers per frame.
pub const SMOOTHING_FACTOR: f32 = 0.08;

/// Amplitude of the idle wander added to x and y.
pub const IDLE_WANDER_AMPLITUDE: f32 = 20.0;

/// Per-particle phase step of the idle wander so neighbours drift out of sync.
pub const IDLE_WANDER_PHASE_STEP: f32 = 0.001;
