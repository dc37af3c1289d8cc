/// Number of landmarks in one detected hand (MediaPipe hand convention).
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Thumb tip must sit this far above the interphalangeal joint (normalised units) to count as raised.
pub const THUMB_RAISE_MARGIN: f32 = 0.1;

/// Landmark used as the palm centre for hand-position tracking (middle finger MCP).
pub const PALM_CENTER_LANDMARK: usize = 9;

/// World units per normalised image unit when mapping the palm centre to an offset.
pub const PALM_SCALE_X: f32 = 1000.0;
pub const PALM_SCALE_Y: f32 = 800.0;

/// Seconds between synthetic frames from the native keyboard source (detector cadence, ~30 Hz).
pub const SYNTHETIC_FRAME_INTERVAL: f32 = 1.0 / 30.0;
