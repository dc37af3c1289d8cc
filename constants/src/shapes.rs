/// Half-extents of the idle scatter box.
pub const IDLE_HALF_EXTENTS: [f32; 3] = [600.0, 500.0, 500.0];

/// Half-extent of the fist core cube.
pub const FIST_HALF_EXTENT: f32 = 5.0;

/// Radius of the thumbs-up sphere.
pub const SPHERE_RADIUS: f32 = 220.0;

/// Heart curve scale and jitter.
pub const HEART_SCALE: f32 = 15.0;
pub const HEART_JITTER: f32 = 10.0;
pub const HEART_DEPTH: f32 = 20.0;

/// Text shown for the rock-on gesture.
pub const TEXT_MESSAGE: &str = "I LOVE YOU NANDA";

/// Off-screen canvas the text is rasterised into.
pub const TEXT_CANVAS_WIDTH: u32 = 1200;
pub const TEXT_CANVAS_HEIGHT: u32 = 200;

/// Pixel stride used when scanning the text canvas.
pub const TEXT_SAMPLE_STEP: u32 = 2;

/// Alpha a pixel must exceed to become a sample point.
pub const TEXT_ALPHA_THRESHOLD: u8 = 128;

/// Text cloud scale and jitter.
pub const TEXT_SCALE: f32 = 1.5;
pub const TEXT_JITTER: f32 = 4.0;
pub const TEXT_DEPTH: f32 = 10.0;

/// Bold sans-serif face the rock-on text is drawn with, relative to the asset root.
pub const TEXT_FONT_PATH: &str = "fonts/DejaVuSans-Bold.ttf";
pub const TEXT_FONT_SIZE: f32 = 100.0;
