//! Shared tuning constants for the particle morphing engine.
//!
//! Values here are the defaults for `EngineConfig`; the render engine reads
//! overrides from `assets/engine_config.json` at startup.

pub mod hand;
pub mod motion;
pub mod particles;
pub mod render_settings;
pub mod shapes;
