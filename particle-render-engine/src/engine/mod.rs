pub mod config;
pub mod coordinator;
pub mod error;
pub mod gesture;
pub mod motion;
pub mod shapes;

pub mod core;
pub mod loading;
pub mod mesh;
pub mod systems;
