use std::fmt;

/// Failures local to the morphing engine. None of them are retried; callers
/// degrade to a safe shape and keep running.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A hand frame carried fewer landmarks than the hand model defines.
    MalformedLandmarks { expected: usize, found: usize },
    /// The text rasterizer produced no pixel above the alpha threshold.
    EmptyTextRaster { text: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLandmarks { expected, found } => write!(
                f,
                "malformed landmark set: expected {expected} points, found {found}"
            ),
            Self::EmptyTextRaster { text } => {
                write!(f, "text raster for {text:?} produced no sample points")
            }
        }
    }
}

impl std::error::Error for EngineError {}
