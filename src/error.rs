//! Error kinds raised by garment preparation and per-frame compositing.
//!
//! Preparation errors (`InvalidGarmentImage`, `InvalidLandmarkData`) abort an
//! upload and leave the cached garment untouched. Frame errors
//! (`DegenerateQuad`, `HomographySolveFailure`) only skip the overlay for the
//! frame that produced them.

/// Which quad of a correspondence failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadRole {
    Garment,
    Body,
}

/// Geometric defect found in a quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadDefect {
    /// A corner holds NaN or infinity.
    NonFinite,
    /// The quad spans less than the minimum extent (e.g. all corners equal).
    Collapsed,
    /// Some three corners lie on a line (includes repeated corners).
    Collinear,
}

/// Why landmark data was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LandmarkDefect {
    TooShort { found: usize, required: usize },
    NonFinite { index: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub enum TryOnError {
    InvalidGarmentImage { width: usize, height: usize },
    InvalidLandmarkData(LandmarkDefect),
    DegenerateQuad { role: QuadRole, defect: QuadDefect },
    HomographySolveFailure(&'static str),
}

impl TryOnError {
    /// True for errors that only affect a single frame.
    pub fn is_per_frame(&self) -> bool {
        matches!(
            self,
            TryOnError::DegenerateQuad { .. } | TryOnError::HomographySolveFailure(_)
        )
    }
}

impl std::fmt::Display for QuadRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuadRole::Garment => f.write_str("garment"),
            QuadRole::Body => f.write_str("body"),
        }
    }
}

impl std::fmt::Display for QuadDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuadDefect::NonFinite => f.write_str("non-finite corner"),
            QuadDefect::Collapsed => f.write_str("zero-extent quad"),
            QuadDefect::Collinear => f.write_str("collinear corners"),
        }
    }
}

impl std::fmt::Display for TryOnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TryOnError::InvalidGarmentImage { width, height } => {
                write!(f, "invalid garment image ({width}x{height})")
            }
            TryOnError::InvalidLandmarkData(LandmarkDefect::TooShort { found, required }) => {
                write!(
                    f,
                    "invalid landmark data ({found} values, need at least {required})"
                )
            }
            TryOnError::InvalidLandmarkData(LandmarkDefect::NonFinite { index }) => {
                write!(f, "invalid landmark data (landmark {index} is not finite)")
            }
            TryOnError::DegenerateQuad { role, defect } => {
                write!(f, "degenerate {role} quad: {defect}")
            }
            TryOnError::HomographySolveFailure(reason) => {
                write!(f, "homography solve failed: {reason}")
            }
        }
    }
}

impl std::error::Error for TryOnError {}
