use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors raised while constructing geometry from degenerate input.
/// Queries never fail, a miss is a normal result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: Degeneracy },
}

/// What made the input degenerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// A plane normal of zero length
    ZeroNormal,
    /// Three plane points that are coincident or lie on one line
    CollinearPoints,
    /// Plane coefficients whose `(a, b, c)` part has zero length
    ZeroCoefficients,
}

impl GeometryError {
    pub(crate) fn invalid(reason: Degeneracy) -> Self {
        log::debug!("rejecting degenerate geometry: {reason}");
        Self::InvalidGeometry { reason }
    }

    pub fn reason(&self) -> Degeneracy {
        match self {
            Self::InvalidGeometry { reason } => *reason,
        }
    }
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ZeroNormal => "plane normal has zero length",
            Self::CollinearPoints => "plane points are collinear",
            Self::ZeroCoefficients => "plane coefficients have a zero-length normal part",
        };
        f.write_str(text)
    }
}
