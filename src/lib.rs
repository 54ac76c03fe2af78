//! Bounding volumes and view frustums for visibility culling, picking and collision pruning.
//!
//! Every type is a plain `Copy` value. Construction from degenerate input fails with
//! [`GeometryError`], queries never fail and report a miss as `false`, `None` or a zero count.

mod error;
pub mod math;

pub use error::{Degeneracy, GeometryError, Result};

pub mod prelude;

pub use glam;
