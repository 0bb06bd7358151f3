//! pb-core: stable foundation for plantboard.
//!
//! Contains:
//! - error (shared error types)
//! - numeric (Real + float helpers)
//! - geom (Point / Rect primitives in canvas units)
//! - ids (entity id allocation)

pub mod error;
pub mod geom;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PbError, PbResult};
pub use geom::*;
pub use ids::*;
pub use numeric::*;
