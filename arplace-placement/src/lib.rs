//! Object placement and scaling for arplace
//!
//! This crate provides the two stateful controllers of an AR placement flow:
//! - [`PlacementController`]: reticle-driven place / confirm / cancel
//! - [`ScaleController`]: clamped uniform scale, pinch accumulation and
//!   snapping to a real-world size

pub mod reticle;
pub mod placement;
pub mod scale;

pub use reticle::*;
pub use placement::*;
pub use scale::*;
