//! # arplace
//!
//! Places and manipulates a virtual object in a real-world camera view.
//!
//! This is the umbrella crate that provides convenient access to all arplace
//! functionality. You can use this crate to get everything in one place, or
//! use individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: scene-space math, transforms, scene seam, hit-test adapter
//! - **Gesture**: pinch / rotate / pan recognition from raw touches
//! - **Placement**: reticle-driven placement and pinch scaling
//!
//! ## Quick Start
//!
//! ```rust
//! use arplace::prelude::*;
//!
//! let scene = Scene::shared();
//! let chair = share(ModelObject::new("chair", TriangleMesh::cuboid(0.5, 1.0, 0.5)));
//!
//! let mut placement = PlacementController::new();
//! placement.start_placement(Some(chair), scene.clone());
//!
//! // Once per frame, with the platform's hit-test result
//! let adapter = HitTestAdapter::default();
//! let pose = PlatformPose::new([0.0, 0.0, -1.5], Some([0.0, 0.0, 0.0, 1.0]));
//! if let Some(hit) = adapter.adapt(&pose) {
//!     placement.show_reticle(&hit);
//! }
//!
//! let placed = placement.confirm_placement().unwrap();
//! let scale = ScaleController::new();
//! scale.snap_to_real_size(&mut *placed.borrow_mut(), 0.8);
//! assert_eq!(scene.borrow().len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables gesture and placement
//! - `gesture`: Touch gesture recognition
//! - `placement`: Placement and scale controllers
//! - `all`: Enables all features

// Re-export core functionality
pub use arplace_core::*;

// Re-export sub-crates
#[cfg(feature = "gesture")]
pub use arplace_gesture as gesture;

#[cfg(feature = "placement")]
pub use arplace_placement as placement;

/// Convenient imports for common use cases
pub mod prelude {
    pub use arplace_core::*;

    #[cfg(feature = "gesture")]
    pub use arplace_gesture::*;

    #[cfg(feature = "placement")]
    pub use arplace_placement::*;
}
