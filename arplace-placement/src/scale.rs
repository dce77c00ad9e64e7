//! Uniform scale control: clamping, pinch accumulation and real-size snapping

use std::rc::Rc;

use arplace_core::{ObjectHandle, ObjectId, Result, SceneObject, ScaleLimits};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Per-call override of the controller's scale limits
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl ScaleBounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Fill the gaps from `defaults`
    pub fn resolve(&self, defaults: &ScaleLimits) -> ScaleLimits {
        ScaleLimits {
            min: self.min.unwrap_or(defaults.min),
            max: self.max.unwrap_or(defaults.max),
        }
    }
}

struct PinchBinding {
    object: ObjectHandle,
    id: ObjectId,
    last_committed: f32,
}

/// Applies clamped uniform scale, one pinch-bound object at a time
pub struct ScaleController {
    limits: ScaleLimits,
    pinch: Option<PinchBinding>,
}

impl ScaleController {
    pub fn new() -> Self {
        Self::with_limits(ScaleLimits::default())
    }

    pub fn with_limits(limits: ScaleLimits) -> Self {
        Self {
            limits,
            pinch: None,
        }
    }

    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Replace the default limits used when a call gives no bounds
    ///
    /// Invalid ranges are rejected and the previous limits stay in place.
    pub fn set_limits(&mut self, min: f32, max: f32) -> Result<()> {
        self.limits = ScaleLimits::new(min, max)?;
        debug!(min, max, "scale limits updated");
        Ok(())
    }

    /// Clamp `scale` and apply it to all three axes, returning the applied value
    pub fn set_scale(&self, object: &mut dyn SceneObject, scale: f32, bounds: ScaleBounds) -> f32 {
        let clamped = bounds.resolve(&self.limits).clamp(scale);
        object.transform_mut().set_uniform_scale(clamped);
        clamped
    }

    /// Bind `object` as the pinch target, replacing any previous binding
    ///
    /// The object's current scale, clamped, becomes the pinch baseline.
    pub fn enable_pinch_scale(&mut self, object: ObjectHandle) {
        self.disable_pinch_scale();
        let (id, current) = {
            let o = object.borrow();
            (o.id(), o.transform().uniform_scale())
        };
        let last_committed = self.limits.clamp(current);
        debug!(%id, baseline = last_committed, "pinch scale enabled");
        self.pinch = Some(PinchBinding {
            object,
            id,
            last_committed,
        });
    }

    /// Scale the bound object by `factor` relative to the baseline
    ///
    /// The clamped result becomes the new baseline. Returns the applied
    /// scale, or `None` when nothing is bound or the factor is unusable.
    pub fn apply_pinch_scale(&mut self, factor: f32) -> Option<f32> {
        let limits = self.limits;
        let binding = self.pinch.as_mut()?;
        if !factor.is_finite() || factor <= 0.0 {
            trace!(factor, "ignoring degenerate pinch factor");
            return None;
        }

        let next = limits.clamp(binding.last_committed * factor);
        binding
            .object
            .borrow_mut()
            .transform_mut()
            .set_uniform_scale(next);
        binding.last_committed = next;
        Some(next)
    }

    /// Re-read the bound object's scale as the baseline for the next gesture
    pub fn commit_pinch_scale(&mut self) {
        let limits = self.limits;
        if let Some(binding) = self.pinch.as_mut() {
            let current = binding.object.borrow().transform().uniform_scale();
            binding.last_committed = limits.clamp(current);
            trace!(baseline = binding.last_committed, "pinch scale committed");
        }
    }

    /// Scale `object` so its largest local dimension measures `size_meters`
    ///
    /// Empty or zero-size geometry counts as one meter. A non-positive or
    /// non-finite size leaves the object alone. Returns the resulting scale.
    pub fn snap_to_real_size(&self, object: &mut dyn SceneObject, size_meters: f32) -> f32 {
        if !size_meters.is_finite() || size_meters <= 0.0 {
            trace!(size_meters, "ignoring degenerate real-world size");
            return object.transform().uniform_scale();
        }

        let max_dimension = object
            .local_bounds()
            .map(|b| b.max_dimension())
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or_else(|| {
                trace!(id = %object.id(), "degenerate bounds, assuming unit size");
                1.0
            });

        let scale = size_meters / max_dimension;
        object.transform_mut().set_uniform_scale(scale);
        debug!(id = %object.id(), size_meters, scale, "snapped to real size");
        scale
    }

    pub fn pinch_target(&self) -> Option<ObjectId> {
        self.pinch.as_ref().map(|b| b.id)
    }

    pub fn pinch_object(&self) -> Option<ObjectHandle> {
        self.pinch.as_ref().map(|b| Rc::clone(&b.object))
    }

    pub fn last_committed_scale(&self) -> Option<f32> {
        self.pinch.as_ref().map(|b| b.last_committed)
    }

    /// Release the pinch binding. Idempotent.
    pub fn disable_pinch_scale(&mut self) {
        if let Some(binding) = self.pinch.take() {
            debug!(id = %binding.id, "pinch scale disabled");
        }
    }

    /// Release the binding and restore default limits
    pub fn dispose(&mut self) {
        self.disable_pinch_scale();
        self.limits = ScaleLimits::default();
    }
}

impl Default for ScaleController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arplace_core::{share, Bounded, ModelObject, TriangleMesh, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};
    use proptest::prelude::*;

    fn boxed(width: f32, height: f32, depth: f32) -> ModelObject {
        ModelObject::new("box", TriangleMesh::cuboid(width, height, depth))
    }

    #[test]
    fn test_set_scale_clamps_to_defaults() {
        let controller = ScaleController::new();
        let mut object = boxed(1.0, 1.0, 1.0);

        assert_eq!(controller.set_scale(&mut object, 50.0, ScaleBounds::default()), DEFAULT_MAX_SCALE);
        assert_eq!(object.transform().scale.y, DEFAULT_MAX_SCALE);
        assert_eq!(controller.set_scale(&mut object, 0.0, ScaleBounds::default()), DEFAULT_MIN_SCALE);
        assert_eq!(controller.set_scale(&mut object, 2.0, ScaleBounds::default()), 2.0);
    }

    #[test]
    fn test_per_call_bounds_override_once() {
        let controller = ScaleController::new();
        let mut object = boxed(1.0, 1.0, 1.0);

        let bounds = ScaleBounds { min: None, max: Some(1.5) };
        assert_eq!(controller.set_scale(&mut object, 3.0, bounds), 1.5);
        assert_eq!(controller.set_scale(&mut object, 3.0, ScaleBounds::default()), 3.0);
        assert_eq!(controller.limits(), ScaleLimits::default());
    }

    #[test]
    fn test_set_limits_validates() {
        let mut controller = ScaleController::new();
        controller.set_limits(0.5, 2.0).unwrap();
        assert!(controller.set_limits(3.0, 1.0).is_err());
        assert_eq!(controller.limits(), ScaleLimits { min: 0.5, max: 2.0 });

        let mut object = boxed(1.0, 1.0, 1.0);
        assert_eq!(controller.set_scale(&mut object, 5.0, ScaleBounds::default()), 2.0);
    }

    #[test]
    fn test_pinch_without_binding_is_noop() {
        let mut controller = ScaleController::new();
        assert!(controller.apply_pinch_scale(2.0).is_none());
        controller.commit_pinch_scale();
        controller.disable_pinch_scale();
        assert!(controller.last_committed_scale().is_none());
    }

    #[test]
    fn test_pinch_rebases_on_every_frame() {
        let mut controller = ScaleController::new();
        let object = share(boxed(1.0, 1.0, 1.0));
        controller.enable_pinch_scale(object.clone());
        assert_eq!(controller.last_committed_scale(), Some(1.0));

        assert_eq!(controller.apply_pinch_scale(2.0), Some(2.0));
        assert_eq!(controller.apply_pinch_scale(1.5), Some(3.0));
        assert_eq!(object.borrow().transform().uniform_scale(), 3.0);
        assert_eq!(controller.last_committed_scale(), Some(3.0));

        controller.commit_pinch_scale();
        assert_eq!(controller.last_committed_scale(), Some(3.0));
    }

    #[test]
    fn test_pinch_clamps_and_baseline_stays_in_range() {
        let mut controller = ScaleController::new();
        controller.set_limits(0.5, 4.0).unwrap();
        let object = share(boxed(1.0, 1.0, 1.0));
        controller.enable_pinch_scale(object.clone());

        assert_eq!(controller.apply_pinch_scale(100.0), Some(4.0));
        assert_eq!(controller.last_committed_scale(), Some(4.0));
        assert_eq!(controller.apply_pinch_scale(0.01), Some(0.5));
        assert!(controller.apply_pinch_scale(f32::NAN).is_none());
        assert!(controller.apply_pinch_scale(-1.0).is_none());
        assert_eq!(object.borrow().transform().uniform_scale(), 0.5);
    }

    #[test]
    fn test_commit_picks_up_external_changes() {
        let mut controller = ScaleController::new();
        let object = share(boxed(1.0, 1.0, 1.0));
        controller.enable_pinch_scale(object.clone());

        controller.set_scale(&mut *object.borrow_mut(), 2.5, ScaleBounds::default());
        assert_eq!(controller.last_committed_scale(), Some(1.0));
        controller.commit_pinch_scale();
        assert_eq!(controller.last_committed_scale(), Some(2.5));
        assert_eq!(controller.apply_pinch_scale(2.0), Some(5.0));
    }

    #[test]
    fn test_rebinding_replaces_target() {
        let mut controller = ScaleController::new();
        let first = share(boxed(1.0, 1.0, 1.0));
        let second = share(boxed(1.0, 1.0, 1.0));
        second.borrow_mut().transform_mut().set_uniform_scale(20.0);

        controller.enable_pinch_scale(first.clone());
        controller.enable_pinch_scale(second.clone());
        assert_eq!(controller.pinch_target(), Some(second.borrow().id()));
        // Out-of-range current scale is clamped into the baseline.
        assert_eq!(controller.last_committed_scale(), Some(DEFAULT_MAX_SCALE));

        controller.apply_pinch_scale(0.5);
        assert_eq!(first.borrow().transform().uniform_scale(), 1.0);
        assert_eq!(second.borrow().transform().uniform_scale(), 5.0);
    }

    #[test]
    fn test_snap_to_real_size() {
        let controller = ScaleController::new();
        let mut object = boxed(0.2, 0.5, 0.1);
        let scale = controller.snap_to_real_size(&mut object, 1.0);
        assert_relative_eq!(scale, 2.0);
        assert_eq!(object.transform().scale.z, 2.0);
    }

    #[test]
    fn test_snap_degenerate_geometry_counts_as_unit() {
        let controller = ScaleController::new();
        let mut empty = ModelObject::new("empty", TriangleMesh::new());
        assert_eq!(controller.snap_to_real_size(&mut empty, 0.3), 0.3);

        let mut point = boxed(0.0, 0.0, 0.0);
        assert_eq!(controller.snap_to_real_size(&mut point, 0.7), 0.7);

        assert_eq!(controller.snap_to_real_size(&mut point, f32::NAN), 0.7);
    }

    #[test]
    fn test_dispose_resets_everything() {
        let mut controller = ScaleController::new();
        controller.set_limits(1.0, 2.0).unwrap();
        controller.enable_pinch_scale(share(boxed(1.0, 1.0, 1.0)));
        controller.dispose();
        controller.dispose();
        assert!(controller.pinch_target().is_none());
        assert_eq!(controller.limits(), ScaleLimits::default());
    }

    proptest! {
        #[test]
        fn set_scale_is_exact_clamp(min in 0.01f32..5.0, span in 0.0f32..20.0, scale in -50.0f32..50.0) {
            let controller = ScaleController::new();
            let mut object = boxed(1.0, 1.0, 1.0);
            let max = min + span;
            let applied = controller.set_scale(&mut object, scale, ScaleBounds::new(min, max));
            prop_assert_eq!(applied, scale.clamp(min, max));
            prop_assert_eq!(object.transform().scale, arplace_core::Vector3f::repeat(applied));
        }

        #[test]
        fn snap_hits_requested_size(w in 0.01f32..10.0, h in 0.01f32..10.0, d in 0.01f32..10.0, size in 0.01f32..5.0) {
            let controller = ScaleController::new();
            let mut object = boxed(w, h, d);
            controller.snap_to_real_size(&mut object, size);

            let world = object.local_bounds().unwrap().transformed(object.transform());
            prop_assert!((world.max_dimension() - size).abs() <= size * 1e-4);
        }
    }
}
