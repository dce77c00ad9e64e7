//! Configuration for the hit-test adapter and the controllers
//!
//! Every section has sensible defaults, so a JSON document only needs to
//! mention what it overrides.

use nalgebra::Isometry3;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default lower bound for uniform object scale
pub const DEFAULT_MIN_SCALE: f32 = 0.1;

/// Default upper bound for uniform object scale
pub const DEFAULT_MAX_SCALE: f32 = 10.0;

/// Inclusive bounds for uniform object scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleLimits {
    pub min: f32,
    pub max: f32,
}

impl ScaleLimits {
    /// Create limits, rejecting empty, non-positive or non-finite ranges
    pub fn new(min: f32, max: f32) -> Result<Self> {
        let limits = Self { min, max };
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(&self) -> Result<()> {
        let valid = self.min.is_finite()
            && self.max.is_finite()
            && self.min > 0.0
            && self.min <= self.max;
        if valid {
            Ok(())
        } else {
            Err(Error::InvalidLimits {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Clamp `value` into the range
    ///
    /// Never panics: an inverted range resolves to `max` and NaN resolves
    /// to `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SCALE,
            max: DEFAULT_MAX_SCALE,
        }
    }
}

/// Appearance of the placement reticle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReticleConfig {
    /// Inner ring radius in meters
    pub inner_radius: f32,
    /// Outer ring radius in meters
    pub outer_radius: f32,
    /// Number of ring segments
    pub segments: usize,
    /// RGB color
    pub color: [u8; 3],
    pub opacity: f32,
}

impl ReticleConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.inner_radius >= 0.0 && self.inner_radius < self.outer_radius) {
            return Err(Error::InvalidConfig(format!(
                "reticle radii must satisfy 0 <= inner < outer, got {} and {}",
                self.inner_radius, self.outer_radius
            )));
        }
        if self.segments < 3 {
            return Err(Error::InvalidConfig(format!(
                "reticle needs at least 3 segments, got {}",
                self.segments
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::InvalidConfig(format!(
                "reticle opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        Ok(())
    }
}

impl Default for ReticleConfig {
    fn default() -> Self {
        Self {
            inner_radius: 0.15,
            outer_radius: 0.2,
            segments: 32,
            color: [255, 255, 255],
            opacity: 0.5,
        }
    }
}

/// How platform hit poses map into scene space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestConfig {
    /// Platform length units per meter
    pub units_per_meter: f32,
    /// Rigid transform from the platform's reference frame into the scene
    pub scene_from_platform: Isometry3<f32>,
}

impl HitTestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.units_per_meter.is_finite() && self.units_per_meter > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidConfig(format!(
                "units_per_meter must be positive, got {}",
                self.units_per_meter
            )))
        }
    }
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            units_per_meter: 1.0,
            scene_from_platform: Isometry3::identity(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArConfig {
    pub scale: ScaleLimits,
    pub reticle: ReticleConfig,
    pub hit_test: HitTestConfig,
}

impl ArConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.scale.validate()?;
        self.reticle.validate()?;
        self.hit_test.validate()
    }
}
