//! Fixed proportions of the procedural skeleton
//!
//! Levels are fractions of the body height measured from the ground; widths
//! and offsets are fractions of the related [`ShapeParameters`] field.
//!
//! [`ShapeParameters`]: super::ShapeParameters

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Chest box center, fraction of height
    pub chest_level: f32,
    /// Waist capsule center, fraction of height
    pub waist_level: f32,
    /// Hip box center, fraction of height
    pub hip_level: f32,
    /// Shoulder joints, fraction of height
    pub shoulder_level: f32,

    /// Chest box half height, fraction of height
    pub chest_half_height: f32,
    /// Hip box half height, fraction of height
    pub hip_half_height: f32,
    /// Waist capsule length, fraction of height
    pub waist_span: f32,
    /// Gap between shoulders and the head sphere, fraction of height
    pub neck_length: f32,
    /// Torso depth relative to its width
    pub torso_depth: f32,

    /// Blend between chest, waist and hips
    pub torso_blend: f32,
    /// Blend of the glutes into the hips
    pub glute_blend: f32,
    /// Blend at elbows and knees
    pub limb_blend: f32,
    /// Blend at the neck and jawline
    pub head_blend: f32,

    /// Sideways run of the arms per unit of drop
    pub arm_spread: f32,
    /// Hip joint distance from the centerline, fraction of torso width
    pub leg_offset: f32,
    /// Forearm and calf radius relative to upper arm and thigh
    pub limb_taper: f32,

    /// Eye box horizontal offset, fraction of head size
    pub eye_spacing: f32,
    /// Eye box height above head center, fraction of head size
    pub eye_height: f32,
    /// Eye box half width, fraction of head size
    pub eye_size: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            chest_level: 0.70,
            waist_level: 0.55,
            hip_level: 0.45,
            shoulder_level: 0.82,
            chest_half_height: 0.09,
            hip_half_height: 0.05,
            waist_span: 0.10,
            neck_length: 0.05,
            torso_depth: 0.55,
            torso_blend: 0.15,
            glute_blend: 0.05,
            limb_blend: 0.04,
            head_blend: 0.02,
            arm_spread: 0.25,
            leg_offset: 0.3,
            limb_taper: 0.8,
            eye_spacing: 0.35,
            eye_height: 0.15,
            eye_size: 0.18,
        }
    }
}

impl BodyConfig {
    pub fn with_blends(mut self, torso: f32, limb: f32, head: f32) -> Self {
        self.torso_blend = torso;
        self.limb_blend = limb;
        self.head_blend = head;
        self
    }

    pub fn with_arm_spread(mut self, spread: f32) -> Self {
        self.arm_spread = spread;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let levels = [
            ("chest_level", self.chest_level),
            ("waist_level", self.waist_level),
            ("hip_level", self.hip_level),
            ("shoulder_level", self.shoulder_level),
        ];
        for (name, value) in levels {
            if !(value.is_finite() && value > 0.0 && value < 1.0) {
                return Err(Error::invalid(format!("{name} must lie in (0, 1), got {value}")));
            }
        }

        let positive = [
            ("chest_half_height", self.chest_half_height),
            ("hip_half_height", self.hip_half_height),
            ("waist_span", self.waist_span),
            ("neck_length", self.neck_length),
            ("torso_depth", self.torso_depth),
            ("torso_blend", self.torso_blend),
            ("glute_blend", self.glute_blend),
            ("limb_blend", self.limb_blend),
            ("head_blend", self.head_blend),
            ("leg_offset", self.leg_offset),
            ("limb_taper", self.limb_taper),
            ("eye_size", self.eye_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::invalid(format!("{name} must be positive, got {value}")));
            }
        }

        for (name, value) in [
            ("arm_spread", self.arm_spread),
            ("eye_spacing", self.eye_spacing),
            ("eye_height", self.eye_height),
        ] {
            if !value.is_finite() {
                return Err(Error::invalid(format!("{name} must be finite, got {value}")));
            }
        }
        Ok(())
    }
}
