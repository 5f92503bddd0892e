//! Shape parameters supplied by the caller

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunable body proportions, all in meters except `muscle_tone`.
///
/// `muscle_tone` is the smoothing radius used where the torso meets the
/// limbs: larger values give fleshier joins, smaller ones sharper seams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParameters {
    pub height: f32,
    pub torso_width: f32,
    pub waist_width: f32,
    pub hip_width: f32,
    pub shoulder_width: f32,
    pub muscle_tone: f32,
    pub head_size: f32,
    pub arm_length: f32,
    pub arm_thickness: f32,
    pub leg_length: f32,
    pub leg_thickness: f32,
    pub neck_thickness: f32,
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            height: 1.8,
            torso_width: 0.34,
            waist_width: 0.26,
            hip_width: 0.32,
            shoulder_width: 0.42,
            muscle_tone: 0.06,
            head_size: 0.11,
            arm_length: 0.62,
            arm_thickness: 0.045,
            leg_length: 0.74,
            leg_thickness: 0.07,
            neck_thickness: 0.05,
        }
    }
}

impl ShapeParameters {
    /// Named view over every field, in declaration order
    pub fn fields(&self) -> [(&'static str, f32); 12] {
        [
            ("height", self.height),
            ("torso_width", self.torso_width),
            ("waist_width", self.waist_width),
            ("hip_width", self.hip_width),
            ("shoulder_width", self.shoulder_width),
            ("muscle_tone", self.muscle_tone),
            ("head_size", self.head_size),
            ("arm_length", self.arm_length),
            ("arm_thickness", self.arm_thickness),
            ("leg_length", self.leg_length),
            ("leg_thickness", self.leg_thickness),
            ("neck_thickness", self.neck_thickness),
        ]
    }

    /// Reject non-finite values and non-positive sizes.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.fields() {
            if !value.is_finite() {
                return Err(Error::invalid(format!("{name} must be finite, got {value}")));
            }
            if value <= 0.0 {
                return Err(Error::invalid(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn with_muscle_tone(mut self, muscle_tone: f32) -> Self {
        self.muscle_tone = muscle_tone;
        self
    }

    pub fn with_head_size(mut self, head_size: f32) -> Self {
        self.head_size = head_size;
        self
    }

    pub fn with_arms(mut self, length: f32, thickness: f32) -> Self {
        self.arm_length = length;
        self.arm_thickness = thickness;
        self
    }

    pub fn with_legs(mut self, length: f32, thickness: f32) -> Self {
        self.leg_length = length;
        self.leg_thickness = thickness;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ShapeParameters::default().validate().is_ok());
    }

    #[test]
    fn default_proportions() {
        let p = ShapeParameters::default();
        let expected = [
            ("height", 1.8),
            ("torso_width", 0.34),
            ("waist_width", 0.26),
            ("hip_width", 0.32),
            ("shoulder_width", 0.42),
            ("muscle_tone", 0.06),
            ("head_size", 0.11),
            ("arm_length", 0.62),
            ("arm_thickness", 0.045),
            ("leg_length", 0.74),
            ("leg_thickness", 0.07),
            ("neck_thickness", 0.05),
        ];
        assert_eq!(p.fields(), expected);
    }

    #[test]
    fn rejects_non_finite() {
        let params = ShapeParameters::default().with_height(f32::NAN);
        let err = params.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(ref msg) if msg.contains("height")));

        let params = ShapeParameters::default().with_arms(f32::INFINITY, 0.05);
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_negative_and_zero_lengths() {
        let params = ShapeParameters::default().with_legs(-0.5, 0.07);
        let err = params.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(ref msg) if msg.contains("leg_length")));

        let params = ShapeParameters::default().with_muscle_tone(0.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn deserializes_partial_json_over_defaults() {
        let params: ShapeParameters =
            serde_json::from_str(r#"{ "height": 1.6, "head_size": 0.1 }"#).unwrap();
        assert_eq!(params.height, 1.6);
        assert_eq!(params.head_size, 0.1);
        assert_eq!(params.arm_length, ShapeParameters::default().arm_length);
    }
}
