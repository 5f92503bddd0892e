//! Joint positions and radii derived from shape parameters

use super::{BodyConfig, ShapeParameters};
use glam::Vec3;

/// One arm or leg: upper segment `root -> joint`, lower segment `joint -> end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limb {
    pub root: Vec3,
    pub joint: Vec3,
    pub end: Vec3,
    pub upper_radius: f32,
    pub lower_radius: f32,
}

/// A rounded box placed in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub radius: f32,
}

impl Block {
    /// Block whose outer (rounded) size matches `half_size` exactly
    fn with_outer_size(center: Vec3, half_size: Vec3) -> Self {
        let radius = 0.3 * half_size.min_element();
        Self {
            center,
            half_extents: half_size - Vec3::splat(radius),
            radius,
        }
    }
}

/// World-space layout of every named body region. Y-up, facing +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub chest: Block,
    pub hips: Block,
    /// Base of the vertical waist capsule
    pub waist_base: Vec3,
    pub waist_span: f32,
    pub waist_radius: f32,

    pub glutes: [Vec3; 2],
    pub glute_radius: f32,

    pub shoulders: [Vec3; 2],
    pub shoulder_radius: f32,
    pub neck_base: Vec3,
    pub trap_radius: f32,

    /// Left (+X) then right (-X)
    pub arms: [Limb; 2],
    pub legs: [Limb; 2],

    /// Base of the vertical neck capsule
    pub neck_root: Vec3,
    pub neck_span: f32,
    pub neck_radius: f32,
    pub head_center: Vec3,
    pub head_radius: f32,

    pub eyes: [Vec3; 2],
    pub eye_half_extents: Vec3,
}

impl Skeleton {
    pub fn new(params: &ShapeParameters, config: &BodyConfig) -> Self {
        let h = params.height;
        let depth = config.torso_depth;

        let chest = Block::with_outer_size(
            Vec3::new(0.0, config.chest_level * h, 0.0),
            Vec3::new(
                params.torso_width * 0.5,
                config.chest_half_height * h,
                params.torso_width * depth * 0.5,
            ),
        );
        let hips = Block::with_outer_size(
            Vec3::new(0.0, config.hip_level * h, 0.0),
            Vec3::new(
                params.hip_width * 0.5,
                config.hip_half_height * h,
                params.hip_width * depth * 0.5,
            ),
        );

        let waist_span = config.waist_span * h;
        let waist_base = Vec3::new(0.0, config.waist_level * h - waist_span * 0.5, 0.0);

        // Glutes sit low and behind the hip block
        let glute_y = hips.center.y - config.hip_half_height * h * 0.3;
        let glute_z = -params.hip_width * depth * 0.3;
        let glute_x = params.hip_width * 0.22;
        let glutes = [
            Vec3::new(glute_x, glute_y, glute_z),
            Vec3::new(-glute_x, glute_y, glute_z),
        ];

        let shoulder_y = config.shoulder_level * h;
        let shoulder_x = params.shoulder_width * 0.5;
        let shoulders = [
            Vec3::new(shoulder_x, shoulder_y, 0.0),
            Vec3::new(-shoulder_x, shoulder_y, 0.0),
        ];
        let neck_base = Vec3::new(0.0, shoulder_y + params.neck_thickness, 0.0);

        let arms = [1.0f32, -1.0].map(|side| {
            let dir = Vec3::new(side * config.arm_spread, -1.0, 0.0).normalize();
            let root = Vec3::new(side * shoulder_x, shoulder_y, 0.0);
            Limb {
                root,
                joint: root + dir * (params.arm_length * 0.5),
                end: root + dir * params.arm_length,
                upper_radius: params.arm_thickness,
                lower_radius: params.arm_thickness * config.limb_taper,
            }
        });

        let legs = [1.0f32, -1.0].map(|side| {
            let root = Vec3::new(side * config.leg_offset * params.torso_width, hips.center.y, 0.0);
            Limb {
                root,
                joint: root - Vec3::Y * (params.leg_length * 0.5),
                end: root - Vec3::Y * params.leg_length,
                upper_radius: params.leg_thickness,
                lower_radius: params.leg_thickness * config.limb_taper,
            }
        });

        let head_radius = params.head_size;
        let head_center = Vec3::new(0.0, shoulder_y + config.neck_length * h + head_radius, 0.0);
        let neck_root = Vec3::new(0.0, chest.center.y + config.chest_half_height * h, 0.0);
        let neck_span = (head_center.y - neck_root.y).max(0.0);

        let eye_offset = Vec3::new(
            config.eye_spacing * head_radius,
            config.eye_height * head_radius,
            0.85 * head_radius,
        );
        let eyes = [
            head_center + eye_offset,
            head_center + eye_offset * Vec3::new(-1.0, 1.0, 1.0),
        ];
        let eye_half_extents = Vec3::new(
            config.eye_size * head_radius,
            config.eye_size * head_radius * 0.6,
            0.3 * head_radius,
        );

        Self {
            chest,
            hips,
            waist_base,
            waist_span,
            waist_radius: params.waist_width * 0.5,
            glutes,
            glute_radius: params.hip_width * 0.24,
            shoulders,
            shoulder_radius: params.arm_thickness * 1.5,
            neck_base,
            trap_radius: params.neck_thickness,
            arms,
            legs,
            neck_root,
            neck_span,
            neck_radius: params.neck_thickness,
            head_center,
            head_radius,
            eyes,
            eye_half_extents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_skeleton() -> Skeleton {
        Skeleton::new(&ShapeParameters::default(), &BodyConfig::default())
    }

    #[test]
    fn torso_regions_stack_along_height() {
        let s = default_skeleton();
        assert_relative_eq!(s.chest.center.y, 0.70 * 1.8, epsilon = 1e-5);
        assert_relative_eq!(s.hips.center.y, 0.45 * 1.8, epsilon = 1e-5);
        assert_relative_eq!(s.waist_base.y + s.waist_span * 0.5, 0.55 * 1.8, epsilon = 1e-5);
        assert!(s.chest.center.y > s.hips.center.y);
    }

    #[test]
    fn blocks_keep_outer_size() {
        let s = default_skeleton();
        let outer = s.chest.half_extents + Vec3::splat(s.chest.radius);
        assert_relative_eq!(outer.x, 0.17, epsilon = 1e-6);
        assert!(s.chest.half_extents.min_element() > 0.0);
    }

    #[test]
    fn limbs_are_mirrored() {
        let s = default_skeleton();
        let mirror = Vec3::new(-1.0, 1.0, 1.0);
        for limbs in [s.arms, s.legs] {
            assert_relative_eq!(limbs[0].end.x, -limbs[1].end.x, epsilon = 1e-6);
            assert_eq!(limbs[0].joint * mirror, limbs[1].joint);
        }
    }

    #[test]
    fn arm_segments_split_arm_length() {
        let params = ShapeParameters::default();
        let s = default_skeleton();
        let arm = s.arms[0];
        assert_relative_eq!(arm.root.distance(arm.joint), params.arm_length * 0.5, epsilon = 1e-5);
        assert_relative_eq!(arm.root.distance(arm.end), params.arm_length, epsilon = 1e-5);
        assert!(arm.end.x > arm.root.x, "arms spread outward");
    }

    #[test]
    fn head_sits_above_shoulders() {
        let s = default_skeleton();
        assert!(s.head_center.y - s.head_radius > s.shoulders[0].y);
        assert!(s.head_center.y + s.head_radius < 1.9);
        assert_relative_eq!(s.neck_root.y + s.neck_span, s.head_center.y, epsilon = 1e-5);
    }

    #[test]
    fn eyes_on_front_face() {
        let s = default_skeleton();
        for eye in s.eyes {
            assert!(eye.z > s.head_center.z);
            assert!(eye.distance(s.head_center) < s.head_radius);
        }
    }
}
