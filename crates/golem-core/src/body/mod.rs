//! Procedural humanoid assembled from SDF primitives
//!
//! [`HumanoidBody`] evaluates a fixed composition of named regions (see
//! [`BodyPart`]). The same per-region distances drive both the blended
//! distance field used for meshing and the nearest-region classifier used to
//! color vertices.
//!
//! ```rust,ignore
//! use golem_core::prelude::*;
//!
//! let body = HumanoidBody::new(ShapeParameters::default(), &BodyConfig::default())?;
//! assert!(body.distance(Vec3::new(0.0, 1.0, 0.0)) < 0.0);
//! assert_eq!(body.classify(body.skeleton().head_center), BodyPart::Head);
//! ```

mod config;
mod params;
mod skeleton;

pub use config::BodyConfig;
pub use params::ShapeParameters;
pub use skeleton::{Block, Limb, Skeleton};

use crate::Result;
use crate::sdf::operations::{op_smooth_union, op_union};
use crate::sdf::primitives::{sd_box, sd_capsule, sd_round_box, sd_sphere, sd_vertical_capsule};
use crate::sdf::{Aabb, Classify, Sdf};
use glam::Vec3;

/// Named body regions, used to tag vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Head,
    Eye,
    Neck,
    Torso,
    Glutes,
    Shoulders,
    Trapezius,
    UpperArm,
    Forearm,
    Thigh,
    Calf,
}

impl BodyPart {
    pub const ALL: [BodyPart; 11] = [
        BodyPart::Head,
        BodyPart::Eye,
        BodyPart::Neck,
        BodyPart::Torso,
        BodyPart::Glutes,
        BodyPart::Shoulders,
        BodyPart::Trapezius,
        BodyPart::UpperArm,
        BodyPart::Forearm,
        BodyPart::Thigh,
        BodyPart::Calf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BodyPart::Head => "head",
            BodyPart::Eye => "eye",
            BodyPart::Neck => "neck",
            BodyPart::Torso => "torso",
            BodyPart::Glutes => "glutes",
            BodyPart::Shoulders => "shoulders",
            BodyPart::Trapezius => "trapezius",
            BodyPart::UpperArm => "upper_arm",
            BodyPart::Forearm => "forearm",
            BodyPart::Thigh => "thigh",
            BodyPart::Calf => "calf",
        }
    }

    /// Debug RGBA color for this region
    pub fn color(self) -> [f32; 4] {
        match self {
            BodyPart::Head => [0.95, 0.80, 0.69, 1.0],
            BodyPart::Eye => [0.10, 0.10, 0.12, 1.0],
            BodyPart::Neck => [0.88, 0.72, 0.62, 1.0],
            BodyPart::Torso => [0.80, 0.30, 0.30, 1.0],
            BodyPart::Glutes => [0.60, 0.25, 0.45, 1.0],
            BodyPart::Shoulders => [0.30, 0.50, 0.85, 1.0],
            BodyPart::Trapezius => [0.35, 0.65, 0.75, 1.0],
            BodyPart::UpperArm => [0.30, 0.70, 0.40, 1.0],
            BodyPart::Forearm => [0.55, 0.85, 0.30, 1.0],
            BodyPart::Thigh => [0.85, 0.60, 0.20, 1.0],
            BodyPart::Calf => [0.95, 0.85, 0.35, 1.0],
        }
    }
}

/// Per-region distances at one point, shared by the field and the classifier
#[derive(Debug, Clone, Copy)]
struct PartDistances {
    torso: f32,
    glutes: f32,
    shoulders: f32,
    traps: f32,
    /// (upper, lower) segment distance per side
    arms: [(f32, f32); 2],
    legs: [(f32, f32); 2],
    neck: f32,
    head: f32,
}

impl PartDistances {
    fn nearest(&self) -> BodyPart {
        let candidates = [
            (BodyPart::Torso, self.torso),
            (BodyPart::Glutes, self.glutes),
            (BodyPart::Shoulders, self.shoulders),
            (BodyPart::Trapezius, self.traps),
            (BodyPart::UpperArm, op_union(self.arms[0].0, self.arms[1].0)),
            (BodyPart::Forearm, op_union(self.arms[0].1, self.arms[1].1)),
            (BodyPart::Thigh, op_union(self.legs[0].0, self.legs[1].0)),
            (BodyPart::Calf, op_union(self.legs[0].1, self.legs[1].1)),
            (BodyPart::Neck, self.neck),
            (BodyPart::Head, self.head),
        ];
        // First minimum wins on ties so the result is stable
        candidates
            .into_iter()
            .fold((BodyPart::Torso, f32::INFINITY), |best, (part, d)| {
                if d < best.1 { (part, d) } else { best }
            })
            .0
    }
}

/// Signed distance field of a humanoid body
#[derive(Debug, Clone)]
pub struct HumanoidBody {
    params: ShapeParameters,
    skeleton: Skeleton,
    torso_blend: f32,
    glute_blend: f32,
    limb_blend: f32,
    head_blend: f32,
}

impl HumanoidBody {
    /// Validate the inputs and lay out the skeleton
    pub fn new(params: ShapeParameters, config: &BodyConfig) -> Result<Self> {
        params.validate()?;
        config.validate()?;

        Ok(Self {
            params,
            skeleton: Skeleton::new(&params, config),
            torso_blend: config.torso_blend,
            glute_blend: config.glute_blend,
            limb_blend: config.limb_blend,
            head_blend: config.head_blend,
        })
    }

    pub fn params(&self) -> &ShapeParameters {
        &self.params
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    fn part_distances(&self, p: Vec3) -> PartDistances {
        let s = &self.skeleton;

        let chest = sd_round_box(p - s.chest.center, s.chest.half_extents, s.chest.radius);
        let waist = sd_vertical_capsule(p - s.waist_base, s.waist_span, s.waist_radius);
        let hips = sd_round_box(p - s.hips.center, s.hips.half_extents, s.hips.radius);
        let torso = op_smooth_union(
            op_smooth_union(chest, waist, self.torso_blend),
            hips,
            self.torso_blend,
        );

        let glutes = op_union(
            sd_sphere(p - s.glutes[0], s.glute_radius),
            sd_sphere(p - s.glutes[1], s.glute_radius),
        );

        let shoulders = op_union(
            sd_sphere(p - s.shoulders[0], s.shoulder_radius),
            sd_sphere(p - s.shoulders[1], s.shoulder_radius),
        );
        let traps = op_union(
            sd_capsule(p, s.neck_base, s.shoulders[0], s.trap_radius),
            sd_capsule(p, s.neck_base, s.shoulders[1], s.trap_radius),
        );

        let arms = s.arms.map(|limb| limb_segments(p, &limb));
        let legs = s.legs.map(|limb| limb_segments(p, &limb));

        let neck = sd_vertical_capsule(p - s.neck_root, s.neck_span, s.neck_radius);
        let head = sd_sphere(p - s.head_center, s.head_radius);

        PartDistances {
            torso,
            glutes,
            shoulders,
            traps,
            arms,
            legs,
            neck,
            head,
        }
    }

    fn compose(&self, d: &PartDistances) -> f32 {
        let tone = self.params.muscle_tone;
        let joint = |(upper, lower): (f32, f32)| op_smooth_union(upper, lower, self.limb_blend);

        let torso = op_smooth_union(d.torso, d.glutes, self.glute_blend);

        // Elbows and knees are blended per side, sides joined hard
        let arms = op_union(joint(d.arms[0]), joint(d.arms[1]));
        let legs = op_union(joint(d.legs[0]), joint(d.legs[1]));

        let mut body = op_smooth_union(torso, d.shoulders, tone);
        body = op_smooth_union(body, d.traps, tone);
        body = op_smooth_union(body, arms, tone);
        body = op_smooth_union(body, legs, tone);

        body = op_smooth_union(body, d.neck, self.head_blend);
        op_smooth_union(body, d.head, self.head_blend)
    }

    /// Extent tree shaped like [`HumanoidBody::compose`]
    fn extent(&self) -> Extent {
        let s = &self.skeleton;
        let tone = self.params.muscle_tone;
        let block = |b: &Block| {
            let half = b.half_extents + Vec3::splat(b.radius);
            Extent::Leaf(Aabb::from_center(b.center, half))
        };
        let ball = |c: Vec3, r: f32| Extent::Leaf(Aabb::from_center(c, Vec3::splat(r)));
        let segment =
            |a: Vec3, b: Vec3, r: f32| Extent::Leaf(Aabb::new(a.min(b), a.max(b)).expand(r));
        let limb = |l: &Limb| {
            Extent::blend(
                segment(l.root, l.joint, l.upper_radius),
                segment(l.joint, l.end, l.lower_radius),
                self.limb_blend,
            )
        };
        let pair = |a: Extent, b: Extent| Extent::Union(Box::new(a), Box::new(b));

        let waist_top = s.waist_base + Vec3::Y * s.waist_span;
        let neck_top = s.neck_root + Vec3::Y * s.neck_span;

        let mut torso = Extent::blend(
            block(&s.chest),
            segment(s.waist_base, waist_top, s.waist_radius),
            self.torso_blend,
        );
        torso = Extent::blend(torso, block(&s.hips), self.torso_blend);
        let glutes = pair(ball(s.glutes[0], s.glute_radius), ball(s.glutes[1], s.glute_radius));
        let shoulders = pair(
            ball(s.shoulders[0], s.shoulder_radius),
            ball(s.shoulders[1], s.shoulder_radius),
        );
        let traps = pair(
            segment(s.neck_base, s.shoulders[0], s.trap_radius),
            segment(s.neck_base, s.shoulders[1], s.trap_radius),
        );

        let mut body = Extent::blend(torso, glutes, self.glute_blend);
        body = Extent::blend(body, shoulders, tone);
        body = Extent::blend(body, traps, tone);
        body = Extent::blend(body, pair(limb(&s.arms[0]), limb(&s.arms[1])), tone);
        body = Extent::blend(body, pair(limb(&s.legs[0]), limb(&s.legs[1])), tone);
        let neck = segment(s.neck_root, neck_top, s.neck_radius);
        body = Extent::blend(body, neck, self.head_blend);
        Extent::blend(body, ball(s.head_center, s.head_radius), self.head_blend)
    }

    fn in_eye_socket(&self, p: Vec3) -> bool {
        let s = &self.skeleton;
        s.eyes
            .iter()
            .any(|&eye| sd_box(p - eye, s.eye_half_extents) <= 0.0)
    }

    /// Nearest named region at `p`, eye sockets taking precedence
    pub fn classify(&self, p: Vec3) -> BodyPart {
        if self.in_eye_socket(p) {
            return BodyPart::Eye;
        }
        self.part_distances(p).nearest()
    }
}

impl Sdf for HumanoidBody {
    fn distance(&self, p: Vec3) -> f32 {
        self.compose(&self.part_distances(p))
    }

    fn bounds(&self) -> Aabb {
        self.extent().at(0.0)
    }
}

impl Classify for HumanoidBody {
    fn color(&self, p: Vec3) -> [f32; 4] {
        self.classify(p).color()
    }
}

/// Bounding boxes of a field's sub-level sets, composed the same way as the field
enum Extent {
    /// Box around the zero set of an exact distance function
    Leaf(Aabb),
    Union(Box<Extent>, Box<Extent>),
    Blend(Box<Extent>, Box<Extent>, f32),
}

impl Extent {
    fn blend(a: Extent, b: Extent, k: f32) -> Self {
        Self::Blend(Box::new(a), Box::new(b), k)
    }

    /// Box around every point where the field is at most `level`
    fn at(&self, level: f32) -> Aabb {
        match self {
            Self::Leaf(bounds) => bounds.expand(level),
            Self::Union(a, b) => a.at(level).union(&b.at(level)),
            Self::Blend(a, b, k) => {
                // smin(a, b) < min(a, b) only where |a - b| < k, and by at most k / 4
                let hull = a.at(level).union(&b.at(level));
                let reach = level + 1.25 * k;
                match a.at(reach).intersection(&b.at(reach)) {
                    Some(seam) => hull.union(&seam),
                    None => hull,
                }
            }
        }
    }
}

fn limb_segments(p: Vec3, limb: &Limb) -> (f32, f32) {
    (
        sd_capsule(p, limb.root, limb.joint, limb.upper_radius),
        sd_capsule(p, limb.joint, limb.end, limb.lower_radius),
    )
}
