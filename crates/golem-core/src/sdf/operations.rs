//! SDF Operations - hard and smooth booleans, gradient estimation

use super::{Aabb, Sdf};
use glam::Vec3;

/// Smallest blend radius accepted by the smooth operators.
///
/// `k <= 0` would divide by zero in the blend factor, so it is clamped here.
pub const MIN_BLEND_RADIUS: f32 = 1e-6;

/// Finite-difference step used by [`estimate_normal`]
pub const NORMAL_EPSILON: f32 = 1e-3;

// ============================================================================
// Scalar operators
// ============================================================================

/// Hard union: `min(d1, d2)`
#[inline]
pub fn op_union(d1: f32, d2: f32) -> f32 {
    d1.min(d2)
}

/// Hard subtraction: removes the shape of `d1` from `d2`
#[inline]
pub fn op_subtract(d1: f32, d2: f32) -> f32 {
    (-d1).max(d2)
}

/// Hard intersection: `max(d1, d2)`
#[inline]
pub fn op_intersect(d1: f32, d2: f32) -> f32 {
    d1.max(d2)
}

#[inline]
fn blend_radius(k: f32) -> f32 {
    if k.is_finite() { k.max(MIN_BLEND_RADIUS) } else { MIN_BLEND_RADIUS }
}

/// Polynomial smooth-min. Never above `min(d1, d2)`.
#[inline]
pub fn op_smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    let k = blend_radius(k);
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    lerp(d2, d1, h) - k * h * (1.0 - h)
}

/// Smooth version of [`op_subtract`]: carves `d1` out of `d2`
#[inline]
pub fn op_smooth_subtract(d1: f32, d2: f32, k: f32) -> f32 {
    let k = blend_radius(k);
    let h = (0.5 - 0.5 * (d2 + d1) / k).clamp(0.0, 1.0);
    lerp(d2, -d1, h) + k * h * (1.0 - h)
}

/// Smooth-max. Never below `max(d1, d2)`.
#[inline]
pub fn op_smooth_intersect(d1: f32, d2: f32, k: f32) -> f32 {
    let k = blend_radius(k);
    let h = (0.5 - 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    lerp(d2, d1, h) + k * h * (1.0 - h)
}

/// Surface normal from central differences of the field, normalized.
///
/// Returns `Vec3::ZERO` where the gradient vanishes.
pub fn estimate_normal<S: Sdf + ?Sized>(sdf: &S, p: Vec3, eps: f32) -> Vec3 {
    let dx = sdf.distance(p + Vec3::X * eps) - sdf.distance(p - Vec3::X * eps);
    let dy = sdf.distance(p + Vec3::Y * eps) - sdf.distance(p - Vec3::Y * eps);
    let dz = sdf.distance(p + Vec3::Z * eps) - sdf.distance(p - Vec3::Z * eps);
    Vec3::new(dx, dy, dz).normalize_or_zero()
}

// ============================================================================
// Boolean Operations
// ============================================================================

/// Union of two SDFs (combine shapes)
pub struct Union<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
}

impl<A: Sdf, B: Sdf> Union<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Sdf, B: Sdf> Sdf for Union<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        op_union(self.a.distance(p), self.b.distance(p))
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds().union(&self.b.bounds())
    }
}

/// Subtraction of two SDFs (cut B from A)
pub struct Subtract<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
}

impl<A: Sdf, B: Sdf> Subtract<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Sdf, B: Sdf> Sdf for Subtract<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        op_subtract(self.b.distance(p), self.a.distance(p))
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds() // Subtraction can only reduce, not expand
    }
}

/// Intersection of two SDFs (keep only overlap)
pub struct Intersect<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
}

impl<A: Sdf, B: Sdf> Intersect<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Sdf, B: Sdf> Sdf for Intersect<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        op_intersect(self.a.distance(p), self.b.distance(p))
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds()
    }
}

// ============================================================================
// Smooth Boolean Operations
// ============================================================================

/// Smooth union with polynomial blending
pub struct SmoothUnion<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
    pub k: f32,
}

impl<A: Sdf, B: Sdf> SmoothUnion<A, B> {
    pub fn new(a: A, b: B, k: f32) -> Self {
        Self {
            a,
            b,
            k: blend_radius(k),
        }
    }
}

impl<A: Sdf, B: Sdf> Sdf for SmoothUnion<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        op_smooth_union(self.a.distance(p), self.b.distance(p), self.k)
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds().union(&self.b.bounds()).expand(self.k)
    }
}

/// Smooth subtraction
pub struct SmoothSubtract<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
    pub k: f32,
}

impl<A: Sdf, B: Sdf> SmoothSubtract<A, B> {
    pub fn new(a: A, b: B, k: f32) -> Self {
        Self {
            a,
            b,
            k: blend_radius(k),
        }
    }
}

impl<A: Sdf, B: Sdf> Sdf for SmoothSubtract<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        op_smooth_subtract(self.b.distance(p), self.a.distance(p), self.k)
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds()
    }
}

/// Smooth intersection
pub struct SmoothIntersect<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
    pub k: f32,
}

impl<A: Sdf, B: Sdf> SmoothIntersect<A, B> {
    pub fn new(a: A, b: B, k: f32) -> Self {
        Self {
            a,
            b,
            k: blend_radius(k),
        }
    }
}

impl<A: Sdf, B: Sdf> Sdf for SmoothIntersect<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        op_smooth_intersect(self.a.distance(p), self.b.distance(p), self.k)
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds()
    }
}

// ============================================================================
// Helpers
// ============================================================================

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ============================================================================
// Tests
// ============================================================================
