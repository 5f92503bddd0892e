//! SDF Primitive shapes
//!
//! The `sd_*` functions take a point already expressed in the primitive's
//! local frame. The structs wrap them so they can be composed through
//! [`SdfExt`](super::SdfExt).

use super::{Aabb, Sdf};
use glam::Vec3;

// ============================================================================
// Distance functions
// ============================================================================

/// Sphere of radius `r` centered at the origin (exact)
#[inline]
pub fn sd_sphere(p: Vec3, r: f32) -> f32 {
    p.length() - r
}

/// Axis-aligned box centered at the origin (exact)
#[inline]
pub fn sd_box(p: Vec3, half_extents: Vec3) -> f32 {
    let q = p.abs() - half_extents;
    q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
}

/// Box inflated by `radius`, giving rounded edges and corners
#[inline]
pub fn sd_round_box(p: Vec3, half_extents: Vec3, radius: f32) -> f32 {
    sd_box(p, half_extents) - radius
}

/// Capsule around the segment from the origin to `(0, height, 0)`
#[inline]
pub fn sd_vertical_capsule(p: Vec3, height: f32, radius: f32) -> f32 {
    let q = Vec3::new(p.x, p.y - p.y.clamp(0.0, height), p.z);
    q.length() - radius
}

/// Capsule around the segment `a -> b`
#[inline]
pub fn sd_capsule(p: Vec3, a: Vec3, b: Vec3, radius: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let len_sq = ba.length_squared();
    if len_sq <= f32::EPSILON {
        return pa.length() - radius;
    }
    let h = (pa.dot(ba) / len_sq).clamp(0.0, 1.0);
    (pa - ba * h).length() - radius
}

// ============================================================================
// Constructor functions (ergonomic API)
// ============================================================================

/// Create a sphere with given radius
pub fn sphere(radius: f32) -> Sphere {
    Sphere::new(radius)
}

/// Create a box with given half-extents (size/2 in each direction)
pub fn box3(half_extents: Vec3) -> Box3 {
    Box3::new(half_extents)
}

/// Create a box inflated by `radius`
pub fn rounded_box(half_extents: Vec3, radius: f32) -> RoundedBox {
    RoundedBox::new(half_extents, radius)
}

/// Create a capsule rising from the origin along +Y
pub fn vertical_capsule(height: f32, radius: f32) -> VerticalCapsule {
    VerticalCapsule::new(height, radius)
}

/// Create a capsule between two points
pub fn capsule(a: Vec3, b: Vec3, radius: f32) -> Capsule {
    Capsule::new(a, b, radius)
}

// ============================================================================
// Primitive Structs
// ============================================================================

/// Sphere centered at origin
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Sdf for Sphere {
    fn distance(&self, p: Vec3) -> f32 {
        sd_sphere(p, self.radius)
    }

    fn bounds(&self) -> Aabb {
        Aabb::cube(self.radius)
    }
}

/// Axis-aligned box (rectangular prism)
#[derive(Debug, Clone, Copy)]
pub struct Box3 {
    pub half_extents: Vec3,
}

impl Box3 {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }
}

impl Sdf for Box3 {
    fn distance(&self, p: Vec3) -> f32 {
        sd_box(p, self.half_extents)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(-self.half_extents, self.half_extents)
    }
}

/// Box with rounded edges, `radius` added outside the half-extents
#[derive(Debug, Clone, Copy)]
pub struct RoundedBox {
    pub half_extents: Vec3,
    pub radius: f32,
}

impl RoundedBox {
    pub fn new(half_extents: Vec3, radius: f32) -> Self {
        Self {
            half_extents,
            radius,
        }
    }
}

impl Sdf for RoundedBox {
    fn distance(&self, p: Vec3) -> f32 {
        sd_round_box(p, self.half_extents, self.radius)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(-self.half_extents, self.half_extents).expand(self.radius)
    }
}

/// Capsule from the origin up to `(0, height, 0)`
#[derive(Debug, Clone, Copy)]
pub struct VerticalCapsule {
    pub height: f32,
    pub radius: f32,
}

impl VerticalCapsule {
    pub fn new(height: f32, radius: f32) -> Self {
        Self { height, radius }
    }
}

impl Sdf for VerticalCapsule {
    fn distance(&self, p: Vec3) -> f32 {
        sd_vertical_capsule(p, self.height, self.radius)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::new(0.0, self.height, 0.0)).expand(self.radius)
    }
}

/// Capsule (swept sphere) between two arbitrary points
#[derive(Debug, Clone, Copy)]
pub struct Capsule {
    pub a: Vec3,
    pub b: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(a: Vec3, b: Vec3, radius: f32) -> Self {
        Self { a, b, radius }
    }
}

impl Sdf for Capsule {
    fn distance(&self, p: Vec3) -> f32 {
        sd_capsule(p, self.a, self.b, self.radius)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(self.a.min(self.b), self.a.max(self.b)).expand(self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Deterministic point cloud in [-2, 2]^3 (64-bit LCG)
    fn sample_points(count: usize) -> Vec<Vec3> {
        let mut state = 0x2545_f491_4f6c_dd1d_u64;
        let mut next = move || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 40) as f32 / (1u64 << 24) as f32) * 4.0 - 2.0
        };
        (0..count).map(|_| Vec3::new(next(), next(), next())).collect()
    }

    #[test]
    fn sphere_matches_length_minus_radius() {
        for (i, p) in sample_points(128).into_iter().enumerate() {
            let r = 0.1 + i as f32 * 0.01;
            assert_relative_eq!(sd_sphere(p, r), p.length() - r, epsilon = 1e-6);
            assert_relative_eq!(sphere(r).distance(p), p.length() - r, epsilon = 1e-6);
        }
    }

    #[test]
    fn sphere_surface_is_zero() {
        let s = sphere(0.7);
        for dir in [Vec3::X, Vec3::NEG_Y, Vec3::new(1.0, 1.0, 1.0).normalize()] {
            assert_relative_eq!(s.distance(dir * 0.7), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn box_exact_on_faces_edges_and_corners() {
        let h = Vec3::new(1.0, 0.5, 0.25);
        assert_relative_eq!(sd_box(Vec3::new(1.0, 0.0, 0.0), h), 0.0, epsilon = 1e-6);
        assert_relative_eq!(sd_box(Vec3::new(2.0, 0.0, 0.0), h), 1.0, epsilon = 1e-6);
        assert_relative_eq!(sd_box(Vec3::ZERO, h), -0.25, epsilon = 1e-6);
        // Outside a corner the distance is euclidean
        let corner = Vec3::new(2.0, 1.5, 1.25);
        assert_relative_eq!(sd_box(corner, h), 3.0f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn round_box_inflates_box() {
        let h = Vec3::splat(0.5);
        for p in sample_points(32) {
            assert_relative_eq!(
                sd_round_box(p, h, 0.1),
                sd_box(p, h) - 0.1,
                epsilon = 1e-6
            );
        }
        assert_relative_eq!(
            rounded_box(h, 0.1).distance(Vec3::new(0.6, 0.0, 0.0)),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn vertical_capsule_clamps_to_segment() {
        let c = vertical_capsule(1.0, 0.2);
        assert_relative_eq!(c.distance(Vec3::new(0.2, 0.5, 0.0)), 0.0, epsilon = 1e-6);
        // Beyond the top cap
        assert_relative_eq!(c.distance(Vec3::new(0.0, 1.5, 0.0)), 0.3, epsilon = 1e-6);
        // Below the bottom cap
        assert_relative_eq!(c.distance(Vec3::new(0.0, -0.2, 0.0)), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn capsule_matches_vertical_capsule() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.0, 1.3, 0.0);
        for p in sample_points(64) {
            assert_relative_eq!(
                sd_capsule(p, a, b, 0.15),
                sd_vertical_capsule(p, 1.3, 0.15),
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn capsule_surface_along_diagonal_segment() {
        let a = Vec3::new(-1.0, -1.0, 0.0);
        let b = Vec3::new(1.0, 1.0, 0.0);
        let c = capsule(a, b, 0.25);
        let side = Vec3::new(-1.0, 1.0, 0.0).normalize() * 0.25;
        assert_relative_eq!(c.distance(side), 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.distance(b + Vec3::new(0.0, 0.0, 0.25)), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_capsule_is_a_sphere() {
        let center = Vec3::new(0.3, 0.2, 0.1);
        let p = Vec3::new(1.0, -0.5, 0.4);
        assert_relative_eq!(
            sd_capsule(p, center, center, 0.2),
            sd_sphere(p - center, 0.2),
            epsilon = 1e-6
        );
    }

    #[test]
    fn bounds_enclose_surface() {
        let c = capsule(Vec3::new(0.1, 0.2, 0.3), Vec3::new(-0.4, 1.0, 0.0), 0.1);
        let b = c.bounds();
        assert!(b.contains(Vec3::new(-0.5, 1.0, 0.0)));
        assert!(b.contains(Vec3::new(0.2, 0.2, 0.3)));
        assert!(rounded_box(Vec3::splat(0.5), 0.1).bounds().contains(Vec3::X * 0.6));
    }
}
