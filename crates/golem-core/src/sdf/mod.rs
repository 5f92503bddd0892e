//! Signed Distance Functions (SDF) for 3D shape definition
//!
//! SDFs represent shapes as mathematical functions that return the distance
//! from any point in space to the nearest surface. Negative values are inside,
//! positive values are outside, and zero is exactly on the surface.
//!
//! ## Example
//!
//! ```rust,ignore
//! use golem_core::prelude::*;
//!
//! // A torso-like blob: a box with a sphere blended on top
//! let blob = rounded_box(Vec3::new(0.2, 0.3, 0.1), 0.05)
//!     .smooth_union(sphere(0.15).translate_y(0.45), 0.1);
//! ```

pub mod operations;
pub mod primitives;
pub mod transforms;

use glam::Vec3;

/// The core SDF trait - any type that can compute distance from a point
pub trait Sdf: Send + Sync {
    /// Calculate the signed distance from point `p` to the surface.
    ///
    /// - Returns negative values for points inside the shape
    /// - Returns positive values for points outside the shape
    /// - Returns zero for points exactly on the surface
    fn distance(&self, p: Vec3) -> f32;

    /// Get an approximate bounding box for this SDF.
    fn bounds(&self) -> Aabb {
        // Default: large bounding box, can be overridden for better performance
        Aabb::new(Vec3::splat(-10.0), Vec3::splat(10.0))
    }
}

/// Maps a point to an RGBA tag, used to color emitted vertices
pub trait Classify: Send + Sync {
    fn color(&self, p: Vec3) -> [f32; 4];
}

impl<T: Sdf + ?Sized> Sdf for &T {
    fn distance(&self, p: Vec3) -> f32 {
        (**self).distance(p)
    }

    fn bounds(&self) -> Aabb {
        (**self).bounds()
    }
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a cube centered at origin
    pub fn cube(half_size: f32) -> Self {
        Self::new(Vec3::splat(-half_size), Vec3::splat(half_size))
    }

    /// Create from center and half-extents
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Expand the bounding box by a margin
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.min - Vec3::splat(margin),
            self.max + Vec3::splat(margin),
        )
    }

    /// Merge two bounding boxes
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Enclosed volume; zero or negative for flat or inverted boxes
    pub fn volume(&self) -> f32 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Finite corners with strictly positive extent on every axis
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.size().cmpgt(Vec3::ZERO).all()
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Whether `other` lies entirely inside this box
    pub fn encloses(&self, other: &Aabb) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Overlap of two boxes, `None` when they are disjoint
    pub fn intersection(&self, other: &Aabb) -> Option<Self> {
        let overlap = Self::new(self.min.max(other.min), self.max.min(other.max));
        overlap.size().cmpge(Vec3::ZERO).all().then_some(overlap)
    }
}

/// An SDF node that can be composed and transformed
#[derive(Clone)]
pub struct SdfNode {
    inner: std::sync::Arc<dyn Sdf>,
}

impl SdfNode {
    /// Create a new SDF node from any type implementing Sdf
    pub fn new<S: Sdf + 'static>(sdf: S) -> Self {
        Self {
            inner: std::sync::Arc::new(sdf),
        }
    }
}

impl Sdf for SdfNode {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(p)
    }

    fn bounds(&self) -> Aabb {
        self.inner.bounds()
    }
}

/// Extension trait providing chainable operations on SDFs
pub trait SdfExt: Sdf + Sized + 'static {
    // === Boolean Operations ===

    /// Union: combine two shapes (OR)
    fn union<S: Sdf + 'static>(self, other: S) -> SdfNode {
        SdfNode::new(operations::Union::new(self, other))
    }

    /// Subtraction: cut shape `other` from `self`
    fn subtract<S: Sdf + 'static>(self, other: S) -> SdfNode {
        SdfNode::new(operations::Subtract::new(self, other))
    }

    /// Intersection: keep only where both shapes overlap (AND)
    fn intersect<S: Sdf + 'static>(self, other: S) -> SdfNode {
        SdfNode::new(operations::Intersect::new(self, other))
    }

    // === Smooth Boolean Operations ===

    /// Smooth union with blend radius `k`
    fn smooth_union<S: Sdf + 'static>(self, other: S, k: f32) -> SdfNode {
        SdfNode::new(operations::SmoothUnion::new(self, other, k))
    }

    /// Smooth subtraction with blend radius `k`
    fn smooth_subtract<S: Sdf + 'static>(self, other: S, k: f32) -> SdfNode {
        SdfNode::new(operations::SmoothSubtract::new(self, other, k))
    }

    /// Smooth intersection with blend radius `k`
    fn smooth_intersect<S: Sdf + 'static>(self, other: S, k: f32) -> SdfNode {
        SdfNode::new(operations::SmoothIntersect::new(self, other, k))
    }

    // === Transforms ===

    /// Translate (move) the shape
    fn translate(self, x: f32, y: f32, z: f32) -> SdfNode {
        SdfNode::new(transforms::Translate::new(self, Vec3::new(x, y, z)))
    }

    /// Translate along X axis
    fn translate_x(self, x: f32) -> SdfNode {
        self.translate(x, 0.0, 0.0)
    }

    /// Translate along Y axis
    fn translate_y(self, y: f32) -> SdfNode {
        self.translate(0.0, y, 0.0)
    }

    /// Translate along Z axis
    fn translate_z(self, z: f32) -> SdfNode {
        self.translate(0.0, 0.0, z)
    }
}

// Implement SdfExt for all types that implement Sdf
impl<T: Sdf + 'static> SdfExt for T {}

// Re-exports
pub use operations::*;
pub use primitives::*;
pub use transforms::*;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aabb_validity() {
        assert!(Aabb::cube(1.0).is_valid());
        assert!(!Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)).is_valid());
        assert!(!Aabb::new(Vec3::ONE, Vec3::ZERO).is_valid());
        assert!(!Aabb::new(Vec3::ZERO, Vec3::new(f32::NAN, 1.0, 1.0)).is_valid());
    }

    #[test]
    fn aabb_volume_and_contains() {
        let b = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.5, 1.0));
        assert_relative_eq!(b.volume(), 10.0, epsilon = 1e-5);
        assert!(b.contains(Vec3::new(1.0, 2.5, -1.0)));
        assert!(!b.contains(Vec3::new(0.0, -0.01, 0.0)));
    }

    #[test]
    fn aabb_overlap_and_enclosure() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        let b = Aabb::new(Vec3::ONE, Vec3::splat(3.0));
        assert_eq!(a.intersection(&b), Some(Aabb::new(Vec3::ONE, Vec3::splat(2.0))));
        assert!(a.intersection(&Aabb::new(Vec3::splat(2.5), Vec3::splat(4.0))).is_none());

        assert!(a.encloses(&Aabb::new(Vec3::splat(0.5), Vec3::splat(2.0))));
        assert!(!a.encloses(&b));
    }

    #[test]
    fn chained_operations_compose() {
        let shape = sphere(0.5)
            .smooth_union(sphere(0.3).translate_y(0.6), 0.1)
            .subtract(sphere(0.2).translate_z(0.5));

        assert!(shape.distance(Vec3::ZERO) < 0.0);
        assert!(shape.distance(Vec3::new(0.0, 0.6, 0.0)) < 0.0);
        // Carved by the third sphere
        assert!(shape.distance(Vec3::new(0.0, 0.0, 0.45)) > 0.0);
    }

    #[test]
    fn references_are_fields() {
        let s = sphere(1.0);
        let r = &s;
        assert_relative_eq!(r.distance(Vec3::X * 2.0), 1.0);
    }
}
