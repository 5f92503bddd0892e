//! SDF Transforms

use super::{Aabb, Sdf};
use glam::Vec3;

/// Translation transform
pub struct Translate<S: Sdf> {
    pub inner: S,
    pub offset: Vec3,
}

impl<S: Sdf> Translate<S> {
    pub fn new(inner: S, offset: Vec3) -> Self {
        Self { inner, offset }
    }
}

impl<S: Sdf> Sdf for Translate<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(p - self.offset)
    }

    fn bounds(&self) -> Aabb {
        let b = self.inner.bounds();
        Aabb::new(b.min + self.offset, b.max + self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::primitives::sphere;
    use approx::assert_relative_eq;

    #[test]
    fn translate_moves_surface() {
        let t = Translate::new(sphere(0.5), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(t.distance(Vec3::new(0.0, 1.5, 0.0)), 0.0, epsilon = 1e-6);
        assert_relative_eq!(t.distance(Vec3::ZERO), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn translate_moves_bounds() {
        let t = Translate::new(sphere(0.5), Vec3::new(2.0, 0.0, 0.0));
        let b = t.bounds();
        assert_relative_eq!(b.min.x, 1.5);
        assert_relative_eq!(b.max.x, 2.5);
    }
}
