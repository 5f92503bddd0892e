//! Laplacian smoothing over an unwelded triangle soup
//!
//! Coincident copies of a vertex are grouped by their exact bit pattern (the
//! polygonizer emits bit-identical positions for shared edges), smoothed as
//! one point, then written back to every copy. The soup itself stays
//! unwelded.

use glam::Vec3;
use std::collections::HashMap;

/// Post-polygonization smoothing settings. Zero iterations disables it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SmoothingConfig {
    /// Number of relaxation passes
    pub iterations: u32,
    /// Fraction of the way each point moves toward its neighbour average, in [0, 1]
    pub factor: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            iterations: 0,
            factor: 0.5,
        }
    }
}

impl SmoothingConfig {
    pub fn new(iterations: u32, factor: f32) -> Self {
        Self { iterations, factor }
    }

    pub fn is_enabled(&self) -> bool {
        self.iterations > 0 && self.factor > 0.0
    }
}

type PositionKey = [u32; 3];

#[inline]
fn key(p: Vec3) -> PositionKey {
    // -0.0 and 0.0 are the same point
    [p.x + 0.0, p.y + 0.0, p.z + 0.0].map(f32::to_bits)
}

/// Smooth `positions` in place. `positions.len()` must be a multiple of 3,
/// each consecutive triple being one triangle.
pub fn smooth_soup(positions: &mut [Vec3], config: &SmoothingConfig) {
    if !config.is_enabled() || positions.is_empty() {
        return;
    }

    // Group coincident copies
    let mut groups: HashMap<PositionKey, usize> = HashMap::new();
    let mut group_of = Vec::with_capacity(positions.len());
    let mut points: Vec<Vec3> = Vec::new();
    for &p in positions.iter() {
        let next = points.len();
        let id = *groups.entry(key(p)).or_insert(next);
        if id == next {
            points.push(p);
        }
        group_of.push(id);
    }

    // Edge adjacency between groups
    let mut neighbours: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
    for tri in group_of.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if a != b {
                neighbours[a].push(b);
                neighbours[b].push(a);
            }
        }
    }
    for list in &mut neighbours {
        list.sort_unstable();
        list.dedup();
    }

    let factor = config.factor.clamp(0.0, 1.0);
    let mut next = points.clone();
    for _ in 0..config.iterations {
        for (i, list) in neighbours.iter().enumerate() {
            if list.is_empty() {
                continue;
            }
            let average = list.iter().map(|&j| points[j]).sum::<Vec3>() / list.len() as f32;
            next[i] = points[i].lerp(average, factor);
        }
        std::mem::swap(&mut points, &mut next);
    }

    for (p, &id) in positions.iter_mut().zip(&group_of) {
        *p = points[id];
    }
}
