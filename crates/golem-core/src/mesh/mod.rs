//! Mesh generation from SDFs using marching tetrahedra
//!
//! Uses Rayon for parallel processing of voxel grids. Output order does not
//! depend on scheduling: cells are collected in lattice order.

mod smooth;
mod tetrahedra;

use crate::sdf::operations::{NORMAL_EPSILON, estimate_normal};
use crate::sdf::{Aabb, Classify, Sdf};
use crate::{Error, Result};
use glam::{UVec3, Vec3};
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

pub use smooth::{SmoothingConfig, smooth_soup};
pub use tetrahedra::{
    CELL_TETRAHEDRA, CUBE_CORNERS, DEGENERATE_EPSILON, Triangle, edge_crossing, inside_mask,
    polygonize_tetrahedron,
};

/// An unindexed triangle soup.
///
/// Every triangle owns three vertices, so `indices` is always `0..N`.
/// Attribute buffers are flat: 3 floats per position and normal, 4 per color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshResult {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub normals: Option<Vec<f32>>,
    pub colors: Option<Vec<f32>>,
}

impl MeshResult {
    /// Get number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Get number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex positions as vectors
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.chunks_exact(3).map(Vec3::from_slice)
    }

    /// Triangles as position triples
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.vertices
            .chunks_exact(9)
            .map(|t| {
                [
                    Vec3::from_slice(&t[0..3]),
                    Vec3::from_slice(&t[3..6]),
                    Vec3::from_slice(&t[6..9]),
                ]
            })
    }

    /// Tight bounds of the emitted vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        self.positions().fold(None, |acc, p| match acc {
            None => Some(Aabb::new(p, p)),
            Some(b) => Some(Aabb::new(b.min.min(p), b.max.max(p))),
        })
    }

    /// Raw position buffer, ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index buffer, ready for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Configuration for mesh generation
#[derive(Debug, Clone, PartialEq)]
pub struct MeshConfig {
    /// Grid resolution (number of cells along each axis)
    pub resolution: UVec3,
    /// Bounding box to sample within
    pub bounds: Aabb,
    /// Whether to compute normals from the SDF gradient
    pub compute_normals: bool,
    /// Finite-difference step for normals
    pub normal_epsilon: f32,
    /// Optional relaxation pass after extraction
    pub smoothing: SmoothingConfig,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            resolution: UVec3::splat(32),
            bounds: Aabb::cube(1.0),
            compute_normals: true,
            normal_epsilon: NORMAL_EPSILON,
            smoothing: SmoothingConfig::default(),
        }
    }
}

impl MeshConfig {
    pub fn with_resolution(mut self, resolution: UVec3) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_uniform_resolution(mut self, resolution: u32) -> Self {
        self.resolution = UVec3::splat(resolution);
        self
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_normals(mut self, compute_normals: bool) -> Self {
        self.compute_normals = compute_normals;
        self
    }

    pub fn with_smoothing(mut self, smoothing: SmoothingConfig) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Length of one cell's main diagonal
    pub fn cell_diagonal(&self) -> f32 {
        (self.bounds.size() / self.resolution.max(UVec3::ONE).as_vec3()).length()
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolution.min_element() == 0 {
            return Err(Error::invalid(format!(
                "resolution must be positive on every axis, got {}",
                self.resolution
            )));
        }
        if !self.bounds.is_valid() {
            return Err(Error::invalid(format!(
                "bounding box must be finite with positive volume, got {:?}",
                self.bounds
            )));
        }
        if !(self.normal_epsilon.is_finite() && self.normal_epsilon > 0.0) {
            return Err(Error::invalid(format!(
                "normal epsilon must be positive, got {}",
                self.normal_epsilon
            )));
        }
        let factor = self.smoothing.factor;
        if !(factor.is_finite() && (0.0..=1.0).contains(&factor)) {
            return Err(Error::invalid(format!(
                "smoothing factor must lie in [0, 1], got {factor}"
            )));
        }
        Ok(())
    }
}

/// Cooperative cancellation shared between a caller and a running generation
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Sample lattice spanning the bounding box
struct Lattice {
    bounds: Aabb,
    step: Vec3,
    resolution: UVec3,
    /// Points per axis (resolution + 1)
    dims: [usize; 3],
}

impl Lattice {
    fn new(config: &MeshConfig) -> Result<Self> {
        let resolution = config.resolution;
        let dims = resolution.to_array().map(|r| r as usize + 1);
        dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .ok_or_else(|| Error::MeshGeneration(format!("lattice {resolution} is too large")))?;

        Ok(Self {
            bounds: config.bounds,
            step: config.bounds.size() / resolution.as_vec3(),
            resolution,
            dims,
        })
    }

    fn point_count(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    fn cell_count(&self) -> usize {
        self.resolution.to_array().iter().map(|&r| r as usize).product()
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.dims[1] + y) * self.dims[0] + x
    }

    /// World position of a lattice point; the last point lands exactly on `max`
    #[inline]
    fn point(&self, x: usize, y: usize, z: usize) -> Vec3 {
        let axis = |i: usize, n: u32, min: f32, max: f32, step: f32| {
            if i as u32 == n { max } else { min + step * i as f32 }
        };
        let (lo, hi, r) = (self.bounds.min, self.bounds.max, self.resolution);
        Vec3::new(
            axis(x, r.x, lo.x, hi.x, self.step.x),
            axis(y, r.y, lo.y, hi.y, self.step.y),
            axis(z, r.z, lo.z, hi.z, self.step.z),
        )
    }

    #[inline]
    fn cell_origin(&self, cell: usize) -> [usize; 3] {
        let rx = self.resolution.x as usize;
        let ry = self.resolution.y as usize;
        [cell % rx, (cell / rx) % ry, cell / (rx * ry)]
    }
}

/// Triangles generated by a single cell
struct CellTriangles {
    triangles: Vec<Triangle>,
    colors: Vec<[f32; 4]>,
}

/// Polygonize `sdf` with marching tetrahedra.
///
/// - `colorizer` is called once per emitted vertex to fill `colors`
/// - `cancel` is checked between cells; a raised flag yields [`Error::Cancelled`]
///
/// Uses Rayon for parallel processing:
/// - Parallel SDF sampling to build the distance field
/// - Parallel cell processing for tetrahedral extraction
pub fn polygonize<S: Sdf + ?Sized>(
    sdf: &S,
    colorizer: Option<&dyn Classify>,
    config: &MeshConfig,
    cancel: Option<&CancelFlag>,
) -> Result<MeshResult> {
    config.validate()?;
    let lattice = Lattice::new(config)?;
    let started = Instant::now();
    let cancelled = || cancel.is_some_and(CancelFlag::is_cancelled);

    // === Phase 1: Parallel SDF sampling ===
    let total_points = lattice.point_count();
    let mut values: Vec<f32> = Vec::new();
    values.try_reserve_exact(total_points).map_err(|e| {
        Error::MeshGeneration(format!("cannot allocate {total_points} samples: {e}"))
    })?;
    values.par_extend((0..total_points).into_par_iter().map(|idx| {
        let x = idx % lattice.dims[0];
        let y = (idx / lattice.dims[0]) % lattice.dims[1];
        let z = idx / (lattice.dims[0] * lattice.dims[1]);
        sdf.distance(lattice.point(x, y, z))
    }));
    tracing::debug!(samples = total_points, "sampled distance field");

    if cancelled() {
        return Err(Error::Cancelled);
    }

    // === Phase 2: Parallel tetrahedral extraction ===
    let cells: Vec<CellTriangles> = (0..lattice.cell_count())
        .into_par_iter()
        .filter_map(|cell| {
            if cancelled() {
                return Some(Err(Error::Cancelled));
            }
            process_cell(&lattice, cell, &values, colorizer).map(Ok)
        })
        .collect::<Result<_>>()?;

    // === Phase 3: Merge results ===
    let triangle_total: usize = cells.iter().map(|c| c.triangles.len()).sum();
    let vertex_total = triangle_total * 3;
    let index_limit = u32::try_from(vertex_total).map_err(|_| {
        Error::MeshGeneration(format!(
            "{vertex_total} vertices exceed the 32-bit index range"
        ))
    })?;

    let mut positions: Vec<Vec3> = Vec::with_capacity(vertex_total);
    let mut colors: Option<Vec<f32>> = colorizer.map(|_| Vec::with_capacity(vertex_total * 4));
    for cell in cells {
        positions.extend(cell.triangles.into_iter().flatten());
        if let Some(colors) = colors.as_mut() {
            colors.extend(cell.colors.into_iter().flatten());
        }
    }

    smooth_soup(&mut positions, &config.smoothing);

    let normals = config.compute_normals.then(|| {
        positions
            .par_iter()
            .flat_map_iter(|&p| estimate_normal(sdf, p, config.normal_epsilon).to_array())
            .collect::<Vec<f32>>()
    });

    let mesh = MeshResult {
        vertices: positions.iter().flat_map(|p| p.to_array()).collect(),
        indices: (0..index_limit).collect(),
        normals,
        colors,
    };

    tracing::debug!(
        triangles = mesh.triangle_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "polygonized field"
    );
    Ok(mesh)
}

/// Process a single cell: six tetrahedra around the 0-6 diagonal
fn process_cell(
    lattice: &Lattice,
    cell: usize,
    values: &[f32],
    colorizer: Option<&dyn Classify>,
) -> Option<CellTriangles> {
    let [x, y, z] = lattice.cell_origin(cell);

    let corner_values: [f32; 8] = CUBE_CORNERS.map(|c| {
        values[lattice.index(x + c.x as usize, y + c.y as usize, z + c.z as usize)]
    });

    // Skip if entirely inside or outside
    let inside = corner_values.iter().filter(|&&v| v < 0.0).count();
    if inside == 0 || inside == 8 {
        return None;
    }

    let corner_positions: [Vec3; 8] = CUBE_CORNERS
        .map(|c| lattice.point(x + c.x as usize, y + c.y as usize, z + c.z as usize));

    let mut triangles = Vec::new();
    for tet in CELL_TETRAHEDRA {
        polygonize_tetrahedron(
            &tet.map(|i| corner_positions[i]),
            &tet.map(|i| corner_values[i]),
            &mut triangles,
        );
    }

    // Rounding in the interpolation must not step outside the sampled domain
    for v in triangles.iter_mut().flatten() {
        *v = v.clamp(lattice.bounds.min, lattice.bounds.max);
    }

    let colors = colorizer
        .map(|c| triangles.iter().flatten().map(|&v| c.color(v)).collect())
        .unwrap_or_default();

    Some(CellTriangles { triangles, colors })
}
