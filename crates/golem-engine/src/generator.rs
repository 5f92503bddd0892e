//! Blocking and offloaded mesh generation
//!
//! A [`Generator`] owns a [`GenerationConfig`] and turns [`ShapeParameters`]
//! into a [`MeshResult`]. Every call is independent: nothing is cached
//! between requests, and concurrent calls simply run side by side.

use crate::error::{GenerationError, Result};
use golem_core::body::{BodyConfig, HumanoidBody, ShapeParameters};
use golem_core::mesh::{CancelFlag, MeshConfig, MeshResult, polygonize};
use golem_core::prelude::{UVec3, Vec3};
use golem_core::sdf::{Aabb, Classify, Sdf};
use std::time::Instant;

/// Settings shared by every request a [`Generator`] serves
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Sampling lattice, bounds, normals and smoothing
    pub mesh: MeshConfig,
    /// Body proportions and blend radii
    pub body: BodyConfig,
    /// Tag every vertex with the color of its nearest body region
    pub colorize: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mesh: MeshConfig::default()
                .with_uniform_resolution(32)
                .with_bounds(Self::body_bounds()),
            body: BodyConfig::default(),
            colorize: true,
        }
    }
}

impl GenerationConfig {
    /// Domain that encloses a default-sized standing body
    pub fn body_bounds() -> Aabb {
        Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.5, 1.0))
    }

    pub fn with_mesh(mut self, mesh: MeshConfig) -> Self {
        self.mesh = mesh;
        self
    }

    pub fn with_body(mut self, body: BodyConfig) -> Self {
        self.body = body;
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.mesh.resolution = UVec3::splat(resolution);
        self
    }

    pub fn with_colors(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }
}

/// Generates humanoid meshes from shape parameters
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GenerationConfig,
}

impl Generator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Validate, assemble and polygonize in one synchronous pass
    pub fn generate(&self, params: ShapeParameters) -> Result<MeshResult> {
        self.run(params, None)
    }

    /// Like [`Generator::generate`], returning `Cancelled` once `cancel` is raised
    pub fn generate_cancellable(
        &self,
        params: ShapeParameters,
        cancel: &CancelFlag,
    ) -> Result<MeshResult> {
        self.run(params, Some(cancel))
    }

    /// Run [`Generator::generate`] on tokio's blocking pool so the calling
    /// task stays responsive
    pub async fn generate_async(&self, params: ShapeParameters) -> Result<MeshResult> {
        let generator = self.clone();
        tokio::task::spawn_blocking(move || generator.generate(params)).await?
    }

    fn run(&self, params: ShapeParameters, cancel: Option<&CancelFlag>) -> Result<MeshResult> {
        // Mesh settings are checked before the body is even assembled
        self.config.mesh.validate()?;
        let body = HumanoidBody::new(params, &self.config.body)?;
        check_fit(&body.bounds(), &self.config.mesh.bounds)?;

        let started = Instant::now();
        let colorizer = self.config.colorize.then_some(&body as &dyn Classify);
        let mesh = polygonize(&body, colorizer, &self.config.mesh, cancel)?;

        tracing::info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            resolution = %self.config.mesh.resolution,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated humanoid mesh"
        );
        if mesh.is_empty() {
            return Err(GenerationError::InvalidParameter(format!(
                "resolution {} is too coarse to resolve the body",
                self.config.mesh.resolution
            )));
        }
        Ok(mesh)
    }
}

/// Reject bodies that would be clipped by (or lie outside) the sampling domain
fn check_fit(extent: &Aabb, domain: &Aabb) -> Result<()> {
    if domain.encloses(extent) {
        return Ok(());
    }
    let axes = ["x", "y", "z"]
        .into_iter()
        .enumerate()
        .filter(|&(i, _)| extent.min[i] < domain.min[i] || extent.max[i] > domain.max[i])
        .map(|(i, axis)| {
            format!(
                "{axis} spans {:.3}..{:.3} outside {:.3}..{:.3}",
                extent.min[i], extent.max[i], domain.min[i], domain.max[i]
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    tracing::debug!(?extent, ?domain, "body does not fit the sampling domain");
    Err(GenerationError::InvalidParameter(format!(
        "body does not fit the sampling domain: {axes}"
    )))
}

/// Generate a mesh with the default configuration
pub fn generate(params: ShapeParameters) -> Result<MeshResult> {
    Generator::default().generate(params)
}

/// Generate a mesh with the default configuration off the calling task
pub async fn generate_async(params: ShapeParameters) -> Result<MeshResult> {
    Generator::default().generate_async(params).await
}

/// Polygonize an arbitrary field through the same validation path
pub fn generate_field<S: Sdf + ?Sized>(sdf: &S, config: &MeshConfig) -> Result<MeshResult> {
    Ok(polygonize(sdf, None, config, None)?)
}
