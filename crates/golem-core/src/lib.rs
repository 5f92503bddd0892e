//! # Golem Core
//!
//! Procedural humanoid meshes from signed distance functions.
//!
//! Golem builds a body out of a handful of SDF primitives, blends them with
//! smooth-min operators and polygonizes the resulting field with marching
//! tetrahedra.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use golem_core::prelude::*;
//!
//! let body = HumanoidBody::new(ShapeParameters::default(), &BodyConfig::default())?;
//! let mesh = polygonize(&body, Some(&body), &MeshConfig::default(), None)?;
//! println!("{} triangles", mesh.triangle_count());
//! ```
//!
//! ## Units and Conventions
//!
//! - **Distances**: meters. A default body is 1.8 units tall.
//! - **Precision**: all fields are evaluated in `f32`
//! - **Coordinate system**: Right-handed, Y-up, the body faces +Z

pub mod body;
pub mod mesh;
pub mod sdf;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // SDF primitives and operators
    pub use crate::sdf::{Aabb, Classify, Sdf, SdfExt, SdfNode, primitives::*};

    // Body assembly
    pub use crate::body::{BodyConfig, BodyPart, HumanoidBody, ShapeParameters};

    // Mesh generation
    pub use crate::mesh::{CancelFlag, MeshConfig, MeshResult, SmoothingConfig, polygonize};

    // Math (re-export glam)
    pub use glam::{UVec3, Vec3};

    // Error handling
    pub use crate::{Error, Result};
}
