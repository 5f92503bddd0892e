//! Golem Engine - generation service for humanoid meshes
//!
//! The engine is a thin orchestration layer over golem-core: it validates the
//! request, assembles a [`HumanoidBody`] and polygonizes it, either on the
//! calling thread or on tokio's blocking pool.
//!
//! ## Example
//!
//! ```ignore
//! use golem_engine::{GenerationConfig, Generator, ShapeParameters};
//!
//! let generator = Generator::new(GenerationConfig::default().with_resolution(48));
//! let mesh = generator.generate(ShapeParameters::default().with_muscle_tone(0.1))?;
//! println!("{} triangles", mesh.triangle_count());
//!
//! // From async code
//! let mesh = generator.generate_async(ShapeParameters::default()).await?;
//! ```

mod error;
pub mod generator;

// Re-export commonly used types from golem-core
pub use golem_core::body::{BodyConfig, BodyPart, HumanoidBody, ShapeParameters};
pub use golem_core::mesh::{CancelFlag, MeshConfig, MeshResult, SmoothingConfig};
pub use golem_core::sdf::{Aabb, Sdf};

// Re-export our own types
pub use error::{GenerationError, Result};
pub use generator::{GenerationConfig, Generator, generate, generate_async, generate_field};
