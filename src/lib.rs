//! Vertex and texture coordinates for a three-panel panorama backdrop,
//! its sky dome and ground plane.
//!
//! [`Environment`] owns the three meshes and rebuilds only the buffers a
//! parameter change affects; the builders in [`panorama`], [`sky`] and
//! [`ground`] can also be used on their own.

pub mod bounds;
pub mod environment;
pub mod error;
pub mod ground;
pub mod mesh;
pub mod panorama;
pub mod params;
pub mod sky;
pub mod transform;

pub use bounds::{calculate_alpha, calculate_coordinate_bounds, BoundingGeometry};
pub use environment::{Environment, MeshSlot, Rebuild};
pub use error::{EnvironmentError, Result};
pub use mesh::{Mesh, Vertex};
pub use params::{EnvironmentParameters, PanoramaMode, Parameter, ParameterStore, TextureSlot};
pub use transform::EnvironmentTransform;
