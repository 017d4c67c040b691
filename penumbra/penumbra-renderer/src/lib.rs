//! Penumbra renderer: soft-shadow fins for 2D lights.
//!
//! For every convex silhouette point of a hull the builder spans a triangle from the point
//! out along the light's two outer edges, optionally clips it against the hull, grades it
//! with texture coordinates and fan-triangulates it into one buffer per light.

pub mod barycentric;
pub mod builder;
pub mod clip;
pub mod config;
pub mod error;
pub mod fin;
pub mod math;
pub mod pool;
pub mod triangulate;
pub mod vao;

pub use builder::{PassState, PenumbraBuilder, PenumbraStats};
pub use config::PenumbraConfig;
pub use error::PenumbraError;
pub use fin::{build_fin, Fin, FinSide, SkipReason};
pub use triangulate::WindingOrder;
pub use vao::{penumbra_vertex_layout, LightVaos, PenumbraVao};
