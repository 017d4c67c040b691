//! Shared 2D lighting API.
//! Defines the per-frame light/hull shapes the host extracts, the silhouette contexts the
//! classifier produces, and the output target the penumbra builder writes into.

mod backend;
mod extract;
mod vertex;

pub use backend::{MeshBuffers, PenumbraTarget, TargetError};
pub use extract::{ExtractedHull, ExtractedLight, HullContext, ShadowType, Side, SilhouettePointContext};
pub use vertex::PenumbraVertex;
