//! Scene graph module.
//!
//! Manages the scene hierarchy and its components:
//! - [`Node`]: scene node (parent-child links, local transform, kind tag)
//! - [`Transform`]: local TRS component
//! - [`Scene`]: node arena and per-kind component pools
//! - [`Camera`] / [`Light`] / [`Mesh`]: components referenced by node kind
//! - [`Traversal`]: lazy pre-order walk yielding world transforms
//! - [`view`]: renderer-side viewpoint resolution

pub mod camera;
pub mod light;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod transform;
pub mod traverse;
pub mod view;
pub mod wrapper;

// Re-export the common types
pub use camera::{Camera, ProjectionType};
pub use light::{Light, LightKind};
pub use mesh::{BoundingBox, Mesh};
pub use node::{Node, NodeKind};
pub use scene::{NodeBuilder, Scene};
pub use transform::Transform;
pub use traverse::Traversal;
pub use wrapper::SceneNode;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
}
