#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod errors;
pub mod scene;

pub use errors::{Result, SceneError};
pub use scene::view::{Viewpoint, resolve_viewpoint};
pub use scene::{
    BoundingBox, Camera, Light, LightKind, Mesh, Node, NodeKind, ProjectionType, Scene, Transform,
};
pub use scene::{CameraKey, LightKey, MeshKey, NodeHandle};
