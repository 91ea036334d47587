//! Renderer-side viewpoint resolution.
//!
//! [`Camera`] deliberately does not enforce "at most one active camera";
//! that is a frame-level policy, and it lives here next to the renderer
//! that needs it. The scene data stays valid with zero or many active
//! cameras.
//!
//! [`Camera`]: crate::scene::Camera

use glam::{Mat4, Vec3};

use crate::scene::scene::Scene;
use crate::scene::NodeHandle;

/// Resolved view state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Viewpoint {
    /// Node the winning camera is attached to.
    pub node: NodeHandle,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Viewpoint {
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Picks the camera that drives the frame and computes its matrices.
///
/// Scans cameras in arena order and takes the first with `active` set.
/// `up` is the world up convention of the caller; it feeds the look-at
/// basis of targeted cameras. Returns `None` when no camera is active.
///
/// More than one active camera is a caller mistake the data model
/// permits; the extras are ignored with a warning.
#[must_use]
pub fn resolve_viewpoint(scene: &Scene, up: Vec3) -> Option<Viewpoint> {
    let mut winner: Option<NodeHandle> = None;
    let mut ignored = 0usize;

    for (handle, camera) in scene.iter_cameras() {
        if !camera.active {
            continue;
        }
        if winner.is_none() {
            winner = Some(handle);
        } else {
            ignored += 1;
        }
    }

    if ignored > 0 {
        log::warn!("{ignored} extra active camera(s) ignored; the first in arena order drives the frame");
    }

    let node = winner?;
    let camera = scene.camera(node)?;
    let world = scene.world_transform(node)?;

    Some(Viewpoint {
        node,
        view: camera.view_matrix(&world, up),
        projection: camera.projection_matrix(),
    })
}
