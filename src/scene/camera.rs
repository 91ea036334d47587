use std::borrow::Cow;

use glam::{Affine3A, Mat4, Vec3};
use uuid::Uuid;

/// Viewpoint component of a node with [`NodeKind::Camera`].
///
/// Carries the view-selection flags the renderer reads each frame plus
/// the projection parameters. A fresh camera is inactive and untargeted,
/// with its target at the origin.
///
/// The data model allows any number of active cameras at once; picking a
/// single one to drive the frame is the job of
/// [`view::resolve_viewpoint`], not of this type.
///
/// [`NodeKind::Camera`]: crate::scene::NodeKind::Camera
/// [`view::resolve_viewpoint`]: crate::scene::view::resolve_viewpoint
#[derive(Debug, Clone)]
pub struct Camera {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,

    // === View selection state ===
    /// Selected to supply the renderer's viewpoint for the frame.
    pub active: bool,
    /// Orientation comes from looking toward [`target`](Self::target)
    /// instead of the owning node's rotation.
    pub targeted: bool,
    /// Look-at point in the node's coordinate space. Read only while
    /// `targeted` is set, and kept across toggles so flipping the flag
    /// loses nothing. Non-finite components are not validated here and
    /// propagate into the view matrix.
    pub target: Vec3,

    // === Projection ===
    pub projection_type: ProjectionType,
    /// Vertical field of view in radians (perspective only).
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Half-height of the view volume (orthographic only).
    pub ortho_size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

impl Camera {
    /// A default perspective camera: 60 degree fov, 16:9, inactive.
    #[must_use]
    pub fn new() -> Self {
        Self::new_perspective(60.0, 16.0 / 9.0, 0.1, 1000.0)
    }

    /// Perspective camera. `fov` is the vertical field of view in
    /// degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: Cow::Borrowed("Camera"),
            active: false,
            targeted: false,
            target: Vec3::ZERO,
            projection_type: ProjectionType::Perspective,
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            ortho_size: 10.0,
        }
    }

    /// Orthographic camera. `size` is the half-height of the view
    /// volume.
    #[must_use]
    pub fn new_orthographic(size: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            projection_type: ProjectionType::Orthographic,
            ortho_size: size,
            ..Self::new_perspective(60.0, aspect, near, far)
        }
    }

    // === View selection setters ===
    // Plain mutators, no side effects on other fields.

    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[inline]
    pub fn set_targeted(&mut self, targeted: bool) {
        self.targeted = targeted;
    }

    #[inline]
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    // === Matrices ===

    /// Projection matrix for the current parameters. glam's `_rh`
    /// constructors produce the 0..1 depth range wgpu expects.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection_type {
            ProjectionType::Perspective => {
                Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
            }
            ProjectionType::Orthographic => {
                let w = self.ortho_size * self.aspect;
                let h = self.ortho_size;
                Mat4::orthographic_rh(-w, w, -h, h, self.near, self.far)
            }
        }
    }

    /// View matrix for a camera whose node has the given world transform.
    ///
    /// Targeted: look from the node's world position toward
    /// [`target`](Self::target), with the caller-supplied up vector.
    /// Untargeted: the inverse of the node's world matrix, ignoring
    /// `target` entirely.
    #[must_use]
    pub fn view_matrix(&self, world: &Affine3A, up: Vec3) -> Mat4 {
        if self.targeted {
            let eye: Vec3 = world.translation.into();
            Mat4::look_at_rh(eye, self.target, up)
        } else {
            Mat4::from(*world).inverse()
        }
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self, world: &Affine3A, up: Vec3) -> Mat4 {
        self.projection_matrix() * self.view_matrix(world, up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
