use glam::{Affine3A, EulerRot, Mat3, Mat4, Quat, Vec3};

/// Local TRS component of a node.
///
/// Holds position, rotation, and scale. Matrices are computed on demand:
/// [`local_affine`](Self::local_affine) builds the local matrix from the
/// current TRS, and the scene composes world matrices from the ancestor
/// chain during traversal. Nothing is cached, so a read always reflects
/// the latest mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Builds the local matrix from the current position, rotation, and
    /// scale.
    #[inline]
    #[must_use]
    pub fn local_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Local matrix as a `Mat4`, for upload or interop.
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from(self.local_affine())
    }

    /// Helper: set rotation from Euler angles (XYZ order, radians).
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// Current rotation as Euler angles (XYZ order).
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Advanced: set rotation from Euler angles with an explicit order.
    pub fn set_rotation_euler_with_order(&mut self, x: f32, y: f32, z: f32, order: EulerRot) {
        self.rotation = Quat::from_euler(order, x, y, z);
    }

    /// Sets TRS by decomposing `mat`.
    ///
    /// Useful when syncing from a loader or a physics engine. If the
    /// matrix contains shear, the decomposition drops it.
    pub fn apply_local_affine(&mut self, mat: Affine3A) {
        let (scale, rotation, translation) = mat.to_scale_rotation_translation();
        self.scale = scale;
        self.rotation = rotation;
        self.position = translation;
    }

    /// `Mat4` variant of [`apply_local_affine`](Self::apply_local_affine).
    pub fn apply_local_matrix(&mut self, mat: Mat4) {
        self.apply_local_affine(Affine3A::from_mat4(mat));
    }

    /// Orients the transform to face `target`.
    ///
    /// `target` and `up` are in the parent coordinate space of this
    /// transform. No-op when the forward direction is collinear with `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();

        // Degenerate basis, keep the current rotation
        if forward.cross(up).length_squared() < 1e-4 {
            return;
        }

        let right = forward.cross(up).normalize();
        let new_up = right.cross(forward).normalize();

        let rot_mat = Mat3::from_cols(right, new_up, -forward);
        self.rotation = Quat::from_mat3(&rot_mat);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
