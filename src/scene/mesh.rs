use std::borrow::Cow;

use glam::{Affine3A, Vec3};
use uuid::Uuid;

/// Axis-aligned bounding box in whichever space its owner defines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Bounds of the eight transformed corners. Under rotation this grows
    /// the box rather than rotating it.
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut new_min = Vec3::splat(f32::INFINITY);
        let mut new_max = Vec3::splat(f32::NEG_INFINITY);

        for point in corners {
            let transformed = matrix.transform_point3(point);
            new_min = new_min.min(transformed);
            new_max = new_max.max(transformed);
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }

    /// Grows the box by `amount` on every side.
    #[must_use]
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }
}

/// Geometry component of a node with [`NodeKind::Mesh`].
///
/// The actual vertex data lives with the rendering backend; the scene
/// layer only needs identity and local-space bounds for culling and
/// framing queries.
///
/// [`NodeKind::Mesh`]: crate::scene::NodeKind::Mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,
    /// Local-space bounds, if known.
    pub bounds: Option<BoundingBox>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            bounds: None,
        }
    }

    #[must_use]
    pub fn with_bounds(name: impl Into<Cow<'static, str>>, bounds: BoundingBox) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            bounds: Some(bounds),
        }
    }
}
