use std::borrow::Cow;

use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

/// The role a node plays in the graph, fixed when the node is created.
///
/// The renderer dispatches on this tag while walking the tree; the payload
/// keys index into the owning [`Scene`]'s component pools. A match on
/// `NodeKind` is exhaustive, so adding a kind is a compile error at every
/// dispatch site until it is handled.
///
/// [`Scene`]: crate::scene::Scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Plain grouping node with no component attached.
    Group,
    /// Renderable geometry.
    Mesh(MeshKey),
    /// Viewpoint supplier.
    Camera(CameraKey),
    /// Light source.
    Light(LightKey),
}

impl NodeKind {
    /// Human-readable tag for display and logging.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Group => "Group",
            NodeKind::Mesh(_) => "Mesh",
            NodeKind::Camera(_) => "Camera",
            NodeKind::Light(_) => "Light",
        }
    }
}

/// A scene node: hierarchy links, a local transform, and a kind tag.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: non-owning back reference (None for root nodes)
/// - `children`: ordered list of child handles
///
/// Ownership runs parent to child through the scene arena; removing a node
/// removes its whole subtree. The links themselves are crate-private so the
/// tree shape can only change through [`Scene::attach`] and
/// [`Scene::detach`], which keep both ends in sync and reject edits that
/// would break the tree.
///
/// # Transform
///
/// Each node carries a local [`Transform`] (position, rotation, scale).
/// World transforms are composed from the ancestor chain on demand and are
/// never stored, so there is no cached state to go stale after a
/// structural or transform change.
///
/// Nodes are identified by their [`NodeHandle`], not by value; two nodes
/// with identical fields are distinct entities.
///
/// [`Scene::attach`]: crate::scene::Scene::attach
/// [`Scene::detach`]: crate::scene::Scene::detach
/// [`NodeHandle`]: crate::scene::NodeHandle
#[derive(Debug, Clone)]
pub struct Node {
    // === Core Hierarchy ===
    /// Parent node handle (None for root nodes)
    pub(crate) parent: Option<NodeHandle>,
    /// Child node handles
    pub(crate) children: Vec<NodeHandle>,

    // === Identity ===
    /// Human-readable name, not required to be unique
    pub name: Cow<'static, str>,
    /// Role tag, set once at construction
    pub(crate) kind: NodeKind,

    // === Core Spatial Data ===
    /// Local transform
    pub transform: Transform,

    // === Core State ===
    /// Visibility flag for culling
    pub visible: bool,
}

impl Node {
    /// Creates a plain [`NodeKind::Group`] node with a default transform.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    pub(crate) fn with_kind(name: impl Into<Cow<'static, str>>, kind: NodeKind) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            name: name.into(),
            kind,
            transform: Transform::new(),
            visible: true,
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the node's kind tag.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Shorthand for `self.kind().tag()`.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
