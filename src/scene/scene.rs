use std::sync::atomic::{AtomicU32, Ordering};

use glam::Affine3A;
use slotmap::SlotMap;

use crate::errors::{Result, SceneError};
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::mesh::{BoundingBox, Mesh};
use crate::scene::node::{Node, NodeKind};
use crate::scene::traverse::Traversal;
use crate::scene::wrapper::SceneNode;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene graph container.
///
/// `Scene` is a pure data layer: it owns the node arena, the root list,
/// and the per-kind component pools, and it is the only place the tree
/// shape can change. Structural edits ([`attach`], [`detach`],
/// [`remove_node`]) are fail-fast: every check runs before any mutation,
/// so a rejected edit leaves the graph exactly as it was.
///
/// All read paths ([`world_transform`], [`traverse`], component getters)
/// take `&self` and touch no interior state, so any number of readers may
/// overlap. Structural writes take `&mut self` and must be serialized by
/// the owning application, typically between frames.
///
/// [`attach`]: Self::attach
/// [`detach`]: Self::detach
/// [`remove_node`]: Self::remove_node
/// [`world_transform`]: Self::world_transform
/// [`traverse`]: Self::traverse
pub struct Scene {
    pub id: u32,

    pub(crate) nodes: SlotMap<NodeHandle, Node>,
    pub(crate) root_nodes: Vec<NodeHandle>,

    // ==== Component pools ====
    pub(crate) meshes: SlotMap<MeshKey, Mesh>,
    pub(crate) cameras: SlotMap<CameraKey, Camera>,
    pub(crate) lights: SlotMap<LightKey, Light>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),

            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),

            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),
        }
    }

    // ========================================================================
    // Node creation
    // ========================================================================

    /// Creates an empty group node at the root.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::default())
    }

    /// Creates an empty group node with the given name at the root.
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::new(name.to_owned()))
    }

    /// Adds a node to the scene as a root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node directly under `parent`.
    pub fn add_to_parent(&mut self, node: Node, parent: NodeHandle) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NotFound {
                what: "parent node",
            });
        }
        let handle = self.nodes.insert(node);
        self.nodes[parent].children.push(handle);
        self.nodes[handle].parent = Some(parent);
        Ok(handle)
    }

    /// Starts building a node with a chainable [`NodeBuilder`].
    pub fn build_node(&'_ mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    // ========================================================================
    // Hierarchy: attach / detach / remove
    // ========================================================================

    /// Makes `child` a child of `parent`.
    ///
    /// Fails with [`SceneError::InvalidHierarchy`] when `child` and
    /// `parent` are the same node, when `child` still has a parent
    /// (detach it first; re-parenting is never implicit), or when `child`
    /// is an ancestor of `parent` (the edit would close a cycle). Fails
    /// with [`SceneError::NotFound`] when either handle is stale.
    ///
    /// On success the child leaves the root list, appears exactly once in
    /// `parent`'s children, and its parent link points at `parent`. On
    /// error the graph is unchanged.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<()> {
        if child == parent {
            return Err(SceneError::InvalidHierarchy {
                reason: "cannot attach a node to itself",
            });
        }
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NotFound {
                what: "parent node",
            });
        }
        let Some(child_node) = self.nodes.get(child) else {
            return Err(SceneError::NotFound { what: "child node" });
        };
        if child_node.parent.is_some() {
            return Err(SceneError::InvalidHierarchy {
                reason: "child already has a parent, detach it first",
            });
        }
        if self.is_ancestor_of(child, parent) {
            return Err(SceneError::InvalidHierarchy {
                reason: "child is an ancestor of the parent, attach would close a cycle",
            });
        }

        // Checks passed, now mutate
        if let Some(i) = self.root_nodes.iter().position(|&r| r == child) {
            self.root_nodes.remove(i);
        }
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Detaches `child` from its parent and makes it a root node.
    ///
    /// Fails with [`SceneError::NotFound`] when the handle is stale or the
    /// node has no parent. A detached node keeps its subtree and can be
    /// re-attached anywhere afterwards.
    pub fn detach(&mut self, child: NodeHandle) -> Result<()> {
        let Some(node) = self.nodes.get(child) else {
            return Err(SceneError::NotFound { what: "child node" });
        };
        let Some(parent) = node.parent else {
            return Err(SceneError::NotFound {
                what: "parent link",
            });
        };

        if let Some(parent_node) = self.nodes.get_mut(parent)
            && let Some(i) = parent_node.children.iter().position(|&c| c == child)
        {
            parent_node.children.remove(i);
        }
        self.nodes[child].parent = None;
        self.root_nodes.push(child);
        Ok(())
    }

    /// Removes a node and its whole subtree, including each removed
    /// node's component pool entry.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        // Take the children list first to avoid a borrow conflict
        let Some(children) = self.nodes.get(handle).map(|n| n.children.clone()) else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        // Unlink from the parent, or from the root list
        let parent = self.nodes.get(handle).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent)
                && let Some(i) = parent_node.children.iter().position(|&c| c == handle)
            {
                parent_node.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&r| r == handle) {
            self.root_nodes.remove(i);
        }

        // Drop the node and its component
        if let Some(node) = self.nodes.remove(handle) {
            match node.kind {
                NodeKind::Group => {}
                NodeKind::Mesh(key) => {
                    self.meshes.remove(key);
                }
                NodeKind::Camera(key) => {
                    self.cameras.remove(key);
                }
                NodeKind::Light(key) => {
                    self.lights.remove(key);
                }
            }
        }
    }

    /// True when `candidate` appears on `node`'s ancestor chain.
    fn is_ancestor_of(&self, candidate: NodeHandle, mut node: NodeHandle) -> bool {
        while let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) {
            if parent == candidate {
                return true;
            }
            node = parent;
        }
        false
    }

    // ========================================================================
    // Node access
    // ========================================================================

    /// Read-only access to a node.
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    /// Mutable access to a node (for TRS edits and flags).
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Chainable wrapper around a node handle.
    pub fn node(&'_ mut self, handle: NodeHandle) -> SceneNode<'_> {
        SceneNode::new(self, handle)
    }

    /// Current root handles, in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[NodeHandle] {
        &self.root_nodes
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_ref())
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.name = name.to_owned().into();
        }
    }

    /// Iterates over all live nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes.iter()
    }

    // ========================================================================
    // World transforms & traversal
    // ========================================================================

    /// Computes the node's world transform: its local transform composed
    /// with the chain of ancestor transforms up to the root.
    ///
    /// Computed from the current TRS values on every call; there is no
    /// cache that could go stale after a structural or transform change.
    /// Returns `None` for a stale handle.
    #[must_use]
    pub fn world_transform(&self, handle: NodeHandle) -> Option<Affine3A> {
        let node = self.nodes.get(handle)?;
        let mut world = node.transform.local_affine();
        let mut current = node.parent;
        while let Some(parent) = current {
            let parent_node = self.nodes.get(parent)?;
            world = parent_node.transform.local_affine() * world;
            current = parent_node.parent;
        }
        Some(world)
    }

    /// Lazy depth-first pre-order walk over the whole scene.
    ///
    /// Yields `(handle, node, world transform)` with parents before their
    /// children and siblings in insertion order. Each call starts a fresh
    /// walk; nothing is materialized up front.
    #[must_use]
    pub fn traverse(&self) -> Traversal<'_> {
        Traversal::from_roots(&self.nodes, &self.root_nodes)
    }

    /// Like [`traverse`](Self::traverse), rooted at `root` only. World
    /// transforms still include the ancestors above `root`.
    #[must_use]
    pub fn traverse_from(&self, root: NodeHandle) -> Traversal<'_> {
        let base = self
            .nodes
            .get(root)
            .and_then(|n| n.parent)
            .and_then(|p| self.world_transform(p))
            .unwrap_or(Affine3A::IDENTITY);
        Traversal::from_root(&self.nodes, root, base)
    }

    /// Visitor form of [`traverse`](Self::traverse): invokes `f` once per
    /// node, parents before children.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(NodeHandle, &Node, &Affine3A),
    {
        for (handle, node, world) in self.traverse() {
            f(handle, node, &world);
        }
    }

    // ========================================================================
    // Components: camera / light / mesh
    // ========================================================================

    /// Creates a camera node at the root.
    pub fn add_camera(&mut self, camera: Camera) -> NodeHandle {
        let key = self.cameras.insert(camera);
        self.add_node(Node::with_kind("Camera", NodeKind::Camera(key)))
    }

    /// Creates a camera node under `parent`.
    pub fn add_camera_to_parent(&mut self, camera: Camera, parent: NodeHandle) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NotFound {
                what: "parent node",
            });
        }
        let key = self.cameras.insert(camera);
        self.add_to_parent(Node::with_kind("Camera", NodeKind::Camera(key)), parent)
    }

    /// Creates a light node at the root.
    pub fn add_light(&mut self, light: Light) -> NodeHandle {
        let key = self.lights.insert(light);
        self.add_node(Node::with_kind("Light", NodeKind::Light(key)))
    }

    /// Creates a light node under `parent`.
    pub fn add_light_to_parent(&mut self, light: Light, parent: NodeHandle) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NotFound {
                what: "parent node",
            });
        }
        let key = self.lights.insert(light);
        self.add_to_parent(Node::with_kind("Light", NodeKind::Light(key)), parent)
    }

    /// Creates a mesh node at the root.
    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        let name = mesh.name.clone();
        let key = self.meshes.insert(mesh);
        self.add_node(Node::with_kind(name, NodeKind::Mesh(key)))
    }

    /// Creates a mesh node under `parent`.
    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeHandle) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NotFound {
                what: "parent node",
            });
        }
        let name = mesh.name.clone();
        let key = self.meshes.insert(mesh);
        self.add_to_parent(Node::with_kind(name, NodeKind::Mesh(key)), parent)
    }

    /// The camera component of `handle`, if it is a camera node.
    #[must_use]
    pub fn camera(&self, handle: NodeHandle) -> Option<&Camera> {
        match self.nodes.get(handle)?.kind {
            NodeKind::Camera(key) => self.cameras.get(key),
            _ => None,
        }
    }

    pub fn camera_mut(&mut self, handle: NodeHandle) -> Option<&mut Camera> {
        match self.nodes.get(handle)?.kind {
            NodeKind::Camera(key) => self.cameras.get_mut(key),
            _ => None,
        }
    }

    /// The light component of `handle`, if it is a light node.
    #[must_use]
    pub fn light(&self, handle: NodeHandle) -> Option<&Light> {
        match self.nodes.get(handle)?.kind {
            NodeKind::Light(key) => self.lights.get(key),
            _ => None,
        }
    }

    pub fn light_mut(&mut self, handle: NodeHandle) -> Option<&mut Light> {
        match self.nodes.get(handle)?.kind {
            NodeKind::Light(key) => self.lights.get_mut(key),
            _ => None,
        }
    }

    /// The mesh component of `handle`, if it is a mesh node.
    #[must_use]
    pub fn mesh(&self, handle: NodeHandle) -> Option<&Mesh> {
        match self.nodes.get(handle)?.kind {
            NodeKind::Mesh(key) => self.meshes.get(key),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self, handle: NodeHandle) -> Option<&mut Mesh> {
        match self.nodes.get(handle)?.kind {
            NodeKind::Mesh(key) => self.meshes.get_mut(key),
            _ => None,
        }
    }

    /// Iterates over all camera nodes as `(handle, camera)` pairs.
    pub fn iter_cameras(&self) -> impl Iterator<Item = (NodeHandle, &Camera)> {
        self.nodes.iter().filter_map(|(handle, node)| match node.kind {
            NodeKind::Camera(key) => self.cameras.get(key).map(|c| (handle, c)),
            _ => None,
        })
    }

    /// Iterates over the lights of visible nodes together with their
    /// world transforms.
    pub fn iter_visible_lights(&self) -> impl Iterator<Item = (&Light, Affine3A)> {
        self.nodes.iter().filter_map(|(handle, node)| {
            if !node.visible {
                return None;
            }
            let NodeKind::Light(key) = node.kind else {
                return None;
            };
            let light = self.lights.get(key)?;
            let world = self.world_transform(handle)?;
            Some((light, world))
        })
    }

    // ========================================================================
    // Bounds
    // ========================================================================

    /// World-space bounds of the mesh at `handle`, if it has any.
    fn mesh_bounds(&self, handle: NodeHandle) -> Option<BoundingBox> {
        let node = self.nodes.get(handle)?;
        let NodeKind::Mesh(key) = node.kind else {
            return None;
        };
        let local = self.meshes.get(key)?.bounds?;
        let world = self.world_transform(handle)?;
        Some(local.transform(&world))
    }

    /// World-space bounds of the subtree rooted at `handle`: the union of
    /// every descendant mesh's transformed local bounds. `None` when the
    /// subtree contains no bounded mesh.
    #[must_use]
    pub fn bounding_box_of(&self, handle: NodeHandle) -> Option<BoundingBox> {
        let mut combined = self.mesh_bounds(handle);

        let node = self.get_node(handle)?;
        for &child in &node.children {
            if let Some(child_box) = self.bounding_box_of(child) {
                combined = match combined {
                    Some(existing) => Some(existing.union(&child_box)),
                    None => Some(child_box),
                };
            }
        }

        combined
    }
}

/// Chainable construction of a node and its component.
///
/// ```rust,ignore
/// let camera = scene
///     .build_node("MainCamera")
///     .with_position(0.0, 2.0, 8.0)
///     .with_camera(Camera::new())
///     .build()?;
/// ```
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    node: Node,
    parent: Option<NodeHandle>,
    component: Option<PendingComponent>,
}

enum PendingComponent {
    Camera(Camera),
    Light(Light),
    Mesh(Mesh),
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            node: Node::new(name.to_owned()),
            parent: None,
            component: None,
        }
    }

    // === Chainable configuration ===

    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.position = glam::Vec3::new(x, y, z);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: glam::Quat) -> Self {
        self.node.transform.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, s: f32) -> Self {
        self.node.transform.scale = glam::Vec3::splat(s);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attaches a camera component; the node's kind becomes `Camera`.
    #[must_use]
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.component = Some(PendingComponent::Camera(camera));
        self
    }

    /// Attaches a light component; the node's kind becomes `Light`.
    #[must_use]
    pub fn with_light(mut self, light: Light) -> Self {
        self.component = Some(PendingComponent::Light(light));
        self
    }

    /// Attaches a mesh component; the node's kind becomes `Mesh`.
    #[must_use]
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.component = Some(PendingComponent::Mesh(mesh));
        self
    }

    // === Terminal ===

    /// Inserts the node (and its component) into the scene.
    ///
    /// Fails with [`SceneError::NotFound`] before inserting anything when
    /// the configured parent handle is stale.
    pub fn build(self) -> Result<NodeHandle> {
        if let Some(parent) = self.parent
            && !self.scene.nodes.contains_key(parent)
        {
            return Err(SceneError::NotFound {
                what: "parent node",
            });
        }

        let mut node = self.node;
        node.kind = match self.component {
            None => NodeKind::Group,
            Some(PendingComponent::Camera(camera)) => {
                NodeKind::Camera(self.scene.cameras.insert(camera))
            }
            Some(PendingComponent::Light(light)) => {
                NodeKind::Light(self.scene.lights.insert(light))
            }
            Some(PendingComponent::Mesh(mesh)) => NodeKind::Mesh(self.scene.meshes.insert(mesh)),
        };

        match self.parent {
            Some(parent) => self.scene.add_to_parent(node, parent),
            None => Ok(self.scene.add_node(node)),
        }
    }
}
