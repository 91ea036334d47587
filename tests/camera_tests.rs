//! Camera Tests
//!
//! Tests for:
//! - Fresh-camera defaults and the {active, targeted} flag state machine
//! - Targeted vs. free view matrix computation
//! - Projection matrices
//! - Renderer-side viewpoint resolution

use arbor::scene::camera::{Camera, ProjectionType};
use arbor::scene::scene::Scene;
use arbor::scene::view::resolve_viewpoint;
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

// ============================================================================
// Defaults & Flag State Machine
// ============================================================================

#[test]
fn camera_fresh_defaults() {
    let camera = Camera::new();
    assert!(!camera.active);
    assert!(!camera.targeted);
    assert_eq!(camera.target, Vec3::ZERO);
}

#[test]
fn camera_node_tag() {
    let mut scene = Scene::new();
    let handle = scene.add_camera(Camera::new());
    assert_eq!(scene.get_node(handle).unwrap().tag(), "Camera");
}

#[test]
fn camera_flags_toggle_independently() {
    let mut camera = Camera::new();

    camera.set_active(true);
    assert!(camera.active);
    assert!(!camera.targeted, "active must not touch targeted");

    camera.set_targeted(true);
    assert!(camera.targeted);
    assert!(camera.active, "targeted must not touch active");

    camera.set_active(false);
    camera.set_targeted(false);
    assert!(!camera.active);
    assert!(!camera.targeted);
}

#[test]
fn camera_toggling_targeted_preserves_target() {
    let mut camera = Camera::new();
    let point = Vec3::new(1.0, 2.0, 3.0);

    camera.set_targeted(true);
    camera.set_target(point);

    camera.set_targeted(false);
    assert_eq!(camera.target, point, "Toggling off must not clear target");

    camera.set_targeted(true);
    assert_eq!(camera.target, point);
}

// ============================================================================
// View Matrices
// ============================================================================

#[test]
fn camera_targeted_view_points_at_target() {
    let mut scene = Scene::new();
    let root = scene.create_node();
    let handle = scene.add_camera_to_parent(Camera::new(), root).unwrap();

    let target = Vec3::new(1.0, 2.0, 3.0);
    {
        let camera = scene.camera_mut(handle).unwrap();
        camera.set_targeted(true);
        camera.set_target(target);
    }

    // Identity transforms everywhere: the camera sits at the origin
    let world = scene.world_transform(handle).unwrap();
    let view = scene.camera(handle).unwrap().view_matrix(&world, Vec3::Y);

    // In view space the target lies straight ahead on -Z
    let viewed = view.transform_point3(target);
    assert!(viewed.x.abs() < EPSILON);
    assert!(viewed.y.abs() < EPSILON);
    assert!((viewed.z + target.length()).abs() < EPSILON);
}

#[test]
fn camera_targeted_view_composes_parent_transform() {
    let mut scene = Scene::new();
    let root = scene.create_node();
    let handle = scene.add_camera_to_parent(Camera::new(), root).unwrap();

    scene.get_node_mut(root).unwrap().transform.position = Vec3::new(5.0, 0.0, 0.0);
    {
        let camera = scene.camera_mut(handle).unwrap();
        camera.set_targeted(true);
        camera.set_target(Vec3::new(5.0, 0.0, -10.0));
    }

    let world = scene.world_transform(handle).unwrap();
    let eye: Vec3 = world.translation.into();
    assert!(vec3_approx(eye, Vec3::new(5.0, 0.0, 0.0)));

    let view = scene.camera(handle).unwrap().view_matrix(&world, Vec3::Y);
    // The camera's own world position maps to the view-space origin
    let origin = view.transform_point3(eye);
    assert!(vec3_approx(origin, Vec3::ZERO));
    // And the target sits 10 units down -Z
    let viewed = view.transform_point3(Vec3::new(5.0, 0.0, -10.0));
    assert!(vec3_approx(viewed, Vec3::new(0.0, 0.0, -10.0)));
}

#[test]
fn camera_untargeted_view_ignores_target() {
    let mut scene = Scene::new();
    let handle = scene.add_camera(Camera::new());

    scene.get_node_mut(handle).unwrap().transform.position = Vec3::new(0.0, 0.0, 5.0);
    scene
        .camera_mut(handle)
        .unwrap()
        .set_target(Vec3::new(100.0, 100.0, 100.0));

    let world = scene.world_transform(handle).unwrap();
    let view = scene.camera(handle).unwrap().view_matrix(&world, Vec3::Y);

    // Untargeted: view is the world inverse, so the node's rotation
    // (identity here) wins and the garbage target changes nothing
    let expected = Mat4::from(world).inverse();
    assert!(view.abs_diff_eq(expected, EPSILON));
}

#[test]
fn camera_untargeted_view_uses_node_rotation() {
    let mut scene = Scene::new();
    let handle = scene.add_camera(Camera::new());
    scene.get_node_mut(handle).unwrap().transform.rotation = Quat::from_rotation_y(FRAC_PI_2);

    let world = scene.world_transform(handle).unwrap();
    let view = scene.camera(handle).unwrap().view_matrix(&world, Vec3::Y);

    // The camera looks down its local -Z; rotated +90° about Y that is
    // world -X, so a point on -X appears ahead in view space
    let viewed = view.transform_point3(Vec3::new(-10.0, 0.0, 0.0));
    assert!(vec3_approx(viewed, Vec3::new(0.0, 0.0, -10.0)));
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn camera_perspective_projection() {
    let camera = Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 1000.0);
    assert_eq!(camera.projection_type, ProjectionType::Perspective);

    let proj = camera.projection_matrix();
    let expected = Mat4::perspective_rh(60.0_f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
    assert!(proj.abs_diff_eq(expected, EPSILON));
}

#[test]
fn camera_orthographic_projection() {
    let camera = Camera::new_orthographic(10.0, 2.0, 0.1, 100.0);
    assert_eq!(camera.projection_type, ProjectionType::Orthographic);

    let proj = camera.projection_matrix();
    let expected = Mat4::orthographic_rh(-20.0, 20.0, -10.0, 10.0, 0.1, 100.0);
    assert!(proj.abs_diff_eq(expected, EPSILON));
}

// ============================================================================
// Viewpoint Resolution
// ============================================================================

#[test]
fn resolve_viewpoint_none_without_active_camera() {
    let mut scene = Scene::new();
    scene.add_camera(Camera::new());
    assert!(resolve_viewpoint(&scene, Vec3::Y).is_none());
}

#[test]
fn resolve_viewpoint_finds_active_camera() {
    let mut scene = Scene::new();
    let idle = scene.add_camera(Camera::new());
    let main = scene.add_camera(Camera::new());
    scene.camera_mut(main).unwrap().set_active(true);

    let viewpoint = resolve_viewpoint(&scene, Vec3::Y).unwrap();
    assert_eq!(viewpoint.node, main);
    assert_ne!(viewpoint.node, idle);
}

#[test]
fn resolve_viewpoint_multiple_active_first_wins() {
    // The data model allows several active cameras; resolution picks one
    let mut scene = Scene::new();
    let first = scene.add_camera(Camera::new());
    let second = scene.add_camera(Camera::new());
    scene.camera_mut(first).unwrap().set_active(true);
    scene.camera_mut(second).unwrap().set_active(true);

    let viewpoint = resolve_viewpoint(&scene, Vec3::Y).unwrap();
    assert_eq!(viewpoint.node, first);
}

#[test]
fn resolve_viewpoint_matrices_match_camera() {
    let mut scene = Scene::new();
    let handle = scene.add_camera(Camera::new());
    scene.get_node_mut(handle).unwrap().transform.position = Vec3::new(0.0, 2.0, 8.0);
    {
        let camera = scene.camera_mut(handle).unwrap();
        camera.set_active(true);
        camera.set_targeted(true);
        camera.set_target(Vec3::ZERO);
    }

    let viewpoint = resolve_viewpoint(&scene, Vec3::Y).unwrap();
    let world = scene.world_transform(handle).unwrap();
    let camera = scene.camera(handle).unwrap();

    assert!(viewpoint.view.abs_diff_eq(camera.view_matrix(&world, Vec3::Y), EPSILON));
    assert!(viewpoint.projection.abs_diff_eq(camera.projection_matrix(), EPSILON));
    assert!(viewpoint
        .view_projection()
        .abs_diff_eq(camera.projection_matrix() * camera.view_matrix(&world, Vec3::Y), EPSILON));
}
