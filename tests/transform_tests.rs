//! Transform, Camera and SceneGraph tests
//!
//! Tests for:
//! - Transform TRS matrices and Euler round-trips
//! - look_at orientation and degenerate inputs
//! - Camera projection under collapsed containers
//! - Scene graph hierarchy, re-parenting and traversal order

use glam::{Quat, Vec3};
use scrolly::scene::{Camera, Material, Mesh, Node, SceneGraph, Transform};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
    assert_eq!(t, Transform::default());
}

#[test]
fn transform_local_matrix_reflects_trs() {
    let mut t = Transform::from_position(Vec3::new(10.0, 20.0, 30.0));
    t.scale = Vec3::splat(2.0);

    let m = t.local_matrix();
    assert!(vec3_approx(m.translation.into(), Vec3::new(10.0, 20.0, 30.0)));
    assert!(vec3_approx(m.transform_vector3(Vec3::X), Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn transform_euler_roundtrip() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.3, -0.7, 1.1);
    assert!(vec3_approx(t.rotation_euler(), Vec3::new(0.3, -0.7, 1.1)));
}

#[test]
fn transform_rotate_euler_accumulates() {
    let mut t = Transform::new();
    for _ in 0..10 {
        t.rotate_euler(Vec3::new(0.0, 0.01, 0.0));
    }
    assert!(approx_eq(t.rotation_euler().y, 0.1));
    assert!(approx_eq(t.rotation_euler().x, 0.0));
}

#[test]
fn transform_look_at_basic() {
    let mut t = Transform::from_position(Vec3::new(0.0, 0.0, 5.0));
    t.look_at(Vec3::ZERO, Vec3::Y);

    // -Z of the transform points at the origin.
    let forward = t.rotation * Vec3::NEG_Z;
    assert!(vec3_approx(forward, Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn transform_look_at_off_axis() {
    let mut t = Transform::from_position(Vec3::new(5.0, 0.0, 0.0));
    t.look_at(Vec3::ZERO, Vec3::Y);
    let forward = t.rotation * Vec3::NEG_Z;
    assert!(vec3_approx(forward, Vec3::NEG_X));
}

#[test]
fn transform_look_at_collinear_up_noop() {
    let mut t = Transform::from_position(Vec3::ZERO);
    t.rotation = Quat::from_rotation_y(FRAC_PI_4);
    let before = t.rotation;

    t.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
    assert_eq!(t.rotation, before);

    t.look_at(Vec3::ZERO, Vec3::Y);
    assert_eq!(t.rotation, before);
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn camera_stores_fov_in_radians() {
    let cam = Camera::new_perspective(90.0, 1.0, 0.1, 100.0);
    assert!(approx_eq(cam.fov, FRAC_PI_2));
}

#[test]
fn camera_zero_aspect_keeps_projection_finite() {
    let mut cam = Camera::new_perspective(45.0, 16.0 / 9.0, 0.1, 1000.0);
    cam.set_aspect(0.0);
    assert!(cam.projection_matrix().is_finite());
    cam.set_aspect(f32::NAN);
    assert!(cam.projection_matrix().is_finite());
}

#[test]
fn camera_view_matrix_is_inverse_of_placement() {
    let mut cam = Camera::new_perspective(45.0, 1.0, 0.1, 1000.0);
    cam.transform.position = Vec3::new(0.0, 0.0, 5.0);
    cam.look_at(Vec3::ZERO);

    let origin_in_view = cam.view_matrix().transform_point3(Vec3::ZERO);
    assert!(vec3_approx(origin_in_view, Vec3::new(0.0, 0.0, -5.0)));
}

#[test]
fn camera_aspect_changes_projection() {
    let mut cam = Camera::new_perspective(45.0, 1.0, 0.1, 1000.0);
    let square = cam.projection_matrix();
    cam.set_aspect(2.0);
    assert_ne!(square, cam.projection_matrix());
    assert!(approx_eq(
        square.x_axis.x / cam.projection_matrix().x_axis.x,
        2.0
    ));
}

// ============================================================================
// Scene Graph
// ============================================================================

fn create_chain(length: usize) -> (SceneGraph, Vec<scrolly::scene::NodeKey>) {
    let mut graph = SceneGraph::new();
    let mut keys = Vec::with_capacity(length);
    let root = graph.add_node(Node::new("node_0"));
    keys.push(root);
    for i in 1..length {
        let key = graph.add_to_parent(Node::new(format!("node_{i}")), keys[i - 1]);
        keys.push(key);
    }
    (graph, keys)
}

#[test]
fn graph_chain_links_parents_and_children() {
    let (graph, keys) = create_chain(4);
    assert_eq!(graph.root_nodes, vec![keys[0]]);
    for pair in keys.windows(2) {
        let parent = graph.get_node(pair[0]).unwrap();
        let child = graph.get_node(pair[1]).unwrap();
        assert_eq!(parent.children(), &[pair[1]]);
        assert_eq!(child.parent(), Some(pair[0]));
    }
}

#[test]
fn graph_traverse_is_depth_first_preorder() {
    let mut graph = SceneGraph::new();
    let root = graph.add_node(Node::new("root"));
    let a = graph.add_to_parent(Node::new("a"), root);
    let a1 = graph.add_to_parent(Node::new("a1"), a);
    let b = graph.add_to_parent(Node::new("b"), root);
    let second_root = graph.add_node(Node::new("second"));

    assert_eq!(graph.traverse(), vec![root, a, a1, b, second_root]);
}

#[test]
fn graph_attach_reparents_root_node() {
    let mut graph = SceneGraph::new();
    let parent = graph.add_node(Node::new("parent"));
    let loose = graph.add_node(Node::new("loose"));

    graph.attach(loose, parent);

    assert_eq!(graph.root_nodes, vec![parent]);
    assert_eq!(graph.get_node(loose).unwrap().parent(), Some(parent));
    assert_eq!(graph.get_node(parent).unwrap().children(), &[loose]);
}

#[test]
fn graph_attach_moves_between_parents() {
    let (mut graph, keys) = create_chain(3);
    graph.attach(keys[2], keys[0]);

    assert_eq!(graph.get_node(keys[1]).unwrap().children(), &[] as &[_]);
    assert_eq!(graph.get_node(keys[0]).unwrap().children(), &[keys[1], keys[2]]);
}

#[test]
fn graph_attach_to_self_is_ignored() {
    let (mut graph, keys) = create_chain(2);
    graph.attach(keys[1], keys[1]);
    assert_eq!(graph.get_node(keys[1]).unwrap().parent(), Some(keys[0]));
}

#[test]
fn graph_find_by_name_searches_subtree() {
    let (graph, keys) = create_chain(5);
    assert_eq!(graph.find_by_name(keys[0], "node_3"), Some(keys[3]));
    assert_eq!(graph.find_by_name(keys[2], "node_1"), None);
    assert_eq!(graph.find_by_name(keys[0], "missing"), None);
}

#[test]
fn graph_mesh_count_ignores_unreachable_nodes() {
    let mut graph = SceneGraph::new();
    let root = graph.add_node(Node::new("root"));
    graph.add_to_parent(
        Node::new("body").with_mesh(Mesh::new("body", Some(Material::default()))),
        root,
    );
    let detached = graph.add_node(Node::new("detached").with_mesh(Mesh::new("d", None)));
    assert_eq!(graph.mesh_count(), 2);

    graph.root_nodes.retain(|&k| k != detached);
    assert_eq!(graph.mesh_count(), 1);
}

#[test]
fn deeply_nested_graph_no_stack_overflow() {
    let (graph, keys) = create_chain(10_000);
    let order = graph.traverse();
    assert_eq!(order.len(), 10_000);
    assert_eq!(order.last(), keys.last());
}
