// Host-side tests for band tessellation, model transforms and the orbit camera.

use approx::assert_relative_eq;
use artifact_core::constants::{CAMERA_PITCH_LIMIT, RING_SEGMENTS};
use artifact_core::geometry::{
    annulus_point, band_matrix, euler_xyz, model_matrix, AnnulusTemplate,
};
use artifact_core::OrbitCamera;
use glam::{Quat, Vec2, Vec3};

#[test]
fn annulus_template_counts() {
    let t = AnnulusTemplate::new(RING_SEGMENTS);
    assert_eq!(t.vertices.len(), 130);
    assert_eq!(t.indices.len(), 384);
    assert_eq!(t.triangle_count(), 128);
    assert!(t.indices.iter().all(|&i| (i as usize) < t.vertices.len()));
}

#[test]
fn annulus_template_clamps_segments() {
    let t = AnnulusTemplate::new(1);
    assert_eq!(t.triangle_count(), 6);
    assert_eq!(t.vertices.len(), 8);
}

#[test]
fn annulus_edges_land_on_requested_radii() {
    let t = AnnulusTemplate::new(16);
    for v in &t.vertices {
        let p = annulus_point(*v, 0.55, 0.65);
        let expected = if v[2] == 0.0 { 0.55 } else { 0.65 };
        assert_relative_eq!(p.length(), expected, epsilon = 1e-5);
        assert_eq!(p.z, 0.0);
    }
}

#[test]
fn zero_euler_is_identity() {
    let q = euler_xyz(Vec3::ZERO);
    assert_relative_eq!(q.dot(Quat::IDENTITY).abs(), 1.0, epsilon = 1e-6);
}

#[test]
fn model_matrix_scales_uniformly() {
    let m = model_matrix(0.5);
    let v = m.transform_vector3(Vec3::new(8.0, 0.0, 0.0));
    assert_relative_eq!(v.length(), 4.0, epsilon = 1e-5);
    let origin = m.transform_point3(Vec3::ZERO);
    assert_relative_eq!(origin.length(), 0.0, epsilon = 1e-6);
}

#[test]
fn band_matrix_translates_then_rotates() {
    let m = band_matrix(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
    let p = m.transform_point3(Vec3::X);
    assert_relative_eq!(p.x, 2.0, epsilon = 1e-6);
    assert_relative_eq!(p.y, 2.0, epsilon = 1e-6);
    assert_relative_eq!(p.z, 3.0, epsilon = 1e-6);
}

#[test]
fn default_orbit_sits_on_positive_z() {
    let orbit = OrbitCamera::default();
    let eye = orbit.eye();
    assert_relative_eq!(eye.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(eye.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(eye.z, 10.0, epsilon = 1e-5);
}

#[test]
fn centre_ray_looks_down_negative_z() {
    let cam = OrbitCamera::default().camera(16.0 / 9.0);
    let (origin, dir) = cam.ray_from_ndc(Vec2::ZERO);
    assert_relative_eq!(origin.z, 10.0, epsilon = 1e-4);
    assert_relative_eq!(dir.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(dir.y, 0.0, epsilon = 1e-4);
    assert_relative_eq!(dir.z, -1.0, epsilon = 1e-4);
}

#[test]
fn project_origin_hits_screen_centre() {
    let cam = OrbitCamera::default().camera(1.0);
    let ndc = cam.project(Vec3::ZERO).expect("in front of the eye");
    assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
    assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
}

#[test]
fn pitch_is_clamped() {
    let mut orbit = OrbitCamera::default();
    orbit.rotate(Vec2::new(0.0, 10_000.0), 600.0);
    assert_relative_eq!(orbit.pitch, CAMERA_PITCH_LIMIT);
    orbit.rotate(Vec2::new(0.0, -50_000.0), 600.0);
    assert_relative_eq!(orbit.pitch, -CAMERA_PITCH_LIMIT);
}

#[test]
fn full_height_drag_is_one_revolution() {
    let mut orbit = OrbitCamera::default();
    let before = orbit.eye();
    orbit.rotate(Vec2::new(600.0, 0.0), 600.0);
    let after = orbit.eye();
    assert_relative_eq!(before.x, after.x, epsilon = 1e-3);
    assert_relative_eq!(before.z, after.z, epsilon = 1e-3);

    orbit.rotate(Vec2::new(150.0, 0.0), 600.0);
    let quarter = orbit.eye();
    assert_relative_eq!(quarter.x.abs(), 10.0, epsilon = 1e-3);
}
