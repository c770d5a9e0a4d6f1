use crate::constants::{
    BACKDROP_RING_POSITION, BACKDROP_RING_ROTATION, MODEL_ROTATION,
};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct AnnulusTemplate {
    /// `[cos θ, sin θ, t]` per vertex.
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<u16>,
}

impl AnnulusTemplate {
    /// `segments` quads around the circle; at least 3.
    pub fn new(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut vertices = Vec::with_capacity(2 * (segments as usize + 1));
        for i in 0..=segments {
            let theta = TAU * i as f32 / segments as f32;
            let (s, c) = theta.sin_cos();
            vertices.push([c, s, 0.0]);
            vertices.push([c, s, 1.0]);
        }
        let mut indices = Vec::with_capacity(6 * segments as usize);
        for i in 0..segments as u16 {
            let a = 2 * i;
            let (inner0, outer0, inner1, outer1) = (a, a + 1, a + 2, a + 3);
            indices.extend_from_slice(&[inner0, outer0, outer1, inner0, outer1, inner1]);
        }
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Place a template vertex for a band spanning `[inner, outer]` in the local XY plane.
#[inline]
pub fn annulus_point(vertex: [f32; 3], inner: f32, outer: f32) -> Vec3 {
    let [c, s, t] = vertex;
    let r = inner + (outer - inner) * t;
    (Vec2::new(c, s) * r).extend(0.0)
}

#[inline]
pub fn euler_xyz(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
}

pub fn model_group_rotation() -> Quat {
    euler_xyz(Vec3::from(MODEL_ROTATION))
}

/// World transform of the loaded mesh given its fitted scale.
pub fn model_matrix(scale: f32) -> Mat4 {
    Mat4::from_quat(model_group_rotation()) * Mat4::from_scale(Vec3::splat(scale))
}

/// World transform of the backdrop ring, a child of the model group.
pub fn backdrop_matrix() -> Mat4 {
    Mat4::from_quat(model_group_rotation())
        * Mat4::from_rotation_translation(
            euler_xyz(Vec3::from(BACKDROP_RING_ROTATION)),
            Vec3::from(BACKDROP_RING_POSITION),
        )
}

/// Transform of a band centred at `position`, oriented by `rotation`.
#[inline]
pub fn band_matrix(position: Vec3, rotation: Quat) -> Mat4 {
    Mat4::from_rotation_translation(rotation, position)
}
