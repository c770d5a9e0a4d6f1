//! Camera types shared with the web frontend.

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_PITCH_LIMIT, CAMERA_POSITION,
};
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::TAU;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through normalized device coordinates `ndc`.
    ///
    /// Returns `(origin, direction)` with the origin at the eye.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p_far = far.truncate() / far.w;
        (self.eye, (p_far - self.eye).normalize_or_zero())
    }

    /// Project a world point to NDC; `None` when it sits behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate().truncate() / clip.w)
    }
}

/// Rotate-only orbit rig around a fixed target. No zoom, no pan.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub rotate_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let eye = Vec3::from(CAMERA_POSITION);
        let flat = Vec2::new(eye.x, eye.z).length();
        Self {
            target: Vec3::ZERO,
            distance: eye.length(),
            yaw: eye.x.atan2(eye.z),
            pitch: eye.y.atan2(flat),
            rotate_speed: 1.0,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    /// Apply a pointer drag of `delta` pixels on a viewport `viewport_height`
    /// pixels tall. A drag across the full height turns one full revolution.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.yaw -= TAU * delta.x / h * self.rotate_speed;
        self.pitch = (self.pitch + TAU * delta.y / h * self.rotate_speed)
            .clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}
