use glam::Vec3;
use std::f32::consts::PI;
use std::time::Duration;

// Shared tuning constants for the artifact scene.

// Model fitting
pub const TARGET_SIZE: f32 = 4.0; // largest mesh dimension after normalization
pub const MODEL_ROTATION: [f32; 3] = [-PI / 2.0, 0.0, 1.75 * PI]; // XYZ euler of the model group
pub const MODEL_COLOR: [f32; 3] = [0.502, 0.502, 0.502]; // #808080

// Flat backdrop ring inside the model group
pub const BACKDROP_RING_INNER: f32 = 1.1;
pub const BACKDROP_RING_OUTER: f32 = 1.3;
pub const BACKDROP_RING_SEGMENTS: u32 = 64;
pub const BACKDROP_RING_POSITION: [f32; 3] = [0.0, 1.0, 0.0];
pub const BACKDROP_RING_ROTATION: [f32; 3] = [-PI / 2.0, 0.0, 1.75 * PI];
pub const BACKDROP_RING_COLOR: [f32; 3] = [0.255, 0.412, 0.882]; // #4169E1
pub const BACKDROP_RING_OPACITY: f32 = 0.8;

// Ring glow
pub const GLOW_COLOR: [f32; 3] = [0.710, 0.961, 0.965]; // #B5F5F6
pub const GLOW_INTENSITY: f32 = 2.0;
pub const HOVER_INTENSITY: f32 = 3.0;
pub const OUTER_GLOW_OPACITY: f32 = 1.0;
pub const INNER_GLOW_OPACITY: f32 = 0.8;
pub const VISIBLE_OPACITY_EPSILON: f32 = 1e-3; // below this a fading ring is not drawn
pub const RING_SEGMENTS: u32 = 64;

// Band radii as fractions of a ring's nominal size
pub const OUTER_BAND: [f32; 2] = [0.85, 1.0];
pub const INNER_BAND: [f32; 2] = [0.55, 0.65];

// Ripple sweep
pub const RIPPLE_STEP: f32 = 0.015; // radius units per rendered frame
pub const RIPPLE_RESET_RADIUS: f32 = 0.1; // wrap target and starting radius
pub const RIPPLE_LIMIT_FACTOR: f32 = 1.2; // wrap threshold, fraction of size
pub const RIPPLE_BAND_WIDTH: f32 = 0.05;
pub const RIPPLE_MIN_RADIUS: f32 = 0.05;
pub const RIPPLE_PEAK_OPACITY: f32 = 2.0;

// Entrance vibration: (offset x, offset y, scale) per chained step
pub const ENTRANCE_STEPS: [[f32; 3]; 3] = [[0.08, 0.05, 1.15], [-0.06, -0.04, 0.92], [0.0, 0.0, 1.0]];

// Spring integration
pub const SPRING_MAX_SUBSTEP_SEC: f32 = 0.001;
pub const SPRING_MAX_TICK_SEC: f32 = 0.25; // clamp for long stalls (backgrounded tab)

// Front cluster activation delays (ms), one per ring
pub const FRONT_CLUSTER_DELAYS_MS: [u64; 5] = [0, 300, 300, 600, 600];

// Camera
pub const CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 10.0];
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_PITCH_LIMIT: f32 = PI / 2.0 - 0.01;

#[inline]
pub fn model_rotation_vec3() -> Vec3 {
    Vec3::from(MODEL_ROTATION)
}

#[inline]
pub fn front_cluster_delays() -> [Duration; 5] {
    FRONT_CLUSTER_DELAYS_MS.map(Duration::from_millis)
}
