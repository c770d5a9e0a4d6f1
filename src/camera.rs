use crate::input;
use artifact_core::{Camera, OrbitCamera};
use glam::{Vec2, Vec3};
use web_sys as web;

#[inline]
pub fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}

#[inline]
pub fn camera_for(canvas: &web::HtmlCanvasElement, orbit: &OrbitCamera) -> Camera {
    orbit.camera(canvas_aspect(canvas))
}

#[inline]
/// Compute a world-space ray from screen-space canvas coordinates.
///
/// - `canvas`: target canvas to derive dimensions/aspect
/// - `sx`, `sy`: pixel coordinates in the canvas' backing store space
/// - `orbit`: current orbit rig
///
/// Returns `(ray_origin, ray_direction)` in world space.
pub fn screen_to_world_ray(
    canvas: &web::HtmlCanvasElement,
    sx: f32,
    sy: f32,
    orbit: &OrbitCamera,
) -> (Vec3, Vec3) {
    let size = Vec2::new(canvas.width() as f32, canvas.height() as f32);
    let ndc = input::canvas_px_to_ndc(Vec2::new(sx, sy), size);
    camera_for(canvas, orbit).ray_from_ndc(ndc)
}

/// CSS-pixel position of `world` inside the canvas element, if in front of the eye.
pub fn world_to_css_px(
    canvas: &web::HtmlCanvasElement,
    orbit: &OrbitCamera,
    world: Vec3,
) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    let ndc = camera_for(canvas, orbit).project(world)?;
    let css = input::ndc_to_css_px(ndc, Vec2::new(rect.width() as f32, rect.height() as f32));
    Some(css + Vec2::new(rect.left() as f32, rect.top() as f32))
}
