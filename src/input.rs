use glam::{Vec2, Vec3};
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub inside: bool,
}

/// Pointer-down bookkeeping for orbit drags and click detection.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub start: Vec2,
    pub last: Vec2,
    /// Set once the pointer strays past the click slop; the gesture is then a drag.
    pub dragged: bool,
}

impl DragState {
    pub fn begin(&mut self, at: Vec2) {
        *self = Self {
            active: true,
            start: at,
            last: at,
            dragged: false,
        };
    }

    /// Record a move and return the delta since the previous one.
    pub fn update(&mut self, at: Vec2, slop: f32) -> Vec2 {
        let delta = at - self.last;
        self.last = at;
        if exceeds_slop(self.start, at, slop) {
            self.dragged = true;
        }
        delta
    }

    /// Finish the gesture; returns true when it counts as a click.
    pub fn end(&mut self, at: Vec2, slop: f32) -> bool {
        let was_click = self.active && !self.dragged && !exceeds_slop(self.start, at, slop);
        self.active = false;
        was_click
    }
}

#[inline]
pub fn exceeds_slop(start: Vec2, end: Vec2, slop: f32) -> bool {
    start.distance_squared(end) > slop * slop
}

/// Ray against a flat disc; returns the ray parameter of the hit.
#[inline]
pub fn ray_disc(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    normal: Vec3,
    radius: f32,
) -> Option<f32> {
    let denom = normal.dot(ray_dir);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray_origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let hit = ray_origin + ray_dir * t;
    (hit.distance_squared(center) <= radius * radius).then_some(t)
}

/// Index of the nearest hit among `(index, t)` pairs.
#[inline]
pub fn nearest_hit(hits: impl IntoIterator<Item = (usize, f32)>) -> Option<usize> {
    hits.into_iter()
        .filter(|(_, t)| t.is_finite())
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

// ---------------- Keyboard ----------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePower,
    ClosePanels,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" => Some(KeyAction::TogglePower),
        "Escape" | "Esc" => Some(KeyAction::ClosePanels),
        _ => None,
    }
}

// ---------------- Coordinate helpers ----------------
#[inline]
pub fn canvas_px_to_ndc(px: Vec2, size: Vec2) -> Vec2 {
    let w = size.x.max(1.0);
    let h = size.y.max(1.0);
    Vec2::new(2.0 * px.x / w - 1.0, 1.0 - 2.0 * px.y / h)
}

#[inline]
pub fn ndc_to_css_px(ndc: Vec2, css_size: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * css_size.x,
        (1.0 - ndc.y) * 0.5 * css_size.y,
    )
}

#[inline]
pub fn pointer_css_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let css = pointer_css_px(ev, canvas);
    let sx = (css.x / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (css.y / rect.height().max(1.0) as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}
