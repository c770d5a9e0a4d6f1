// Front-end wiring and interaction tuning constants.
//
// Scene tuning (glow, springs, ripple, camera) lives in
// `artifact_core::constants`; this file only holds what the browser side needs.
// DOM ids expected in index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const POWER_BUTTON_ID: &str = "power-button";
pub const INFO_PANEL_ID: &str = "info-panel";
pub const LOADING_OVERLAY_ID: &str = "loading-overlay";

// CSS classes toggled from Rust
pub const GLOWING_CLASS: &str = "glowing";
pub const HIDDEN_CLASS: &str = "hidden";

// Mesh asset served next to index.html
pub const MESH_URL: &str = "/kuiba.stl";
pub const LOADING_TEXT: &str = "Loading...";

// A pointer-up within this many CSS pixels of its pointer-down is a click
pub const CLICK_SLOP_PX: f32 = 4.0;

// Info panel placement relative to the ring's projected centre (CSS px)
pub const PANEL_OFFSET_X_PX: f32 = 24.0;
pub const PANEL_OFFSET_Y_PX: f32 = -12.0;

// Background #0F1C23
pub const CLEAR_COLOR: [f64; 3] = [0.059, 0.110, 0.137];
