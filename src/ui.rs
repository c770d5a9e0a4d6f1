use crate::constants::GLOWING_CLASS;
use crate::dom;
use artifact_core::Cursor;
use web_sys as web;

/// Mirror global activation on the power button.
pub fn sync_power_button(document: &web::Document, button_id: &str, active: bool) {
    if let Some(el) = document.get_element_by_id(button_id) {
        dom::set_class(&el, GLOWING_CLASS, active);
        _ = el.set_attribute("aria-pressed", if active { "true" } else { "false" });
    }
}

#[inline]
pub fn cursor_css(cursor: Cursor) -> &'static str {
    match cursor {
        Cursor::Default => "default",
        Cursor::Pointer => "pointer",
    }
}

pub fn apply_cursor(canvas: &web::HtmlCanvasElement, cursor: Cursor) {
    _ = canvas.style().set_property("cursor", cursor_css(cursor));
}
