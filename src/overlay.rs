use crate::constants::{HIDDEN_CLASS, LOADING_OVERLAY_ID, PANEL_OFFSET_X_PX, PANEL_OFFSET_Y_PX};
use crate::dom;
use artifact_core::{InfoPanel, RingId};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

// ---------------- Loading overlay ----------------

#[inline]
pub fn show_loading(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        el.set_text_content(Some(text));
        dom::set_class(&el, HIDDEN_CLASS, false);
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        dom::set_class(&el, HIDDEN_CLASS, true);
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

// ---------------- Info panels ----------------

/// DOM side of the open info panels: one card per open ring inside a
/// fixed-position container. Cards are rebuilt only when the open set changes;
/// positions follow the projected ring every frame.
pub struct InfoPanelView {
    container: web::HtmlElement,
    shown: Vec<RingId>,
    cards: Vec<web::HtmlElement>,
}

impl InfoPanelView {
    pub fn new(container: web::HtmlElement) -> Self {
        dom::set_class(&container, HIDDEN_CLASS, true);
        Self {
            container,
            shown: Vec::new(),
            cards: Vec::new(),
        }
    }

    /// Sync with this frame's panels. `anchors[i]` is the CSS position of
    /// `panels[i]`'s ring, `None` when it is behind the camera.
    pub fn update(&mut self, document: &web::Document, panels: &[InfoPanel], anchors: &[Option<Vec2>]) {
        let ids: Vec<RingId> = panels.iter().map(|p| p.ring).collect();
        if ids != self.shown {
            self.rebuild(document, panels);
            self.shown = ids;
        }
        dom::set_class(&self.container, HIDDEN_CLASS, panels.is_empty());
        for (card, anchor) in self.cards.iter().zip(anchors) {
            let style = card.style();
            match anchor {
                Some(p) => {
                    _ = style.set_property("display", "block");
                    _ = style.set_property("left", &format!("{:.0}px", p.x + PANEL_OFFSET_X_PX));
                    _ = style.set_property("top", &format!("{:.0}px", p.y + PANEL_OFFSET_Y_PX));
                }
                None => {
                    _ = style.set_property("display", "none");
                }
            }
        }
    }

    fn rebuild(&mut self, document: &web::Document, panels: &[InfoPanel]) {
        self.container.set_inner_html("");
        self.cards.clear();
        for panel in panels {
            match build_card(document, panel) {
                Some(card) => {
                    _ = self.container.append_child(&card);
                    self.cards.push(card);
                }
                None => log::warn!("[panel] could not build card for ring {}", panel.ring),
            }
        }
        log::info!("[panel] open: {:?}", panels.iter().map(|p| p.ring).collect::<Vec<_>>());
    }
}

fn build_card(document: &web::Document, panel: &InfoPanel) -> Option<web::HtmlElement> {
    let card = document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    card.set_class_name("info-card");
    _ = card.set_attribute("data-ring", &panel.ring.to_string());
    let title = document.create_element("h3").ok()?;
    title.set_text_content(Some(&panel.title));
    let body = document.create_element("p").ok()?;
    body.set_text_content(Some(&panel.content));
    _ = card.append_child(&title);
    _ = card.append_child(&body);
    Some(card)
}
