use crate::constants::POWER_BUTTON_ID;
use crate::frame::SceneClock;
use crate::input::{action_for_key, KeyAction};
use crate::ui;
use artifact_core::ArtifactScene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Flip global activation and mirror it on the power button.
pub fn toggle_power(scene: &Rc<RefCell<ArtifactScene>>, clock: SceneClock) {
    let active = scene.borrow_mut().toggle(clock.now());
    log::info!("[power] {}", if active { "on" } else { "off" });
    if let Some(document) = crate::dom::window_document() {
        ui::sync_power_button(&document, POWER_BUTTON_ID, active);
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    scene: &Rc<RefCell<ArtifactScene>>,
    clock: SceneClock,
) {
    if ev.repeat() {
        return;
    }
    match action_for_key(&ev.key()) {
        Some(KeyAction::TogglePower) => {
            toggle_power(scene, clock);
            ev.prevent_default();
        }
        Some(KeyAction::ClosePanels) => {
            scene.borrow_mut().pointer_missed();
        }
        None => {}
    }
}

pub fn wire_global_keydown(scene: Rc<RefCell<ArtifactScene>>, clock: SceneClock) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &scene, clock);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
