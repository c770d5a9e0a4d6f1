use crate::camera;
use crate::constants::CLICK_SLOP_PX;
use crate::input;
use artifact_core::{ArtifactScene, OrbitCamera, RingId};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<ArtifactScene>>,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub mouse_state: Rc<RefCell<input::MouseState>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
}

/// Nearest glowing ring under canvas pixel `px`.
pub fn pick_ring(
    canvas: &web::HtmlCanvasElement,
    orbit: &OrbitCamera,
    scene: &ArtifactScene,
    px: Vec2,
) -> Option<RingId> {
    let (ro, rd) = camera::screen_to_world_ray(canvas, px.x, px.y, orbit);
    input::nearest_hit(scene.pick_discs().filter_map(|d| {
        input::ray_disc(ro, rd, d.center, d.normal, d.radius).map(|t| (d.id, t))
    }))
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let px = input::pointer_canvas_px(&ev, &w.canvas);
        let css = input::pointer_css_px(&ev, &w.canvas);
        {
            let mut ms = w.mouse_state.borrow_mut();
            ms.x = px.x;
            ms.y = px.y;
            ms.inside = true;
        }

        let mut ds = w.drag_state.borrow_mut();
        if !ds.active {
            return;
        }
        let delta = ds.update(css, CLICK_SLOP_PX);
        if ds.dragged {
            let height = w.canvas.get_bounding_client_rect().height() as f32;
            w.orbit.borrow_mut().rotate(delta, height);
        }
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.mouse_state.borrow_mut().inside = false;
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let css = input::pointer_css_px(&ev, &w.canvas);
        w.drag_state.borrow_mut().begin(css);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let css = input::pointer_css_px(&ev, &w.canvas);
        let was_click = w.drag_state.borrow_mut().end(css, CLICK_SLOP_PX);
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        if !was_click {
            return;
        }
        let px = input::pointer_canvas_px(&ev, &w.canvas);
        let target = {
            let orbit = w.orbit.borrow();
            let scene = w.scene.borrow();
            pick_ring(&w.canvas, &orbit, &scene, px)
        };
        w.scene.borrow_mut().click(target);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}
