#![cfg(target_arch = "wasm32")]
use artifact_core::{ArtifactScene, Cursor, OrbitCamera, SceneConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod render;
mod ui;

use constants::{CANVAS_ID, INFO_PANEL_ID, LOADING_TEXT, MESH_URL, POWER_BUTTON_ID};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_power_button(
    document: &web::Document,
    scene: &Rc<RefCell<ArtifactScene>>,
    clock: frame::SceneClock,
) {
    ui::sync_power_button(document, POWER_BUTTON_ID, scene.borrow().is_active());
    let scene = scene.clone();
    dom::add_click_listener(document, POWER_BUTTON_ID, move || {
        events::keyboard::toggle_power(&scene, clock);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("artifact-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let clock = frame::SceneClock::start();
    let scene = Rc::new(RefCell::new(ArtifactScene::new(SceneConfig::default())));
    let orbit = Rc::new(RefCell::new(OrbitCamera::default()));
    let mouse_state = Rc::new(RefCell::new(input::MouseState::default()));
    let drag_state = Rc::new(RefCell::new(input::DragState::default()));

    wire_power_button(&document, &scene, clock);
    events::wire_global_keydown(scene.clone(), clock);
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        orbit: orbit.clone(),
        mouse_state: mouse_state.clone(),
        drag_state: drag_state.clone(),
    });

    // Mesh fetch gates the first frame; the loading overlay covers the wait.
    overlay::show_loading(&document, LOADING_TEXT);
    let mesh = loader::load_mesh(MESH_URL).await;
    let scale = scene.borrow_mut().fit_model(mesh.as_ref());
    overlay::hide_loading(&document);

    let mut gpu = frame::init_gpu(&canvas).await;
    if let (Some(g), Some(m)) = (gpu.as_mut(), mesh.as_ref()) {
        g.set_mesh(m, scale);
    }

    let panels = dom::html_element(&document, INFO_PANEL_ID).map(overlay::InfoPanelView::new);
    if panels.is_none() {
        log::warn!("[dom] missing #{INFO_PANEL_ID}; info panels disabled");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        orbit,
        mouse: mouse_state,
        drag: drag_state,
        canvas,
        document,
        panels,
        gpu,
        clock,
        last_cursor: Cursor::Default,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
