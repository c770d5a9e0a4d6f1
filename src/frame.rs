use crate::camera;
use crate::events;
use crate::input;
use crate::overlay::InfoPanelView;
use crate::render;
use crate::ui;
use artifact_core::{ArtifactScene, Cursor, OrbitCamera};
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Monotonic scene time shared by the frame loop and input handlers.
#[derive(Clone, Copy)]
pub struct SceneClock {
    origin: Instant,
}

impl SceneClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        Instant::now() - self.origin
    }
}

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<ArtifactScene>>,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub mouse: Rc<RefCell<input::MouseState>>,
    pub drag: Rc<RefCell<input::DragState>>,

    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub panels: Option<InfoPanelView>,

    pub gpu: Option<render::GpuState<'a>>,
    pub clock: SceneClock,
    pub last_cursor: Cursor,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = self.clock.now();

        // Re-pick every frame: rings move and only glowing rings are pickable.
        let hover = self.current_hover();
        let out = {
            let mut scene = self.scene.borrow_mut();
            scene.hover(hover);
            scene.frame(now)
        };
        if !out.fired.is_empty() {
            log::debug!("[frame] delays elapsed for rings {:?}", out.fired.as_slice());
        }

        if out.cursor != self.last_cursor {
            ui::apply_cursor(&self.canvas, out.cursor);
            self.last_cursor = out.cursor;
        }

        let orbit = self.orbit.borrow().clone();
        if let Some(view) = self.panels.as_mut() {
            let anchors: Vec<Option<Vec2>> = out
                .panels
                .iter()
                .map(|p| camera::world_to_css_px(&self.canvas, &orbit, p.anchor))
                .collect();
            view.update(&self.document, &out.panels, &anchors);
        }

        if let Some(g) = self.gpu.as_mut() {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let cam = camera::camera_for(&self.canvas, &orbit);
            if let Err(e) = g.render(&cam, &out) {
                match e {
                    wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => g.reconfigure(),
                    other => log::error!("render error: {:?}", other),
                }
            }
        }
    }

    fn current_hover(&self) -> Option<artifact_core::RingId> {
        let ms = *self.mouse.borrow();
        if !ms.inside || self.drag.borrow().dragged {
            return None;
        }
        let orbit = self.orbit.borrow();
        let scene = self.scene.borrow();
        events::pick_ring(&self.canvas, &orbit, &scene, Vec2::new(ms.x, ms.y))
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
