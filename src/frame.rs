use crate::dom;
use crate::render;
use crate::viewer::Viewer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub viewer: Viewer,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Rc<RefCell<Option<render::GpuState>>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now_ms = instant::now();
        dom::sync_canvas_backing_size(&self.canvas);
        let w = self.canvas.width();
        let h = self.canvas.height();
        let aspect = w as f32 / h.max(1) as f32;

        let tick = self
            .viewer
            .session
            .borrow_mut()
            .tick(now_ms, dom::viewport_width_css(), aspect);
        // Position changes from a finished turn update the strip.
        self.viewer.sync_dom();

        let Some(frame) = tick else {
            return;
        };
        if let Some(g) = self.gpu.borrow_mut().as_mut() {
            g.resize_if_needed(w, h);
            let session = self.viewer.session.borrow();
            if let Err(e) = g.render(&frame, session.render_spreads()) {
                log::error!("[gpu] render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    dom::sync_canvas_backing_size(canvas);
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Handle to a running requestAnimationFrame loop.
///
/// `stop` cancels the pending frame and drops the frame closure.
pub struct FrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, handle: &Rc<Cell<Option<i32>>>) {
    let Some(w) = web::window() else { return };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame error: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let handle_clone = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        handle_clone.set(None);
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &handle_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &handle);
    FrameLoop { handle, tick }
}

impl FrameLoop {
    pub fn stop(&self) {
        if let (Some(id), Some(w)) = (self.handle.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself.
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
