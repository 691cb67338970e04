#![cfg(target_arch = "wasm32")]
use book_core::{resolve, texture_ids, SimulatedDirectory, ViewerConfig, ViewerSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod audio;
mod camera;
mod constants;
mod directory;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod viewer;

use viewer::Viewer;

type GpuSlot = Rc<RefCell<Option<render::GpuState>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("book-preview starting");
    Ok(())
}

// Field order is teardown order.
struct Mounted {
    frame_loop: frame::FrameLoop,
    _listeners: Vec<dom::Listener>,
    gpu: GpuSlot,
    _dom: dom::ViewerDom,
    _scroll: dom::ScrollLock,
}

/// A mounted book preview. Call `unmount()` when the host closes it.
#[wasm_bindgen]
pub struct BookPreview {
    viewer: Viewer,
    mounted: RefCell<Option<Mounted>>,
}

#[wasm_bindgen(js_name = mountBookPreview)]
pub fn mount_book_preview(on_close: js_sys::Function) -> Result<BookPreview, JsValue> {
    mount(on_close).map_err(|e| {
        log::error!("[viewer] mount error: {:#}", e);
        JsValue::from_str(&format!("{:#}", e))
    })
}

fn mount(on_close: js_sys::Function) -> anyhow::Result<BookPreview> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let scroll = dom::ScrollLock::acquire(&document)?;
    let view = dom::ViewerDom::build(&document)?;

    let config = ViewerConfig::default();
    let session = ViewerSession::mount(config.clone(), audio::HtmlSoundBank::preload(), rand::random());
    let viewer = Viewer::new(Rc::new(RefCell::new(session)), &document, &view, on_close);
    let listeners = events::wire(&viewer, &view)?;

    let gpu: GpuSlot = Rc::new(RefCell::new(None));
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer: viewer.clone(),
        canvas: view.canvas.clone(),
        gpu: gpu.clone(),
    }));
    let frame_loop = frame::start_loop(frame_ctx);

    spawn_local(init_renderer(viewer.clone(), view.canvas.clone(), gpu.clone()));
    spawn_local(load_catalog(viewer.clone(), gpu.clone(), config));

    Ok(BookPreview {
        viewer,
        mounted: RefCell::new(Some(Mounted {
            frame_loop,
            _listeners: listeners,
            gpu,
            _dom: view,
            _scroll: scroll,
        })),
    })
}

async fn init_renderer(viewer: Viewer, canvas: web_sys::HtmlCanvasElement, gpu: GpuSlot) {
    let state = frame::init_gpu(&canvas).await;
    if !viewer.is_live() || state.is_none() {
        return;
    }
    *gpu.borrow_mut() = state;
    if viewer.is_ready() {
        spawn_local(stream_pages(viewer, gpu));
    }
}

async fn load_catalog(viewer: Viewer, gpu: GpuSlot, config: ViewerConfig) {
    let dir = directory::DelayedDirectory::new(SimulatedDirectory::bundled(), config.discovery_latency_ms);
    let pages = resolve(&dir, config.fallback_page_count).await;
    if !viewer.is_live() {
        return;
    }
    viewer.session.borrow_mut().finish_loading(pages);
    viewer.sync_dom();
    if gpu.borrow().is_some() {
        spawn_local(stream_pages(viewer, gpu));
    }
}

// Runs once both the renderer and the catalog are ready.
async fn stream_pages(viewer: Viewer, gpu: GpuSlot) {
    let (ids, base) = {
        let session = viewer.session.borrow();
        (texture_ids(session.render_spreads()), session.config().texture_base_path)
    };
    match gpu.borrow_mut().as_mut() {
        Some(g) => g.set_book(&ids),
        None => return,
    }
    for id in ids {
        let Some(path) = id.texture_path(base) else {
            continue;
        };
        let loaded = render::load_image(&path).await;
        if !viewer.is_live() {
            return;
        }
        let uploaded = loaded.and_then(|img| match gpu.borrow_mut().as_mut() {
            Some(g) => g.upload_page(&id, &img),
            None => Ok(()),
        });
        if let Err(e) = uploaded {
            log::warn!("[gpu] {}: {:#}; drawing plain paper", id, e);
        }
    }
}

#[wasm_bindgen]
impl BookPreview {
    /// Tear the viewer down. Safe to call more than once.
    pub fn unmount(&self) {
        let Some(mounted) = self.mounted.borrow_mut().take() else {
            return;
        };
        self.viewer.session.borrow_mut().unmount();
        self.viewer.sync_dom();
        mounted.frame_loop.stop();
        mounted.gpu.borrow_mut().take();
        drop(mounted);
    }

    pub fn next(&self) {
        self.viewer.dispatch(book_core::NavAction::Next);
    }

    pub fn previous(&self) {
        self.viewer.dispatch(book_core::NavAction::Previous);
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, target: i32) {
        self.viewer.go_to(target as isize);
    }

    pub fn position(&self) -> u32 {
        self.viewer.session.borrow().position() as u32
    }
}

impl Drop for BookPreview {
    fn drop(&mut self) {
        self.unmount();
    }
}
