use crate::constants::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
    }
}

/// Viewport width in CSS pixels, used for camera framing.
#[inline]
pub fn viewport_width_css() -> f64 {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Run `f` on the next microtask, outside whatever handler is executing.
pub fn defer(f: impl FnOnce() + 'static) {
    wasm_bindgen_futures::spawn_local(async move { f() });
}

/// Event listener that removes itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Hides the host page scrollbars while the viewer is mounted.
pub struct ScrollLock {
    body: web::HtmlElement,
    previous: String,
}

impl ScrollLock {
    pub fn acquire(document: &web::Document) -> anyhow::Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no document body"))?;
        let style = body.style();
        let previous = style.get_property_value("overflow").map_err(js_err)?;
        style.set_property("overflow", "hidden").map_err(js_err)?;
        Ok(Self { body, previous })
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        let style = self.body.style();
        let restored = if self.previous.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", &self.previous)
        };
        if let Err(e) = restored {
            log::warn!("[dom] overflow not restored: {:?}", e);
        }
    }
}

/// The viewer's element tree. Removed from the document on drop.
pub struct ViewerDom {
    pub root: web::HtmlElement,
    pub canvas: web::HtmlCanvasElement,
    pub loading: web::HtmlElement,
    pub close: web::HtmlElement,
    pub prev: web::HtmlElement,
    pub next: web::HtmlElement,
    pub strip: web::HtmlElement,
    pub mute: web::HtmlElement,
    pub volume: web::HtmlInputElement,
}

fn create<T: JsCast>(document: &web::Document, tag: &str, id: &str, style: &str) -> anyhow::Result<T> {
    let el = document.create_element(tag).map_err(js_err)?;
    el.set_id(id);
    el.set_attribute("style", style).map_err(js_err)?;
    el.dyn_into::<T>()
        .map_err(|_| anyhow::anyhow!("<{}> has an unexpected type", tag))
}

fn button(document: &web::Document, id: &str, label: &str) -> anyhow::Result<web::HtmlElement> {
    let el: web::HtmlElement = create(document, "button", id, STRIP_BUTTON_STYLE)?;
    el.set_text_content(Some(label));
    Ok(el)
}

impl ViewerDom {
    pub fn build(document: &web::Document) -> anyhow::Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no document body"))?;

        let root: web::HtmlElement = create(document, "div", VIEWER_ROOT_ID, ROOT_STYLE)?;
        let canvas: web::HtmlCanvasElement = create(document, "canvas", CANVAS_ID, CANVAS_STYLE)?;
        let loading: web::HtmlElement = create(document, "div", LOADING_ID, LOADING_STYLE)?;
        loading.set_text_content(Some(LOADING_TEXT));
        let close: web::HtmlElement = create(document, "button", CLOSE_BUTTON_ID, CLOSE_STYLE)?;
        close.set_text_content(Some("Close"));

        let controls: web::HtmlElement = create(document, "div", "book-preview-controls", CONTROLS_STYLE)?;
        let prev = button(document, PREV_BUTTON_ID, "Previous")?;
        let strip: web::HtmlElement = create(document, "div", STRIP_ID, "display:flex;gap:4px;flex-wrap:wrap;")?;
        let next = button(document, NEXT_BUTTON_ID, "Next")?;
        let mute = button(document, MUTE_BUTTON_ID, MUTE_LABEL)?;
        let volume: web::HtmlInputElement = create(document, "input", VOLUME_SLIDER_ID, "")?;
        volume.set_type("range");
        volume.set_min("0");
        volume.set_max("1");
        volume.set_step(&book_core::constants::VOLUME_STEP.to_string());
        volume.set_value(&book_core::constants::DEFAULT_VOLUME.to_string());

        for child in [&prev, &strip, &next, &mute] {
            controls.append_child(child).map_err(js_err)?;
        }
        controls.append_child(&volume).map_err(js_err)?;
        for child in [&loading, &close, &controls] {
            root.append_child(child).map_err(js_err)?;
        }
        root.insert_before(&canvas, root.first_child().as_ref())
            .map_err(js_err)?;

        let dom = Self {
            root,
            canvas,
            loading,
            close,
            prev,
            next,
            strip,
            mute,
            volume,
        };
        body.append_child(&dom.root).map_err(js_err)?;
        Ok(dom)
    }
}

impl Drop for ViewerDom {
    fn drop(&mut self) {
        self.root.remove();
    }
}
