use crate::audio::HtmlSoundBank;
use crate::dom::{self, ViewerDom};
use crate::overlay;
use book_core::{NavAction, SessionPhase, ViewerEvent, ViewerSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

pub type SessionRef = Rc<RefCell<ViewerSession<HtmlSoundBank>>>;

/// Cheap-to-clone handle shared by listeners, the frame loop and async tasks.
#[derive(Clone)]
pub struct Viewer {
    pub session: SessionRef,
    document: web::Document,
    loading: web::HtmlElement,
    strip: web::HtmlElement,
    mute: web::HtmlElement,
    on_close: js_sys::Function,
}

impl Viewer {
    pub fn new(session: SessionRef, document: &web::Document, dom: &ViewerDom, on_close: js_sys::Function) -> Self {
        Self {
            session,
            document: document.clone(),
            loading: dom.loading.clone(),
            strip: dom.strip.clone(),
            mute: dom.mute.clone(),
            on_close,
        }
    }

    pub fn is_live(&self) -> bool {
        self.session.borrow().phase() != SessionPhase::Unmounted
    }

    pub fn is_ready(&self) -> bool {
        self.session.borrow().phase() == SessionPhase::Ready
    }

    pub fn dispatch(&self, action: NavAction) {
        match action {
            NavAction::Close => self.request_close(),
            NavAction::ToggleMute => {
                let muted = self.session.borrow_mut().toggle_mute();
                overlay::set_mute_label(&self.mute, muted);
            }
            other => {
                self.session.borrow_mut().apply(other);
            }
        }
        self.sync_dom();
    }

    pub fn go_to(&self, target: isize) {
        self.session.borrow_mut().on_navigate(target);
        self.sync_dom();
    }

    pub fn set_volume(&self, volume: f32) {
        self.session.borrow_mut().set_volume(volume);
    }

    /// Ask the host to close the viewer. Runs after the current handler so
    /// the host may unmount (and drop that handler) from the callback.
    pub fn request_close(&self) {
        let on_close = self.on_close.clone();
        dom::defer(move || {
            if let Err(e) = on_close.call0(&JsValue::NULL) {
                log::warn!("[viewer] onClose threw: {:?}", e);
            }
        });
    }

    /// Reflect queued session events in the DOM.
    pub fn sync_dom(&self) {
        let events = self.session.borrow_mut().drain_events();
        for ev in events {
            match ev {
                ViewerEvent::Ready { spread_count } => {
                    log::info!("[viewer] showing {} spreads", spread_count);
                    overlay::hide(&self.loading);
                    let entries = self.session.borrow().strip();
                    overlay::fill_strip(&self.document, &self.strip, &entries);
                    overlay::highlight_strip(&self.strip, 0);
                }
                ViewerEvent::TurnStarted(turn) => {
                    log::debug!("[viewer] turning {} -> {}", turn.from, turn.target);
                }
                ViewerEvent::PositionChanged { position } => {
                    overlay::highlight_strip(&self.strip, position);
                }
                ViewerEvent::Unmounted => {}
            }
        }
    }
}
