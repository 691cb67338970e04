use crate::camera;
use crate::dom::{self, Listener, ViewerDom};
use crate::overlay;
use crate::render;
use crate::viewer::Viewer;
use book_core::{nav_action_for_key, nav_action_for_ray, KeyModifiers, NavAction};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach every viewer listener. Dropping the result detaches them.
pub fn wire(viewer: &Viewer, dom: &ViewerDom) -> anyhow::Result<Vec<Listener>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    Ok(vec![
        wire_keydown(&window, viewer)?,
        wire_resize(&window, dom)?,
        wire_canvas_click(viewer, dom)?,
        wire_action(&dom.prev, viewer, NavAction::Previous)?,
        wire_action(&dom.next, viewer, NavAction::Next)?,
        wire_action(&dom.mute, viewer, NavAction::ToggleMute)?,
        wire_action(&dom.close, viewer, NavAction::Close)?,
        wire_strip(viewer, dom)?,
        wire_volume(viewer, dom)?,
    ])
}

fn wire_keydown(window: &web::Window, viewer: &Viewer) -> anyhow::Result<Listener> {
    let viewer = viewer.clone();
    Listener::new(window, "keydown", move |ev: web::Event| {
        let Some(kev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        let modifiers = KeyModifiers {
            alt: kev.alt_key(),
            ctrl: kev.ctrl_key(),
            meta: kev.meta_key(),
        };
        let Some(action) = nav_action_for_key(&kev.key(), modifiers) else {
            return;
        };
        // Form controls keep their own keys, apart from Escape.
        let in_input = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
            .is_some();
        if in_input && action != NavAction::Close {
            return;
        }
        ev.prevent_default();
        viewer.dispatch(action);
    })
}

fn wire_resize(window: &web::Window, dom: &ViewerDom) -> anyhow::Result<Listener> {
    let canvas = dom.canvas.clone();
    Listener::new(window, "resize", move |_ev: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
    })
}

fn wire_canvas_click(viewer: &Viewer, dom: &ViewerDom) -> anyhow::Result<Listener> {
    let viewer = viewer.clone();
    let canvas = dom.canvas.clone();
    Listener::new(&dom.canvas, "click", move |ev: web::Event| {
        let Some(mev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let (sx, sy) = camera::mouse_canvas_px(mev, &canvas);
        let (ro, rd) = render::screen_to_world_ray(&canvas, sx, sy, dom::viewport_width_css());
        if let Some(action) = nav_action_for_ray(ro, rd) {
            viewer.dispatch(action);
        }
    })
}

fn wire_action(el: &web::HtmlElement, viewer: &Viewer, action: NavAction) -> anyhow::Result<Listener> {
    let viewer = viewer.clone();
    Listener::new(el, "click", move |_ev: web::Event| viewer.dispatch(action))
}

// One listener on the strip container serves every button it will hold.
fn wire_strip(viewer: &Viewer, dom: &ViewerDom) -> anyhow::Result<Listener> {
    let viewer = viewer.clone();
    Listener::new(&dom.strip, "click", move |ev: web::Event| {
        if let Some(target) = overlay::strip_target(&ev) {
            viewer.dispatch(NavAction::GoTo(target));
        }
    })
}

fn wire_volume(viewer: &Viewer, dom: &ViewerDom) -> anyhow::Result<Listener> {
    let viewer = viewer.clone();
    let slider = dom.volume.clone();
    Listener::new(&dom.volume, "input", move |_ev: web::Event| {
        match slider.value().parse::<f32>() {
            Ok(v) => viewer.set_volume(v),
            Err(e) => log::warn!("[sound] bad volume {:?}: {}", slider.value(), e),
        }
    })
}
