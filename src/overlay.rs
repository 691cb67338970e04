use crate::constants::*;
use book_core::StripEntry;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn hide(el: &web::HtmlElement) {
    _ = el.set_attribute("style", HIDDEN_STYLE);
}

/// Replace the navigation strip with one button per position.
pub fn fill_strip(document: &web::Document, strip: &web::HtmlElement, entries: &[StripEntry]) {
    strip.set_text_content(None);
    for entry in entries {
        let Ok(el) = document.create_element("button") else {
            log::warn!("[dom] strip button not created");
            return;
        };
        _ = el.set_attribute(STRIP_TARGET_ATTR, &entry.target.to_string());
        _ = el.set_attribute("style", STRIP_BUTTON_STYLE);
        el.set_text_content(Some(&entry.label));
        _ = strip.append_child(&el);
    }
}

/// Mark the strip button for `position` as the current one.
pub fn highlight_strip(strip: &web::HtmlElement, position: usize) {
    let buttons = strip.children();
    for i in 0..buttons.length() {
        let Some(el) = buttons.item(i) else { continue };
        let active = el
            .get_attribute(STRIP_TARGET_ATTR)
            .and_then(|t| t.parse::<usize>().ok())
            == Some(position);
        let cl = el.class_list();
        if active {
            _ = cl.add_1(STRIP_ACTIVE_CLASS);
            _ = el.set_attribute("style", STRIP_ACTIVE_STYLE);
        } else {
            _ = cl.remove_1(STRIP_ACTIVE_CLASS);
            _ = el.set_attribute("style", STRIP_BUTTON_STYLE);
        }
    }
}

/// Target position of a clicked strip button, if the click hit one.
pub fn strip_target(ev: &web::Event) -> Option<usize> {
    let el = ev.target()?.dyn_into::<web::Element>().ok()?;
    el.get_attribute(STRIP_TARGET_ATTR)?.parse().ok()
}

#[inline]
pub fn set_mute_label(button: &web::HtmlElement, muted: bool) {
    button.set_text_content(Some(if muted { UNMUTE_LABEL } else { MUTE_LABEL }));
}
