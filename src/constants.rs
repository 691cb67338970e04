// DOM, texture and lighting constants for the web frontend.
// Kept free of browser types so the host tests can include this file.

// Element ids (all scoped under the viewer root)
pub const VIEWER_ROOT_ID: &str = "book-preview";
pub const CANVAS_ID: &str = "book-preview-canvas";
pub const LOADING_ID: &str = "book-preview-loading";
pub const CLOSE_BUTTON_ID: &str = "book-preview-close";
pub const PREV_BUTTON_ID: &str = "book-preview-prev";
pub const NEXT_BUTTON_ID: &str = "book-preview-next";
pub const STRIP_ID: &str = "book-preview-strip";
pub const MUTE_BUTTON_ID: &str = "book-preview-mute";
pub const VOLUME_SLIDER_ID: &str = "book-preview-volume";

// Strip buttons carry their target position here
pub const STRIP_TARGET_ATTR: &str = "data-target";
pub const STRIP_ACTIVE_CLASS: &str = "active";

// Inline styles (the host page ships no stylesheet for the viewer)
pub const ROOT_STYLE: &str = "position:fixed;inset:0;z-index:1000;background:#0a0a0a;";
pub const CANVAS_STYLE: &str = "position:absolute;inset:0;width:100%;height:100%;display:block;";
pub const LOADING_STYLE: &str = "position:absolute;inset:0;display:flex;align-items:center;justify-content:center;color:#e8e2d4;font:16px system-ui;";
pub const CLOSE_STYLE: &str = "position:absolute;top:16px;right:16px;padding:6px 12px;font:14px system-ui;cursor:pointer;";
pub const CONTROLS_STYLE: &str = "position:absolute;left:0;right:0;bottom:16px;display:flex;gap:8px;justify-content:center;align-items:center;flex-wrap:wrap;font:13px system-ui;";
pub const STRIP_BUTTON_STYLE: &str = "padding:4px 8px;cursor:pointer;";
pub const STRIP_ACTIVE_STYLE: &str = "padding:4px 8px;cursor:pointer;font-weight:bold;outline:2px solid #e8e2d4;";
pub const HIDDEN_STYLE: &str = "display:none";
pub const LOADING_TEXT: &str = "Loading book...";
pub const MUTE_LABEL: &str = "Mute";
pub const UNMUTE_LABEL: &str = "Unmute";

// Page texture array
pub const TEXTURE_LAYER_WIDTH: u32 = 768;
pub const TEXTURE_LAYER_HEIGHT: u32 = 1024;

// Lighting
pub const LIGHT_DIR: [f32; 3] = [-0.4, 0.8, 1.0];
// #0a0a0a
pub const BACKGROUND_SRGB: u8 = 0x0a;

/// sRGB channel value to linear, as expected by an sRGB surface clear color.
#[inline]
pub fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Canvas backing-store size for a CSS box at a device pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let w = (css_width * dpr).max(0.0) as u32;
    let h = (css_height * dpr).max(0.0) as u32;
    (w.max(1), h.max(1))
}

/// Canvas pixel to normalized device coordinates.
#[inline]
pub fn pixel_to_ndc(sx: f32, sy: f32, width: f32, height: f32) -> (f32, f32) {
    let w = width.max(1.0);
    let h = height.max(1.0);
    ((2.0 * sx / w) - 1.0, 1.0 - (2.0 * sy / h))
}
