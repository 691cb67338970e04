use glam::Vec3;

/// Navigation requested by the viewer controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
    ToggleMute,
    Close,
}

/// One button of the navigation strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripEntry {
    pub target: usize,
    pub label: String,
}

/// Buttons for every position: the cover, each open spread, the back cover.
pub fn strip_entries(spread_count: usize) -> Vec<StripEntry> {
    let mut entries: Vec<StripEntry> = (0..spread_count.max(1))
        .map(|index| StripEntry {
            target: index,
            label: if index == 0 {
                "Cover".to_string()
            } else {
                format!("Page {index}")
            },
        })
        .collect();
    if spread_count > 0 {
        entries.push(StripEntry {
            target: spread_count,
            label: "Back Cover".to_string(),
        });
    }
    entries
}

/// Modifier keys held during a keydown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyModifiers {
    #[inline]
    pub fn any(self) -> bool {
        self.alt || self.ctrl || self.meta
    }
}

/// Map a key to a viewer action. Chords with Alt, Ctrl or Meta belong to
/// the browser and map to nothing.
#[inline]
pub fn nav_action_for_key(key: &str, modifiers: KeyModifiers) -> Option<NavAction> {
    if modifiers.any() {
        return None;
    }
    match key {
        "ArrowRight" | "PageDown" => Some(NavAction::Next),
        "ArrowLeft" | "PageUp" => Some(NavAction::Previous),
        "Home" => Some(NavAction::First),
        "End" => Some(NavAction::Last),
        "Escape" => Some(NavAction::Close),
        "m" | "M" => Some(NavAction::ToggleMute),
        _ => None,
    }
}

/// Which side of the spine a click ray lands on.
///
/// The book rests in the z = 0 plane with the spine on the y axis. Clicks
/// right of the spine turn forward, left of it turn back.
#[inline]
pub fn nav_action_for_ray(ray_origin: Vec3, ray_dir: Vec3) -> Option<NavAction> {
    if ray_dir.z.abs() < 1e-4 {
        return None;
    }
    let t = -ray_origin.z / ray_dir.z;
    if t < 0.0 {
        return None;
    }
    let hit = ray_origin + ray_dir * t;
    if hit.y.abs() > crate::constants::PAGE_HEIGHT * 0.5 {
        return None;
    }
    if hit.x >= 0.0 {
        (hit.x <= crate::constants::PAGE_WIDTH).then_some(NavAction::Next)
    } else {
        (hit.x >= -crate::constants::PAGE_WIDTH).then_some(NavAction::Previous)
    }
}
