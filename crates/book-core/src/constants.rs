use glam::Vec3;

// Shared viewer tuning constants used by the core and the web frontend.

// Asset identifiers (bit-exact; the catalog filter depends on them)
pub const PAGE_PREFIX: &str = "page";
pub const PAGE_EXTENSION: &str = ".jpg";
pub const FRONT_COVER_ID: &str = "book-cover";
pub const FRONT_COVER_ROUGHNESS_ID: &str = "book-cover-roughness";
pub const BACK_COVER_ID: &str = "book-back";
pub const BLANK_PAGE_ID: &str = "blank"; // plain paper side, never loaded

// Asset locations
pub const TEXTURE_BASE_PATH: &str = "/textures/";
pub const PAGE_FLIP_SOUNDS: [&str; 4] = [
    "/sounds/page-flip-1.mp3",
    "/sounds/page-flip-2.mp3",
    "/sounds/page-flip-3.mp3",
    "/sounds/page-flip-4.mp3",
];
pub const BOOK_OPEN_SOUND: &str = "/sounds/book-open.mp3";

// Catalog discovery
pub const FALLBACK_PAGE_COUNT: usize = 17;
pub const BUNDLED_PAGE_COUNT: u32 = 17; // page files shipped in the texture folder
pub const DISCOVERY_LATENCY_MS: i32 = 500;

// Page-turn timing
pub const TURN_DURATION_MS: f64 = 650.0;
pub const JUMP_EXTRA_MS_PER_LEAF: f64 = 90.0;
pub const TURN_DURATION_MAX_MS: f64 = 1600.0;
pub const JUMP_STAGGER: f32 = 0.12; // fraction of the turn between consecutive leaves

// Leaf geometry (world units)
pub const PAGE_WIDTH: f32 = 1.28;
pub const PAGE_HEIGHT: f32 = 1.71;
pub const PAGE_THICKNESS: f32 = 0.003;
pub const PAGE_SEGMENTS: u16 = 30;
pub const REST_CURL: f32 = 0.12; // bend a resting leaf keeps, radians over its width
pub const TURNED_ROTATION: f32 = -std::f32::consts::PI;

// Camera framing
pub const NARROW_VIEWPORT_MAX_PX: f64 = 800.0;
pub const CAMERA_EYE_WIDE: [f32; 3] = [-0.5, 1.0, 4.0];
pub const CAMERA_EYE_NARROW: [f32; 3] = [-0.5, 1.0, 9.0];
pub const CAMERA_FOVY_DEGREES: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Audio defaults
pub const DEFAULT_VOLUME: f32 = 0.5;
pub const VOLUME_STEP: f32 = 0.1;

#[inline]
pub fn camera_target_vec3() -> Vec3 {
    Vec3::ZERO
}
