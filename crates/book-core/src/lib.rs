pub mod camera;
pub mod catalog;
pub mod constants;
pub mod controls;
pub mod error;
pub mod scene;
pub mod sound;
pub mod spreads;
pub mod turn;
pub mod viewer;
pub static BOOK_WGSL: &str = include_str!("../shaders/book.wgsl");

pub use camera::*;
pub use catalog::*;
pub use controls::*;
pub use error::*;
pub use scene::*;
pub use sound::*;
pub use spreads::*;
pub use turn::*;
pub use viewer::*;
