//! Value types shared by the tiling services

pub mod geometry;
pub mod hotkey_binding;
pub mod tile_action;

pub use geometry::*;
pub use hotkey_binding::*;
pub use tile_action::*;
