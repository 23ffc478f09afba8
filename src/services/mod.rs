//! Tiling services: slice geometry, target resolution, hotkey dispatch

pub mod action_table;
pub mod geometry_calculator;
pub mod tile_resolver;
pub mod tiling_controller;

pub use action_table::*;
pub use geometry_calculator::*;
pub use tile_resolver::*;
pub use tiling_controller::*;
