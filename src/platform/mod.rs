//! Collaborator seams between the tiling core and the host desktop
//!
//! The tiling controller talks to the outside world only through these two
//! traits: [`WindowSystem`] to query and command the focused window, and
//! [`StatusSink`] to surface progress text. A simulated desktop backs the
//! `simulate` command and the tests.

pub mod status;
pub mod window_system;

pub use status::*;
pub use window_system::*;
