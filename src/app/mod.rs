// Application layer: session state, user actions and how results are shown.

pub mod actions;
pub mod interactive;
#[cfg(feature = "cli")]
pub mod oneshot;
pub mod render;
pub mod session;
