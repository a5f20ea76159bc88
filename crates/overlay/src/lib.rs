//! Popup overlays anchored to map markers.
//!
//! - `placer`: anchor-relative popup rectangles and connector lines.
//! - `direction`: the rotation policy for simultaneously open popups.
//! - `registry`: the ordered set of open popups that feeds the rotation.
//! - `content`: what a popup shows in detailed and minimized form.
//! - `session` / `controller`: the per-marker popup state machine.

pub mod content;
pub mod controller;
pub mod direction;
pub mod drawable;
pub mod placer;
pub mod registry;
pub mod session;

pub use content::*;
pub use controller::*;
pub use direction::*;
pub use drawable::*;
pub use placer::*;
pub use registry::*;
pub use session::*;
