//! Rendering surface seam.
//!
//! The map engine never talks to a mapping SDK directly; it drives a
//! [`MapSurface`] and reacts to the [`SurfaceEvent`]s it queues.

pub mod events;
pub mod headless;
pub mod map_surface;

pub use events::*;
pub use headless::*;
pub use map_surface::*;
