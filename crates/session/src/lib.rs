//! One loaded map view: pins in, markers and popups out.

pub mod coordinator;
pub mod error;
pub mod loader;
pub mod view;

pub use coordinator::*;
pub use error::*;
pub use loader::*;
pub use view::*;
