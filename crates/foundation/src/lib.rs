pub mod bounds;
pub mod ids;
pub mod math;
pub mod screen;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use ids::*;
pub use math::*;
pub use screen::*;
