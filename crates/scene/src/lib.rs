pub mod camera;
pub mod cluster;
pub mod pin;

pub use camera::*;
pub use cluster::*;
pub use pin::*;
