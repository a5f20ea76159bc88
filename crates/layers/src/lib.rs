pub mod labels;
pub mod layer;
pub mod markers;

pub use labels::*;
pub use layer::*;
pub use markers::*;
