pub mod geodesy;
pub mod mercator;

pub use geodesy::*;
pub use mercator::*;
