pub mod frame;
pub mod journal;
pub mod metrics;

pub use frame::*;
pub use journal::*;
pub use metrics::*;
