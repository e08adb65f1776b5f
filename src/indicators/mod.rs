//! Indicator library. Every function is pure and reads only bars at or
//! before the latest one.

pub mod momentum;
pub mod trend;
pub mod structure;
pub mod volume;

pub use momentum::*;
pub use trend::*;
pub use structure::*;
pub use volume::*;
