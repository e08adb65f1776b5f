//! Volume indicators

pub mod anomaly;

pub use anomaly::*;
