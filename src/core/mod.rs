//! Scan orchestration

pub mod runtime;
pub mod scanner;

pub use runtime::*;
pub use scanner::*;
