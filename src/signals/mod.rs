//! Signal classification.

pub mod engine;
pub mod summary;

pub use engine::{
    classify, AuxData, Candidate, ClassifierParams, Screening, SignalEngine, MIN_CANDLES,
};
pub use summary::*;
