//! Job bookkeeping and the per-frame synthesis loop.

pub mod registry;
pub mod synth;
