//! Rasterized slide output: file naming, PNG encoding, sinks and the multi-slide sequence.

pub(crate) mod naming;
pub(crate) mod png;
pub(crate) mod sequence;
pub(crate) mod sink;
