//! Library side of the `tsgen` command line.

pub mod logging;
pub mod pipeline;
pub mod types;
