//! Library side of the bstats CLI: logging setup, CSV profiling and table
//! rendering.

pub mod logging;
pub mod profile;
pub mod summary;
pub mod types;
