//! Output Generation
//!
//! Population snapshots and end-of-run statistics.

pub mod snapshot;
pub mod stats;

pub use snapshot::*;
pub use stats::*;
