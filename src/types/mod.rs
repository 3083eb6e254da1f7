//! Core types for Accrue.

pub mod delta;
pub mod metrics;
pub mod response;

pub use delta::*;
pub use metrics::*;
pub use response::*;
