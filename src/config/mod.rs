//! JSON configuration for the demo binaries.
//!
//! Every section is optional except the input and output paths; missing
//! sections fall back to the library defaults.

pub mod live;
pub mod tryon;
