//! Perspective compositing of a prepared garment onto a camera frame.
//!
//! Overview
//! - [`PerspectiveCompositor::homography`] rejects degenerate quads and solves
//!   the exact four-point mapping garment canvas → frame.
//! - [`warp_perspective`] inverse-maps every frame pixel into the canvas with
//!   bilinear sampling and a transparent border.
//! - [`blend_over`] alpha-composites the warped layer onto a copy of the frame.
//!
//! A failure anywhere short-circuits to the untouched frame; see
//! [`PerspectiveCompositor::composite`].

pub mod blend;
pub mod params;
pub mod pipeline;
pub mod warp;

pub use blend::{blend_over, blend_pixel};
pub use params::CompositorParams;
pub use pipeline::{CompositeOutcome, CompositedFrame, PerspectiveCompositor};
pub use warp::warp_perspective;
