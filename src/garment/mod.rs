//! Garment landmark mapping.
//!
//! Overview
//! - [`CanvasPlacement`] fits the uploaded image to the canonical canvas
//!   height, preserving aspect ratio and centring horizontally.
//! - [`GarmentLandmarkMapper`] renders the canvas and selects the four
//!   configured landmarks, rescaled into canvas space, as the garment quad.
//! - [`key_black_background`] prepares pre-segmented garments whose background
//!   is black rather than transparent.
//!
//! Output is an immutable [`GarmentProfile`], shared by every frame until the
//! next upload replaces it.

pub mod keying;
pub mod mapper;
pub mod params;
pub mod placement;

pub use keying::key_black_background;
pub use mapper::{GarmentLandmarkMapper, GarmentProfile, GarmentSummary};
pub use params::{GarmentParams, GarmentSource};
pub use placement::CanvasPlacement;
