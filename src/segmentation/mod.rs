//! Contour-based symbol segmentation
//!
//! Splits an image of a handwritten expression into individual symbol tiles
//! ordered left to right, ready for downstream classification.

pub mod binarize;
pub mod pipeline;
pub mod regions;

pub use pipeline::Segmenter;
