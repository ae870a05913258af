//! Utility functions for image loading.

pub mod image;

pub use image::load_image;
