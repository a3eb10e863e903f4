#![deny(missing_docs)]
//! Image types for the uvmap workspace.

/// image representation backed by a flat contiguous buffer.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
