//! Pixel sampling used when pulling source pixels into texture space.
//!
//! Only nearest neighbor sampling is provided: every value written to a UV map
//! is an exact copy of a source pixel.

mod nearest;

pub use nearest::nearest_neighbor_pixel;
