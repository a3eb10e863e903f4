#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// utilities for sampling source images.
pub mod interpolation;

/// triangle topology shared between image and texture space.
pub mod mesh;

/// module containing parallization utilities.
pub mod parallel;

/// UV map generation.
pub mod uv_map;

/// affine transforms and triangle geometry.
pub mod warp;

pub use mesh::UvTopology;
pub use uv_map::{
    generate_uv_map, generate_uv_map_with, rasterize_uv_map, DegeneratePolicy, RasterStats,
    UvMapConfig, UvMapError,
};
pub use warp::InsideTest;
