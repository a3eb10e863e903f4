//! Geometric helpers for the piecewise-affine warp.
//!
//! - Affine transforms between triangles (closed-form solve, no general
//!   matrix inversion)
//! - Point-in-triangle tests and integer bounding boxes
//!
//! # Examples
//!
//! Mapping a texture-space triangle onto an image-space triangle:
//!
//! ```
//! use uvmap_warp::warp::{get_affine_transform, transform_point};
//!
//! let uv = [[0.0, 0.0], [8.0, 0.0], [0.0, 8.0]];
//! let img = [[10.0, 10.0], [26.0, 10.0], [10.0, 26.0]];
//!
//! let m = get_affine_transform(&uv, &img).unwrap();
//! assert_eq!(transform_point(4.0, 4.0, &m), (18.0, 18.0));
//! ```

mod affine;
mod triangle;

pub use affine::{get_affine_transform, transform_point, WarpError, DEGENERATE_EPS};
pub use triangle::{barycentric_weights, BoundingBox, InsideTest, BARYCENTRIC_EPS};

pub(crate) use triangle::barycentric_transform;
