use serde::{Deserialize, Serialize};

use super::affine::{get_affine_transform, transform_point, WarpError};

/// Tolerance on barycentric weights so that points on a shared edge are
/// claimed by both triangles despite rounding.
pub const BARYCENTRIC_EPS: f64 = 1e-9;

/// Integer pixel bounding box of a triangle, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// First column (`floor` of the minimum x).
    pub u0: i64,
    /// Last column (`ceil` of the maximum x).
    pub u1: i64,
    /// First row (`floor` of the minimum y).
    pub v0: i64,
    /// Last row (`ceil` of the maximum y).
    pub v1: i64,
}

impl BoundingBox {
    /// Compute the bounding box of the three vertices.
    pub fn from_triangle(tri: &[[f64; 2]; 3]) -> Self {
        let (mut u_min, mut u_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut v_min, mut v_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in tri {
            u_min = u_min.min(p[0]);
            u_max = u_max.max(p[0]);
            v_min = v_min.min(p[1]);
            v_max = v_max.max(p[1]);
        }

        Self {
            u0: u_min.floor() as i64,
            u1: u_max.ceil() as i64,
            v0: v_min.floor() as i64,
            v1: v_max.ceil() as i64,
        }
    }

    /// Width of the box measured between the integer bounds.
    ///
    /// Saturates at `i64::MAX` for boxes wider than the integer range.
    pub fn width(&self) -> i64 {
        self.u1.saturating_sub(self.u0)
    }

    /// Height of the box measured between the integer bounds.
    pub fn height(&self) -> i64 {
        self.v1.saturating_sub(self.v0)
    }
}

/// Computes the barycentric weights of `p` with respect to `tri`.
///
/// The weights sum to one and are all within `[0, 1]` exactly when `p` lies
/// inside the triangle, whatever the vertex winding.
///
/// # Errors
///
/// If the triangle is degenerate, [`WarpError::DegenerateTriangle`] is returned.
pub fn barycentric_weights(tri: &[[f64; 2]; 3], p: [f64; 2]) -> Result<[f64; 3], WarpError> {
    let m = barycentric_transform(tri)?;
    let (w1, w2) = transform_point(p[0], p[1], &m);
    Ok([1.0 - w1 - w2, w1, w2])
}

/// Affine map sending the triangle vertices to `(0, 0)`, `(1, 0)` and `(0, 1)`,
/// i.e. a point to its second and third barycentric weights.
pub(crate) fn barycentric_transform(tri: &[[f64; 2]; 3]) -> Result<[f64; 6], WarpError> {
    get_affine_transform(tri, &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]])
}

/// Signed edge function of `p` against the directed edge `a -> b`.
fn edge_function(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> f64 {
    (p[0] - a[0]) * (b[1] - a[1]) - (p[1] - a[1]) * (b[0] - a[0])
}

/// Point-in-triangle membership test used while scanning a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsideTest {
    /// Barycentric weights all in `[0, 1]`. Works for any winding.
    #[default]
    Barycentric,

    /// Signed edge functions of the three directed edges `(p0, p1)`, `(p1, p2)`,
    /// `(p2, p0)` all non-positive.
    ///
    /// Only accepts triangles wound clockwise in y-down texture coordinates;
    /// counter-clockwise triangles never contain any point.
    EdgeFunction,
}

impl InsideTest {
    /// Returns true if `p` lies inside `tri` or on its boundary.
    ///
    /// `bary` is the transform from [`barycentric_transform`] and is only used by
    /// [`InsideTest::Barycentric`]; it is passed in so it can be computed once
    /// per triangle.
    pub(crate) fn contains(&self, tri: &[[f64; 2]; 3], bary: &[f64; 6], p: [f64; 2]) -> bool {
        match self {
            InsideTest::Barycentric => {
                let (w1, w2) = transform_point(p[0], p[1], bary);
                let w0 = 1.0 - w1 - w2;
                w0 >= -BARYCENTRIC_EPS && w1 >= -BARYCENTRIC_EPS && w2 >= -BARYCENTRIC_EPS
            }
            InsideTest::EdgeFunction => {
                let [p0, p1, p2] = *tri;
                edge_function(p0, p1, p) <= 0.0
                    && edge_function(p1, p2, p) <= 0.0
                    && edge_function(p2, p0, p) <= 0.0
            }
        }
    }

    /// Returns true if `p` lies inside `tri` or on its boundary.
    ///
    /// # Errors
    ///
    /// If the triangle is degenerate, [`WarpError::DegenerateTriangle`] is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use uvmap_warp::warp::InsideTest;
    ///
    /// let cw = [[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]];
    /// let ccw = [[0.0, 0.0], [0.0, 4.0], [4.0, 0.0]];
    ///
    /// assert!(InsideTest::Barycentric.is_inside(&cw, [1.0, 1.0]).unwrap());
    /// assert!(InsideTest::Barycentric.is_inside(&ccw, [1.0, 1.0]).unwrap());
    ///
    /// assert!(InsideTest::EdgeFunction.is_inside(&cw, [1.0, 1.0]).unwrap());
    /// assert!(!InsideTest::EdgeFunction.is_inside(&ccw, [1.0, 1.0]).unwrap());
    /// ```
    pub fn is_inside(&self, tri: &[[f64; 2]; 3], p: [f64; 2]) -> Result<bool, WarpError> {
        let bary = barycentric_transform(tri)?;
        Ok(self.contains(tri, &bary, p))
    }
}
