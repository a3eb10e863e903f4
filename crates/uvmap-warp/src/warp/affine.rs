/// Smallest absolute determinant accepted for a 2x2 affine system.
///
/// Expressed in squared texture pixels: twice the area of a triangle whose
/// vertices are collinear up to floating point noise.
pub const DEGENERATE_EPS: f64 = 1e-9;

/// An error type for the warp module.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum WarpError {
    /// The triangle vertices are collinear so no affine transform exists.
    #[error("Degenerate triangle: determinant {0} is too close to zero")]
    DegenerateTriangle(f64),
}

/// Applies a 2x3 affine transformation to a point.
///
/// The matrix is stored row-major: `[a, b, c, d, e, f]` maps `(x, y)` to
/// `(a * x + b * y + c, d * x + e * y + f)`.
pub fn transform_point(x: f64, y: f64, m: &[f64; 6]) -> (f64, f64) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Computes the affine transform mapping the `src` triangle onto the `dst` triangle.
///
/// This is the homogeneous product `dst · src⁻¹` where both triangles are
/// written as 3x3 matrices with the vertices as columns and a row of ones.
/// Since the last row of the product is always `[0, 0, 1]` the system reduces
/// to a 2x2 solve on the edge vectors anchored at the first vertex.
///
/// # Arguments
///
/// * `src` - The three source vertices.
/// * `dst` - The three destination vertices, in the same order.
///
/// # Returns
///
/// The row-major 2x3 matrix `m` with `transform_point(src[k], m) == dst[k]`.
///
/// # Errors
///
/// If the source vertices are collinear, [`WarpError::DegenerateTriangle`] is returned.
pub fn get_affine_transform(src: &[[f64; 2]; 3], dst: &[[f64; 2]; 3]) -> Result<[f64; 6], WarpError> {
    let [s0, s1, s2] = src;
    let [d0, d1, d2] = dst;

    // edge vectors anchored at the first vertex
    let (e1x, e1y) = (s1[0] - s0[0], s1[1] - s0[1]);
    let (e2x, e2y) = (s2[0] - s0[0], s2[1] - s0[1]);
    let (f1x, f1y) = (d1[0] - d0[0], d1[1] - d0[1]);
    let (f2x, f2y) = (d2[0] - d0[0], d2[1] - d0[1]);

    let determinant = e1x * e2y - e2x * e1y;
    if determinant.abs() <= DEGENERATE_EPS {
        return Err(WarpError::DegenerateTriangle(determinant));
    }
    let inv_determinant = 1.0 / determinant;

    let a = (f1x * e2y - f2x * e1y) * inv_determinant;
    let b = (f2x * e1x - f1x * e2x) * inv_determinant;
    let d = (f1y * e2y - f2y * e1y) * inv_determinant;
    let e = (f2y * e1x - f1y * e2x) * inv_determinant;

    let c = d0[0] - (a * s0[0] + b * s0[1]);
    let f = d0[1] - (d * s0[0] + e * s0[1]);

    Ok([a, b, c, d, e, f])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn affine_identity() -> Result<(), WarpError> {
        let tri = [[1.0, 2.0], [5.0, 2.0], [3.0, 7.0]];
        let m = get_affine_transform(&tri, &tri)?;
        for (got, want) in m.iter().zip([1.0, 0.0, 0.0, 0.0, 1.0, 0.0]) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn affine_maps_vertices() -> Result<(), WarpError> {
        let src = [[0.0, 0.0], [4.0, 1.0], [1.0, 5.0]];
        let dst = [[10.0, -3.0], [2.5, 7.0], [-1.0, 0.5]];
        let m = get_affine_transform(&src, &dst)?;

        for (s, d) in src.iter().zip(dst.iter()) {
            let (x, y) = transform_point(s[0], s[1], &m);
            assert_relative_eq!(x, d[0], epsilon = 1e-9);
            assert_relative_eq!(y, d[1], epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn affine_scale_and_translation() -> Result<(), WarpError> {
        let src = [[0.0, 0.0], [8.0, 0.0], [0.0, 8.0]];
        let dst = [[2.0, 1.0], [6.0, 1.0], [2.0, 3.0]];
        let m = get_affine_transform(&src, &dst)?;
        assert_relative_eq!(m[0], 0.5);
        assert_relative_eq!(m[1], 0.0);
        assert_relative_eq!(m[2], 2.0);
        assert_relative_eq!(m[3], 0.0);
        assert_relative_eq!(m[4], 0.25);
        assert_relative_eq!(m[5], 1.0);
        Ok(())
    }

    #[test]
    fn affine_collinear_source() {
        let src = [[0.0, 0.0], [1.0, 1.0], [3.0, 3.0]];
        let dst = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        assert!(matches!(
            get_affine_transform(&src, &dst),
            Err(WarpError::DegenerateTriangle(_))
        ));
    }

    #[test]
    fn affine_collinear_destination_is_valid() -> Result<(), WarpError> {
        // a flat image-space triangle is still a well defined mapping
        let src = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let dst = [[0.0, 0.0], [2.0, 2.0], [4.0, 4.0]];
        let m = get_affine_transform(&src, &dst)?;
        assert_eq!(transform_point(1.0, 1.0, &m), (6.0, 6.0));
        Ok(())
    }
}
