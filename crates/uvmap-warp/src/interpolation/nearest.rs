use uvmap_image::Image;

/// Kernel for nearest neighbor interpolation
///
/// The coordinates are rounded to the nearest integer (halfway cases away from
/// zero) and clamped to the image bounds before the lookup.
///
/// # Arguments
///
/// * `image` - The input image container. Must not be empty.
/// * `x` - The x coordinate (column) of the pixel to sample.
/// * `y` - The y coordinate (row) of the pixel to sample.
///
/// # Returns
///
/// The channel values of the sampled pixel converted to `f64`.
///
/// # Example
///
/// ```
/// use uvmap_image::Image;
/// use uvmap_warp::interpolation::nearest_neighbor_pixel;
///
/// let image = Image::<u8, 3>::from_fn([4, 4].into(), |x, y| [x as u8, y as u8, 0]).unwrap();
///
/// assert_eq!(nearest_neighbor_pixel(&image, 1.4, 2.6), [1.0, 3.0, 0.0]);
/// assert_eq!(nearest_neighbor_pixel(&image, -3.0, 9.0), [0.0, 3.0, 0.0]);
/// ```
pub fn nearest_neighbor_pixel<T, const C: usize>(image: &Image<T, C>, x: f64, y: f64) -> [f64; C]
where
    T: Copy + Into<f64>,
{
    let (rows, cols) = (image.rows() as i64, image.cols() as i64);

    let iu = (x.round() as i64).clamp(0, cols - 1) as usize;
    let iv = (y.round() as i64).clamp(0, rows - 1) as usize;

    let base = (iv * image.cols() + iu) * C;

    let mut pixel = [0.0; C];
    pixel
        .iter_mut()
        .zip(&image.as_slice()[base..base + C])
        .for_each(|(dst, &src)| *dst = src.into());

    pixel
}

#[cfg(test)]
mod tests {
    use super::nearest_neighbor_pixel;
    use uvmap_image::{Image, ImageError};

    #[test]
    fn nearest_rounds_half_away_from_zero() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([3, 1].into(), vec![10, 20, 30])?;
        assert_eq!(nearest_neighbor_pixel(&image, 0.5, 0.0), [20.0]);
        assert_eq!(nearest_neighbor_pixel(&image, 0.49, 0.0), [10.0]);
        assert_eq!(nearest_neighbor_pixel(&image, 1.5, 0.4), [30.0]);
        Ok(())
    }

    #[test]
    fn nearest_clamps_to_border() -> Result<(), ImageError> {
        let image = Image::<u16, 3>::from_fn([2, 2].into(), |x, y| {
            [x as u16, y as u16, 1000]
        })?;
        assert_eq!(nearest_neighbor_pixel(&image, 100.0, -100.0), [1.0, 0.0, 1000.0]);
        assert_eq!(nearest_neighbor_pixel(&image, -0.6, 1.7), [0.0, 1.0, 1000.0]);
        Ok(())
    }
}
