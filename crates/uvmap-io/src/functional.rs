use std::path::Path;

use uvmap_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an RGB8 image from the given file path.
///
/// The method tries to read from any image format supported by the image crate
/// and converts the pixels to 8-bit RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::open(file_path)?.into_rgb8();

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_raw())?)
}

/// Converts a floating point UV map to an 8-bit RGB image.
///
/// Values are rounded to the nearest integer and clamped to `[0, 255]`.
///
/// # Example
///
/// ```
/// use uvmap_image::Image;
/// use uvmap_io::functional::uv_map_to_rgb8;
///
/// let uvmap = Image::<f64, 3>::new([1, 1].into(), vec![-3.0, 127.6, 300.0]).unwrap();
/// let rgb = uv_map_to_rgb8(&uvmap).unwrap();
///
/// assert_eq!(rgb.as_slice(), &[0, 128, 255]);
/// ```
pub fn uv_map_to_rgb8(uvmap: &Image<f64, 3>) -> Result<Image<u8, 3>, IoError> {
    let data = uvmap
        .as_slice()
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect();

    Ok(Image::new(uvmap.size(), data)?)
}

#[cfg(test)]
mod tests {
    use super::{read_image_any_rgb8, uv_map_to_rgb8};
    use crate::error::IoError;
    use crate::png::write_image_png_rgb8;
    use uvmap_image::Image;

    #[test]
    fn read_any_missing_file() {
        let res = read_image_any_rgb8("does/not/exist.jpg");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_any_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let image = Image::<u8, 3>::from_fn([5, 3].into(), |x, y| {
            [x as u8 * 40, y as u8 * 80, 7]
        })?;
        write_image_png_rgb8(&file_path, &image)?;

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());
        Ok(())
    }

    #[test]
    fn uv_map_to_rgb8_keeps_size() -> Result<(), IoError> {
        let uvmap = Image::<f64, 3>::from_size_val([4, 4].into(), 12.4)?;
        let rgb = uv_map_to_rgb8(&uvmap)?;
        assert_eq!(rgb.size(), uvmap.size());
        assert!(rgb.as_slice().iter().all(|&v| v == 12));
        Ok(())
    }
}
