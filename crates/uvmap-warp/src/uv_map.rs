use serde::{Deserialize, Serialize};
use uvmap_image::{Image, ImageError, ImageSize};

use crate::interpolation::nearest_neighbor_pixel;
use crate::parallel::{self, ExecutionStrategy, ParallelError};
use crate::warp::{
    barycentric_transform, get_affine_transform, transform_point, BoundingBox, InsideTest,
    WarpError,
};

/// An error type for UV map generation.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum UvMapError {
    /// The source image has no pixels.
    #[error("Source image is empty")]
    EmptyImage,

    /// The landmark and texture coordinate sets have different lengths.
    #[error("Got {0} landmarks but {1} texture coordinates")]
    ShapeMismatch(usize, usize),

    /// A triangle references a vertex that does not exist.
    #[error("Triangle {triangle} references vertex {index} but only {len} vertices exist")]
    IndexOutOfBounds {
        /// Position of the triangle in the triangle list.
        triangle: usize,
        /// The offending vertex index.
        index: usize,
        /// Number of vertices.
        len: usize,
    },

    /// A landmark or texture coordinate is NaN or infinite.
    #[error("Vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// The offending vertex index.
        index: usize,
    },

    /// A triangle has collinear texture coordinates.
    #[error("Triangle {0} is degenerate in texture space")]
    DegenerateTriangle(usize),

    /// A parameter is out of its valid range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

/// What to do with a triangle whose texture coordinates are collinear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Leave its footprint untouched and count it in [`RasterStats::degenerate`].
    #[default]
    Skip,
    /// Abort with [`UvMapError::DegenerateTriangle`] before any pixel is written.
    Error,
}

/// Parameters of the UV map rasterization.
///
/// # Example
///
/// ```
/// use uvmap_warp::{UvMapConfig, DegeneratePolicy};
/// use uvmap_warp::parallel::ExecutionStrategy;
///
/// let config = UvMapConfig::default()
///     .with_uvmap_size(512)
///     .with_min_triangle_size(0.01, 0.01)
///     .with_degenerate_policy(DegeneratePolicy::Error)
///     .with_strategy(ExecutionStrategy::AutoRows(64));
///
/// assert_eq!(config.uvmap_size, 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvMapConfig {
    /// Width and height of the square output.
    pub uvmap_size: usize,
    /// Minimum bounding box width, as a fraction of `uvmap_size`, below which a triangle is culled.
    pub min_tri_w: f64,
    /// Minimum bounding box height, as a fraction of `uvmap_size`, below which a triangle is culled.
    pub min_tri_h: f64,
    /// Point-in-triangle test.
    pub inside_test: InsideTest,
    /// Handling of triangles with collinear texture coordinates.
    pub degenerate: DegeneratePolicy,
    /// How the rasterization is scheduled.
    pub strategy: ExecutionStrategy,
}

impl Default for UvMapConfig {
    fn default() -> Self {
        Self {
            uvmap_size: 256,
            min_tri_w: 0.0,
            min_tri_h: 0.0,
            inside_test: InsideTest::default(),
            degenerate: DegeneratePolicy::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl UvMapConfig {
    /// Set the output size.
    pub fn with_uvmap_size(mut self, uvmap_size: usize) -> Self {
        self.uvmap_size = uvmap_size;
        self
    }

    /// Set the minimum triangle size, as fractions of the output size.
    pub fn with_min_triangle_size(mut self, min_tri_w: f64, min_tri_h: f64) -> Self {
        self.min_tri_w = min_tri_w;
        self.min_tri_h = min_tri_h;
        self
    }

    /// Set the point-in-triangle test.
    pub fn with_inside_test(mut self, inside_test: InsideTest) -> Self {
        self.inside_test = inside_test;
        self
    }

    /// Set the handling of degenerate triangles.
    pub fn with_degenerate_policy(mut self, degenerate: DegeneratePolicy) -> Self {
        self.degenerate = degenerate;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    fn validate(&self) -> Result<(), UvMapError> {
        if self.uvmap_size == 0 {
            return Err(UvMapError::InvalidInput(
                "uvmap_size must be > 0".to_string(),
            ));
        }
        for (name, value) in [("min_tri_w", self.min_tri_w), ("min_tri_h", self.min_tri_h)] {
            if !value.is_finite() || value < 0.0 {
                return Err(UvMapError::InvalidInput(format!(
                    "{name} must be a finite value >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Counters collected while rasterizing a UV map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterStats {
    /// Triangles that were scanned.
    pub rasterized: usize,
    /// Triangles skipped because their bounding box is below the minimum size.
    pub culled: usize,
    /// Triangles skipped because their texture coordinates are collinear.
    pub degenerate: usize,
    /// Pixel writes, counting overwrites.
    pub pixels_written: usize,
}

/// Per triangle state computed once before scanning.
struct TriangleWarp {
    uv: [[f64; 2]; 3],
    bbox: BoundingBox,
    uv_to_img: [f64; 6],
    uv_to_bary: [f64; 6],
}

/// Generate a UV map from an image, its landmarks and a triangle topology.
///
/// Every triangle is warped from texture space back to the image with its own
/// affine transform and the pixels inside it are filled with the nearest image
/// sample. Triangles are drawn in order, so where they overlap the later one wins.
///
/// # Arguments
///
/// * `src` - The source image with 3 channels.
/// * `landmarks` - Image-space vertices normalized to `[0, 1]` by the image size.
/// * `uvmap_size` - Width and height of the square output.
/// * `triangles` - Vertex index triples into `landmarks` and `uv_coords`.
/// * `uv_coords` - Texture-space vertices normalized to `[0, 1]` by `uvmap_size`.
/// * `min_tri_w` - Minimum triangle width as a fraction of `uvmap_size`.
/// * `min_tri_h` - Minimum triangle height as a fraction of `uvmap_size`.
///
/// # Returns
///
/// The UV map of shape (uvmap_size, uvmap_size, 3), zero where no triangle was drawn.
///
/// # Errors
///
/// The inputs are validated before any pixel is written, see [`UvMapError`].
///
/// # Example
///
/// ```
/// use uvmap_image::{Image, ImageSize};
/// use uvmap_warp::generate_uv_map;
///
/// let image = Image::<u8, 3>::from_size_val([16, 16].into(), 200).unwrap();
/// let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
///
/// let uvmap = generate_uv_map(&image, &square, 8, &[[0, 1, 2], [0, 2, 3]], &square, 0.0, 0.0)
///     .unwrap();
///
/// assert_eq!(uvmap.size(), ImageSize::square(8));
/// assert!(uvmap.as_slice().iter().all(|&v| v == 200.0));
/// ```
pub fn generate_uv_map<T>(
    src: &Image<T, 3>,
    landmarks: &[[f64; 2]],
    uvmap_size: usize,
    triangles: &[[usize; 3]],
    uv_coords: &[[f64; 2]],
    min_tri_w: f64,
    min_tri_h: f64,
) -> Result<Image<f64, 3>, UvMapError>
where
    T: Copy + Into<f64> + Sync,
{
    let config = UvMapConfig::default()
        .with_uvmap_size(uvmap_size)
        .with_min_triangle_size(min_tri_w, min_tri_h);

    generate_uv_map_with(src, landmarks, triangles, uv_coords, &config)
}

/// Generate a UV map with all the parameters taken from a [`UvMapConfig`].
///
/// See [`generate_uv_map`].
pub fn generate_uv_map_with<T>(
    src: &Image<T, 3>,
    landmarks: &[[f64; 2]],
    triangles: &[[usize; 3]],
    uv_coords: &[[f64; 2]],
    config: &UvMapConfig,
) -> Result<Image<f64, 3>, UvMapError>
where
    T: Copy + Into<f64> + Sync,
{
    config.validate()?;

    let mut dst = Image::from_size_val(ImageSize::square(config.uvmap_size), 0.0)?;
    rasterize_uv_map(src, landmarks, triangles, uv_coords, &mut dst, config)?;

    Ok(dst)
}

/// Rasterize the triangles into an existing UV map.
///
/// Pixels outside every drawn triangle keep their previous value. The output
/// must be square with side `config.uvmap_size`.
///
/// # Returns
///
/// The counters of the rasterization.
pub fn rasterize_uv_map<T>(
    src: &Image<T, 3>,
    landmarks: &[[f64; 2]],
    triangles: &[[usize; 3]],
    uv_coords: &[[f64; 2]],
    dst: &mut Image<f64, 3>,
    config: &UvMapConfig,
) -> Result<RasterStats, UvMapError>
where
    T: Copy + Into<f64> + Sync,
{
    config.validate()?;

    if dst.size() != ImageSize::square(config.uvmap_size) {
        return Err(UvMapError::InvalidInput(format!(
            "destination is {} but uvmap_size is {}",
            dst.size(),
            config.uvmap_size
        )));
    }

    validate_mesh(src, landmarks, triangles, uv_coords)?;

    let mut stats = RasterStats::default();
    let warps = prepare_triangles(src, landmarks, triangles, uv_coords, config, &mut stats)?;

    let cols = dst.cols();
    let written = parallel::par_iter_row_bands(
        dst.as_slice_mut(),
        cols * 3,
        config.strategy,
        |first_row, band| rasterize_band(src, &warps, band, first_row, cols, config.inside_test),
    )?;

    stats.pixels_written = written.iter().sum();

    log::debug!(
        "uv map {}x{}: {} triangles rasterized, {} culled, {} degenerate, {} pixels written",
        cols,
        cols,
        stats.rasterized,
        stats.culled,
        stats.degenerate,
        stats.pixels_written
    );

    Ok(stats)
}

fn validate_mesh<T>(
    src: &Image<T, 3>,
    landmarks: &[[f64; 2]],
    triangles: &[[usize; 3]],
    uv_coords: &[[f64; 2]],
) -> Result<(), UvMapError> {
    if src.is_empty() {
        return Err(UvMapError::EmptyImage);
    }

    if landmarks.len() != uv_coords.len() {
        return Err(UvMapError::ShapeMismatch(landmarks.len(), uv_coords.len()));
    }

    let len = landmarks.len();
    for (triangle, indices) in triangles.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(UvMapError::IndexOutOfBounds {
                triangle,
                index,
                len,
            });
        }
    }

    let finite = |p: &[f64; 2]| p[0].is_finite() && p[1].is_finite();
    if let Some(index) = landmarks
        .iter()
        .zip(uv_coords)
        .position(|(lm, uv)| !finite(lm) || !finite(uv))
    {
        return Err(UvMapError::NonFiniteCoordinate { index });
    }

    Ok(())
}

/// Denormalize, cull and solve the transforms of every triangle, keeping input order.
fn prepare_triangles<T>(
    src: &Image<T, 3>,
    landmarks: &[[f64; 2]],
    triangles: &[[usize; 3]],
    uv_coords: &[[f64; 2]],
    config: &UvMapConfig,
    stats: &mut RasterStats,
) -> Result<Vec<TriangleWarp>, UvMapError> {
    let (img_w, img_h) = (src.width() as f64, src.height() as f64);
    let size = config.uvmap_size as f64;
    let (min_w, min_h) = (config.min_tri_w * size, config.min_tri_h * size);

    let mut warps = Vec::with_capacity(triangles.len());

    for (ti, &[i0, i1, i2]) in triangles.iter().enumerate() {
        let img = [i0, i1, i2].map(|i| [landmarks[i][0] * img_w, landmarks[i][1] * img_h]);
        let uv = [i0, i1, i2].map(|i| [uv_coords[i][0] * size, uv_coords[i][1] * size]);

        let bbox = BoundingBox::from_triangle(&uv);
        if (bbox.width() as f64) < min_w || (bbox.height() as f64) < min_h {
            stats.culled += 1;
            continue;
        }

        let transforms = get_affine_transform(&uv, &img)
            .and_then(|uv_to_img| Ok((uv_to_img, barycentric_transform(&uv)?)));

        match transforms {
            Ok((uv_to_img, uv_to_bary)) => {
                stats.rasterized += 1;
                warps.push(TriangleWarp {
                    uv,
                    bbox,
                    uv_to_img,
                    uv_to_bary,
                });
            }
            Err(WarpError::DegenerateTriangle(det)) => match config.degenerate {
                DegeneratePolicy::Skip => {
                    log::warn!("skipping degenerate triangle {ti} (determinant {det})");
                    stats.degenerate += 1;
                }
                DegeneratePolicy::Error => return Err(UvMapError::DegenerateTriangle(ti)),
            },
        }
    }

    Ok(warps)
}

/// Draw every triangle, in order, restricted to the rows of one band.
///
/// Returns the number of pixels written.
fn rasterize_band<T>(
    src: &Image<T, 3>,
    warps: &[TriangleWarp],
    band: &mut [f64],
    first_row: usize,
    cols: usize,
    inside_test: InsideTest,
) -> usize
where
    T: Copy + Into<f64>,
{
    let band_rows = band.len() / (cols * 3);
    if band_rows == 0 {
        return 0;
    }
    let (row_lo, row_hi) = (first_row as i64, (first_row + band_rows - 1) as i64);
    let col_hi = cols as i64 - 1;

    let mut written = 0;
    for warp in warps {
        let (v0, v1) = (warp.bbox.v0.max(row_lo), warp.bbox.v1.min(row_hi));
        let (u0, u1) = (warp.bbox.u0.max(0), warp.bbox.u1.min(col_hi));

        for v in v0..=v1 {
            let row_base = (v as usize - first_row) * cols;
            for u in u0..=u1 {
                let p = [u as f64, v as f64];
                if !inside_test.contains(&warp.uv, &warp.uv_to_bary, p) {
                    continue;
                }

                let (x_img, y_img) = transform_point(p[0], p[1], &warp.uv_to_img);
                let base = (row_base + u as usize) * 3;
                band[base..base + 3].copy_from_slice(&nearest_neighbor_pixel(src, x_img, y_img));
                written += 1;
            }
        }
    }

    written
}
