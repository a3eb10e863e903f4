use argh::FromArgs;
use std::path::PathBuf;

use uvmap::image::{Image, ImageSize};
use uvmap::io::{functional as F, mesh, png};
use uvmap::warp::parallel::ExecutionStrategy;
use uvmap::warp::{rasterize_uv_map, DegeneratePolicy, InsideTest, UvMapConfig};

#[derive(FromArgs)]
/// Unwrap an image into a UV map using its landmarks and a triangle topology
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to a JSON array with the normalized landmarks
    #[argh(option, short = 'l')]
    landmarks_path: PathBuf,

    /// path to a JSON file with the uv coordinates and the triangles
    #[argh(option, short = 't')]
    topology_path: PathBuf,

    /// path to the output PNG
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// width and height of the UV map
    #[argh(option, short = 's', default = "256")]
    size: usize,

    /// minimum triangle width as a fraction of the UV map size
    #[argh(option, default = "0.0")]
    min_tri_w: f64,

    /// minimum triangle height as a fraction of the UV map size
    #[argh(option, default = "0.0")]
    min_tri_h: f64,

    /// number of worker threads, serial if not set
    #[argh(option)]
    threads: Option<usize>,

    /// point-in-triangle test: barycentric or edge
    #[argh(option, default = "InsideTest::Barycentric", from_str_fn(parse_inside_test))]
    inside: InsideTest,

    /// fail on triangles with collinear uv coordinates instead of skipping them
    #[argh(switch)]
    strict: bool,
}

fn parse_inside_test(value: &str) -> Result<InsideTest, String> {
    match value {
        "barycentric" => Ok(InsideTest::Barycentric),
        "edge" => Ok(InsideTest::EdgeFunction),
        _ => Err(format!("expected `barycentric` or `edge`, got `{value}`")),
    }
}

/// Map the command line flags onto the rasterizer parameters.
fn uv_map_config(args: &Args) -> UvMapConfig {
    let strategy = match args.threads {
        Some(num_threads) => ExecutionStrategy::Fixed(num_threads),
        None => ExecutionStrategy::Serial,
    };
    let degenerate = if args.strict {
        DegeneratePolicy::Error
    } else {
        DegeneratePolicy::Skip
    };

    UvMapConfig::default()
        .with_uvmap_size(args.size)
        .with_min_triangle_size(args.min_tri_w, args.min_tri_h)
        .with_inside_test(args.inside)
        .with_degenerate_policy(degenerate)
        .with_strategy(strategy)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let config = uv_map_config(&args);

    // read the inputs
    let image = F::read_image_any_rgb8(&args.image_path)?;
    let landmarks = mesh::read_landmarks(&args.landmarks_path)?;
    let topology = mesh::read_topology(&args.topology_path)?;

    log::info!(
        "image {}, {} landmarks, {} triangles",
        image.size(),
        landmarks.len(),
        topology.num_triangles()
    );

    // draw the triangles into a black map
    let mut uvmap = Image::<f64, 3>::from_size_val(ImageSize::square(config.uvmap_size), 0.0)?;
    let stats = rasterize_uv_map(
        &image,
        &landmarks,
        &topology.triangles,
        &topology.uv_coords,
        &mut uvmap,
        &config,
    )?;

    log::info!(
        "{} triangles rasterized, {} culled, {} degenerate",
        stats.rasterized,
        stats.culled,
        stats.degenerate
    );

    // save as 8-bit png
    let rgb = F::uv_map_to_rgb8(&uvmap)?;
    png::write_image_png_rgb8(&args.output_path, &rgb)?;

    log::info!("wrote {}", args.output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 8] = [
        "-i", "face.jpg", "-l", "landmarks.json", "-t", "topology.json", "-o", "uvmap.png",
    ];

    fn parse(extra: &[&str]) -> Result<Args, argh::EarlyExit> {
        let args: Vec<&str> = REQUIRED.iter().chain(extra).copied().collect();
        Args::from_args(&["uvmap"], &args)
    }

    #[test]
    fn parse_inside_test_names() {
        assert_eq!(parse_inside_test("edge"), Ok(InsideTest::EdgeFunction));
        assert_eq!(
            parse_inside_test("barycentric"),
            Ok(InsideTest::Barycentric)
        );
        assert!(parse_inside_test("winding").is_err());
    }

    #[test]
    fn default_flags() -> Result<(), argh::EarlyExit> {
        let args = parse(&[])?;
        assert_eq!(args.image_path, PathBuf::from("face.jpg"));
        assert_eq!(uv_map_config(&args), UvMapConfig::default());
        Ok(())
    }

    #[test]
    fn flags_map_onto_config() -> Result<(), argh::EarlyExit> {
        let args = parse(&[
            "-s", "512", "--min-tri-w", "0.01", "--min-tri-h", "0.02", "--threads", "4",
            "--inside", "edge", "--strict",
        ])?;
        let config = uv_map_config(&args);

        assert_eq!(config.uvmap_size, 512);
        assert_eq!(config.min_tri_w, 0.01);
        assert_eq!(config.min_tri_h, 0.02);
        assert_eq!(config.inside_test, InsideTest::EdgeFunction);
        assert_eq!(config.degenerate, DegeneratePolicy::Error);
        assert_eq!(config.strategy, ExecutionStrategy::Fixed(4));
        Ok(())
    }

    #[test]
    fn unknown_inside_test_is_rejected() {
        assert!(parse(&["--inside", "winding"]).is_err());
    }
}
