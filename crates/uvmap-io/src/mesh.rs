use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use uvmap_warp::UvTopology;

use crate::error::IoError;

fn open_json(file_path: &Path) -> Result<BufReader<File>, IoError> {
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }
    if file_path.extension().map_or(true, |ext| ext != "json") {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }
    Ok(BufReader::new(File::open(file_path)?))
}

/// Reads a mesh topology from a JSON file.
///
/// The file holds an object with the normalized texture coordinates and the
/// triangles:
///
/// ```json
/// { "uv_coords": [[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]], "triangles": [[0, 1, 2]] }
/// ```
pub fn read_topology(file_path: impl AsRef<Path>) -> Result<UvTopology, IoError> {
    let reader = open_json(file_path.as_ref())?;
    Ok(serde_json::from_reader(reader)?)
}

/// Writes a mesh topology to a JSON file.
pub fn write_topology(file_path: impl AsRef<Path>, topology: &UvTopology) -> Result<(), IoError> {
    let mut writer = BufWriter::new(File::create(file_path)?);
    serde_json::to_writer(&mut writer, topology)?;
    writer.flush()?;
    Ok(())
}

/// Reads normalized landmarks from a JSON file holding an array of `[x, y]` pairs.
pub fn read_landmarks(file_path: impl AsRef<Path>) -> Result<Vec<[f64; 2]>, IoError> {
    let reader = open_json(file_path.as_ref())?;
    Ok(serde_json::from_reader(reader)?)
}

/// Writes normalized landmarks to a JSON file.
pub fn write_landmarks(file_path: impl AsRef<Path>, landmarks: &[[f64; 2]]) -> Result<(), IoError> {
    let mut writer = BufWriter::new(File::create(file_path)?);
    serde_json::to_writer(&mut writer, landmarks)?;
    writer.flush()?;
    Ok(())
}
