use serde::{Deserialize, Serialize};

/// The fixed part of a textured mesh: texture coordinates and triangles.
///
/// The same topology is typically reused for every image while only the
/// landmarks change, so it is stored and loaded on its own.
///
/// # Example
///
/// ```
/// use uvmap_warp::UvTopology;
///
/// let topology = UvTopology::unit_square();
/// assert_eq!(topology.num_vertices(), 4);
/// assert_eq!(topology.num_triangles(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UvTopology {
    /// Normalized texture coordinates, one per landmark.
    pub uv_coords: Vec<[f64; 2]>,
    /// Vertex index triples, rasterized in this order.
    pub triangles: Vec<[usize; 3]>,
}

impl UvTopology {
    /// Create a topology from texture coordinates and triangles.
    pub fn new(uv_coords: Vec<[f64; 2]>, triangles: Vec<[usize; 3]>) -> Self {
        Self {
            uv_coords,
            triangles,
        }
    }

    /// Two triangles covering the whole texture, with corners ordered
    /// `(0, 0)`, `(1, 0)`, `(1, 1)`, `(0, 1)`.
    pub fn unit_square() -> Self {
        Self::new(
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    /// Number of texture coordinates, which must match the number of landmarks.
    pub fn num_vertices(&self) -> usize {
        self.uv_coords.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::UvTopology;

    #[test]
    fn topology_from_json() -> Result<(), serde_json::Error> {
        let json = r#"{
            "uv_coords": [[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]],
            "triangles": [[0, 1, 2]]
        }"#;
        let topology: UvTopology = serde_json::from_str(json)?;
        assert_eq!(topology.num_vertices(), 3);
        assert_eq!(topology.triangles, vec![[0, 1, 2]]);
        assert_eq!(topology.uv_coords[2], [0.5, 1.0]);
        Ok(())
    }

    #[test]
    fn topology_rejects_short_triangle() {
        let json = r#"{ "uv_coords": [], "triangles": [[0, 1]] }"#;
        assert!(serde_json::from_str::<UvTopology>(json).is_err());
    }
}
