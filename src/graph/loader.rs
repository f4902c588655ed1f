//! Graph description format.
//!
//! A graph file is a JSON document with a vertex list and an edge list:
//!
//! ```json
//! {
//!   // cosmetic fields such as Name or Radius are ignored
//!   "Vertices": [ { "X": 10, "Y": 20, "Name": "A" }, { "X": 50, "Y": 20 } ],
//!   "Edges": [
//!     { "Vertex1": 0, "Vertex2": 1, "Weight": "", "IsDirected": false },
//!   ],
//! }
//! ```
//!
//! Comments and trailing commas are accepted and field names match
//! case-insensitively. An empty or absent weight means `1`. Undirected edges
//! are mirrored onto the reverse pair.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::matrix::Matrix;
use super::Point;
use crate::error::{ColonyError, ColonyResult};

/// Weight used when an edge gives none.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Top-level document.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphDescription {
    /// Vertex records in id order.
    #[serde(default)]
    pub vertices: Option<Vec<VertexRecord>>,
    /// Edge records.
    #[serde(default)]
    pub edges: Option<Vec<EdgeRecord>>,
}

/// One vertex. Only the coordinates matter to the optimizer.
#[derive(Debug, Clone, Deserialize)]
pub struct VertexRecord {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Display label.
    #[serde(default)]
    pub name: Option<String>,
}

/// Edge weight as written in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WeightField {
    /// `"weight": "2.5"` or `"weight": ""`.
    Text(String),
    /// `"weight": 2.5`.
    Number(f64),
}

/// One edge.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    /// Source vertex index.
    pub vertex1: i64,
    /// Target vertex index.
    pub vertex2: i64,
    /// Optional weight.
    #[serde(default)]
    pub weight: Option<WeightField>,
    /// Directed edges are not mirrored.
    #[serde(default, rename = "isdirected")]
    pub is_directed: bool,
}

/// Topology extracted from a description.
#[derive(Debug, Clone)]
pub struct ParsedGraph {
    /// Vertex coordinates, id order.
    pub vertices: Vec<Point>,
    /// `n × n` edge weights, `0` meaning no edge.
    pub edges: Matrix,
}

/// Parse description text into vertices and an edge matrix.
///
/// # Errors
///
/// - `MalformedGraph` if the text is not a readable document
/// - `MissingVertices` if there is no vertex list
/// - `EdgeOutOfRange` / `InvalidWeight` for bad edges
pub fn parse_description(text: &str) -> ColonyResult<ParsedGraph> {
    let raw: Value = json5::from_str(text).map_err(|e| ColonyError::malformed(e.to_string()))?;
    let description: GraphDescription = serde_json::from_value(lowercase_keys(raw))
        .map_err(|e| ColonyError::malformed(e.to_string()))?;

    let records = description.vertices.ok_or(ColonyError::MissingVertices)?;
    let vertices: Vec<Point> = records.iter().map(|v| Point::new(v.x, v.y)).collect();
    let n = vertices.len();

    let mut edges = Matrix::zeros(n);
    for (index, edge) in description.edges.unwrap_or_default().iter().enumerate() {
        let (a, b) = match (vertex_index(edge.vertex1, n), vertex_index(edge.vertex2, n)) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(ColonyError::EdgeOutOfRange {
                    edge: index,
                    vertex1: edge.vertex1,
                    vertex2: edge.vertex2,
                    vertex_count: n,
                })
            }
        };
        let weight = parse_weight(index, edge.weight.as_ref())?;
        edges[(a, b)] = weight;
        if !edge.is_directed {
            edges[(b, a)] = weight;
        }
    }

    Ok(ParsedGraph { vertices, edges })
}

fn vertex_index(raw: i64, n: usize) -> Option<usize> {
    usize::try_from(raw).ok().filter(|&v| v < n)
}

fn parse_weight(edge: usize, field: Option<&WeightField>) -> ColonyResult<f64> {
    let invalid = |weight: String| ColonyError::InvalidWeight { edge, weight };
    let weight = match field {
        None => return Ok(DEFAULT_WEIGHT),
        Some(WeightField::Text(text)) if text.trim().is_empty() => return Ok(DEFAULT_WEIGHT),
        Some(WeightField::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(text.clone()))?,
        Some(WeightField::Number(w)) => *w,
    };
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(invalid(weight.to_string()))
    }
}

/// Lowercase every object key, recursively.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
