use serde::{Deserialize, Serialize};

/// A point or extent in plan space, in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned bounding box described by its min/max corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Extent per axis, as the absolute min/max difference. Corner order is
    /// not assumed.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: Some((self.max.x - self.min.x).abs()),
            height: Some((self.max.y - self.min.y).abs()),
            depth: Some((self.max.z - self.min.z).abs()),
        }
    }
}

/// Object extents in meters. Any axis may be unknown; plan parsers rarely
/// deliver all three.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self { width: Some(width), height: Some(height), depth: Some(depth) }
    }

    /// All three axes, or nothing.
    pub fn complete(&self) -> Option<(f64, f64, f64)> {
        match (self.width, self.height, self.depth) {
            (Some(width), Some(height), Some(depth)) => Some((width, height, depth)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.depth.is_none()
    }
}
