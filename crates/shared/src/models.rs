use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A point of interest on the map image. Positions are in native
/// image pixel space; the render layer maps them through the current
/// viewport transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub position: Position,
    /// Image asset shown on the map and in the detail popup.
    pub image: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl Marker {
    /// Whether the marker sits inside the given image bounds.
    pub fn in_bounds(&self, image_width: f64, image_height: f64) -> bool {
        self.position.x >= 0.0
            && self.position.x <= image_width
            && self.position.y >= 0.0
            && self.position.y <= image_height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapImage {
    pub display_name: String,
    pub file_name: String,
    /// Natural pixel dimensions of the raster.
    pub width: f64,
    pub height: f64,
}
