use std::path::Path;

use waypoint_shared::models::{MapImage, Marker};

/// Static viewer data loaded once at startup: the map image metadata
/// and the marker registry.
#[derive(Debug)]
pub struct Assets {
    pub map: MapImage,
    pub markers: Vec<Marker>,
}

impl Assets {
    pub fn load(assets_dir: &Path) -> Result<Self, String> {
        let map_path = assets_dir.join("map.json");
        let markers_path = assets_dir.join("markers.json");

        let map_data = std::fs::read_to_string(&map_path)
            .map_err(|e| format!("Failed to read {}: {}", map_path.display(), e))?;
        let markers_data = std::fs::read_to_string(&markers_path)
            .map_err(|e| format!("Failed to read {}: {}", markers_path.display(), e))?;

        let map: MapImage = serde_json::from_str(&map_data)
            .map_err(|e| format!("Failed to parse map.json: {}", e))?;
        let markers: Vec<Marker> = serde_json::from_str(&markers_data)
            .map_err(|e| format!("Failed to parse markers.json: {}", e))?;

        if map.width <= 0.0 || map.height <= 0.0 {
            return Err(format!(
                "map.json has non-positive dimensions: {}x{}",
                map.width, map.height
            ));
        }

        for marker in &markers {
            if !marker.in_bounds(map.width, map.height) {
                tracing::warn!(
                    id = %marker.id,
                    x = marker.position.x,
                    y = marker.position.y,
                    "Marker lies outside the map image bounds"
                );
            }
        }

        tracing::info!(markers = markers.len(), map = %map.file_name, "Loaded viewer assets");

        Ok(Assets { map, markers })
    }

    pub fn find_marker(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_assets(dir: &Path, map: &str, markers: &str) {
        std::fs::write(dir.join("map.json"), map).unwrap();
        std::fs::write(dir.join("markers.json"), markers).unwrap();
    }

    const VALID_MAP: &str = r#"{
        "displayName": "Facility Map",
        "fileName": "map",
        "width": 1200.0,
        "height": 734.0
    }"#;

    const VALID_MARKERS: &str = r#"[
        {
            "id": "poi-1",
            "position": { "x": 200.0, "y": 400.0 },
            "image": "markers/1.jpeg",
            "title": "Station One",
            "description": "First point of interest.",
            "videoUrl": "https://cdn.example.com/1.mp4"
        },
        {
            "id": "poi-2",
            "position": { "x": 500.0, "y": 300.0 },
            "image": "markers/2.jpeg",
            "title": "Station Two",
            "description": "Second point of interest."
        }
    ]"#;

    #[test]
    fn test_load_valid_assets() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path(), VALID_MAP, VALID_MARKERS);

        let assets = Assets::load(dir.path()).unwrap();
        assert_eq!(assets.map.width, 1200.0);
        assert_eq!(assets.markers.len(), 2);
        assert!(assets.markers[1].video_url.is_none());
    }

    #[test]
    fn test_find_marker() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path(), VALID_MAP, VALID_MARKERS);

        let assets = Assets::load(dir.path()).unwrap();
        assert_eq!(assets.find_marker("poi-2").unwrap().title, "Station Two");
        assert!(assets.find_marker("missing").is_none());
    }

    #[test]
    fn test_missing_files_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Assets::load(dir.path()).unwrap_err();
        assert!(err.contains("Failed to read"));
    }

    #[test]
    fn test_unparseable_markers_error() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path(), VALID_MAP, "not json");
        let err = Assets::load(dir.path()).unwrap_err();
        assert!(err.contains("Failed to parse markers.json"));
    }

    #[test]
    fn test_non_positive_map_dimensions_error() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(
            dir.path(),
            r#"{"displayName":"Bad","fileName":"map","width":0.0,"height":734.0}"#,
            "[]",
        );
        let err = Assets::load(dir.path()).unwrap_err();
        assert!(err.contains("non-positive"));
    }
}
