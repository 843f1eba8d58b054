use serde::{Deserialize, Serialize};

/// URL of a file served by the backend's static asset router.
pub fn static_asset_url(file_name: &str) -> String {
    format!("/static/{}", file_name)
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

fn api_url() -> String {
    // Same origin as the served page
    let window = web_sys::window().unwrap();
    let origin = window.location().origin().unwrap();
    format!("{}/graphql", origin)
}

async fn query<T: for<'de> Deserialize<'de>>(
    query_str: &str,
    variables: Option<serde_json::Value>,
) -> Result<T, String> {
    let req = GraphQLRequest {
        query: query_str.to_string(),
        variables,
    };

    let resp = reqwest::Client::new()
        .post(api_url())
        .json(&req)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let gql_resp: GraphQLResponse<T> = resp.json().await.map_err(|e| e.to_string())?;

    if let Some(errors) = gql_resp.errors {
        if !errors.is_empty() {
            return Err(errors[0].message.clone());
        }
    }

    gql_resp.data.ok_or_else(|| "No data returned".to_string())
}

// Types mirroring the GraphQL schema

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapImageData {
    pub display_name: String,
    pub file_name: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PositionData {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerData {
    pub id: String,
    pub position: PositionData,
    pub image: String,
    pub title: String,
    pub description: String,
    pub video_url: Option<String>,
}

// API functions

#[derive(Deserialize)]
pub struct MapImageResponse {
    #[serde(rename = "mapImage")]
    pub map_image: MapImageData,
}

pub async fn fetch_map_image() -> Result<MapImageData, String> {
    let resp: MapImageResponse = query(
        r#"query { mapImage { displayName fileName width height } }"#,
        None,
    )
    .await?;
    Ok(resp.map_image)
}

#[derive(Deserialize)]
pub struct MarkersResponse {
    pub markers: Vec<MarkerData>,
}

pub async fn fetch_markers() -> Result<Vec<MarkerData>, String> {
    let resp: MarkersResponse = query(
        r#"query { markers { id position { x y } image title description videoUrl } }"#,
        None,
    )
    .await?;
    Ok(resp.markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- GraphQL request serialization ---

    #[test]
    fn test_graphql_request_serializes_with_variables() {
        let req = GraphQLRequest {
            query: "query { markers { id } }".to_string(),
            variables: Some(serde_json::json!({"id": "poi-1"})),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["query"], "query { markers { id } }");
        assert_eq!(json["variables"]["id"], "poi-1");
    }

    #[test]
    fn test_graphql_request_omits_null_variables() {
        let req = GraphQLRequest {
            query: "query { mapImage { width } }".to_string(),
            variables: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("variables").is_none());
    }

    // --- Response deserialization ---

    #[test]
    fn test_map_image_response_deserializes() {
        let json = r#"{"mapImage":{"displayName":"Facility Map","fileName":"map.jpg","width":1200.0,"height":734.0}}"#;
        let resp: MapImageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.map_image.file_name, "map.jpg");
        assert_eq!(resp.map_image.width, 1200.0);
        assert_eq!(resp.map_image.height, 734.0);
    }

    #[test]
    fn test_markers_response_deserializes() {
        let json = r#"{"markers":[{"id":"poi-1","position":{"x":200.0,"y":400.0},"image":"markers/1.jpeg","title":"Station One","description":"First.","videoUrl":"https://cdn.example.com/1.mp4"}]}"#;
        let resp: MarkersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.markers.len(), 1);
        assert_eq!(resp.markers[0].id, "poi-1");
        assert_eq!(resp.markers[0].position.y, 400.0);
        assert_eq!(
            resp.markers[0].video_url.as_deref(),
            Some("https://cdn.example.com/1.mp4")
        );
    }

    #[test]
    fn test_marker_with_null_video_url() {
        let json = r#"{"markers":[{"id":"poi-3","position":{"x":350.0,"y":600.0},"image":"markers/3.jpeg","title":"Station Three","description":"Third.","videoUrl":null}]}"#;
        let resp: MarkersResponse = serde_json::from_str(json).unwrap();
        assert!(resp.markers[0].video_url.is_none());
    }

    #[test]
    fn test_graphql_error_response() {
        let json = r#"{"data":null,"errors":[{"message":"Internal error"}]}"#;
        let resp: GraphQLResponse<MarkersResponse> = serde_json::from_str(json).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.errors.unwrap()[0].message, "Internal error");
    }

    // --- URL builder ---

    #[test]
    fn test_static_asset_url() {
        assert_eq!(static_asset_url("map.jpg"), "/static/map.jpg");
        assert_eq!(static_asset_url("markers/1.jpeg"), "/static/markers/1.jpeg");
    }
}
