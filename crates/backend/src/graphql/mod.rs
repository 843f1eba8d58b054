use std::sync::Arc;

use async_graphql::{Context, Object, SimpleObject, ID};
use waypoint_shared::models;

use crate::assets::Assets;

// GraphQL output types

#[derive(SimpleObject)]
pub struct GqlMapImage {
    pub display_name: String,
    pub file_name: String,
    pub width: f64,
    pub height: f64,
}

impl From<&models::MapImage> for GqlMapImage {
    fn from(m: &models::MapImage) -> Self {
        GqlMapImage {
            display_name: m.display_name.clone(),
            file_name: m.file_name.clone(),
            width: m.width,
            height: m.height,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(SimpleObject)]
pub struct GqlMarker {
    pub id: ID,
    pub position: GqlPosition,
    pub image: String,
    pub title: String,
    pub description: String,
    pub video_url: Option<String>,
}

impl From<&models::Marker> for GqlMarker {
    fn from(m: &models::Marker) -> Self {
        GqlMarker {
            id: ID(m.id.clone()),
            position: GqlPosition {
                x: m.position.x,
                y: m.position.y,
            },
            image: m.image.clone(),
            title: m.title.clone(),
            description: m.description.clone(),
            video_url: m.video_url.clone(),
        }
    }
}

// Query root

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Natural dimensions and file name of the map image.
    async fn map_image(&self, ctx: &Context<'_>) -> GqlMapImage {
        let assets = ctx.data::<Arc<Assets>>().unwrap();
        GqlMapImage::from(&assets.map)
    }

    /// The full marker registry, in declaration order.
    async fn markers(&self, ctx: &Context<'_>) -> Vec<GqlMarker> {
        let assets = ctx.data::<Arc<Assets>>().unwrap();
        assets.markers.iter().map(GqlMarker::from).collect()
    }

    async fn marker(&self, ctx: &Context<'_>, id: ID) -> Option<GqlMarker> {
        let assets = ctx.data::<Arc<Assets>>().unwrap();
        assets.find_marker(&id).map(GqlMarker::from)
    }
}

pub type Schema =
    async_graphql::Schema<QueryRoot, async_graphql::EmptyMutation, async_graphql::EmptySubscription>;

pub fn build_schema(assets: Arc<Assets>) -> Schema {
    async_graphql::Schema::build(
        QueryRoot,
        async_graphql::EmptyMutation,
        async_graphql::EmptySubscription,
    )
    .data(assets)
    .finish()
}
