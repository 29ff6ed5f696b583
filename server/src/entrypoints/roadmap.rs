use pixel_phantoms_server::{consts, context::Context};
use rocket::{serde::json::Json, State};
use tracing::error;

use super::types::{not_found, unavailable, ApiResult, RoadmapResponse};

#[utoipa::path(context_path = "/roadmap", responses(
    (status = 200, description = "Get the names of the roadmap tracks", body = Vec<String>),
    (status = 503, description = "Roadmap file could not be read", body = ErrorResponse)
))]
#[get("/")]
pub async fn get_tracks(context: &State<Context>) -> ApiResult<Vec<String>> {
    let roadmaps = match context.load_roadmaps().await {
        Err(e) => {
            error!("Failed to load roadmaps: {e:#}");
            return Err(unavailable(consts::ROADMAP_UNAVAILABLE));
        }
        Ok(value) => value,
    };

    Ok(Json(
        roadmaps
            .track_names()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    ))
}

#[utoipa::path(context_path = "/roadmap", responses(
    (status = 200, description = "Get the phases of a roadmap track", body = RoadmapResponse),
    (status = 404, description = "Unknown track", body = ErrorResponse),
    (status = 503, description = "Roadmap file could not be read", body = ErrorResponse)
))]
#[get("/<track>")]
pub async fn get_track(context: &State<Context>, track: &str) -> ApiResult<RoadmapResponse> {
    let roadmaps = match context.load_roadmaps().await {
        Err(e) => {
            error!("Failed to load roadmaps: {e:#}");
            return Err(unavailable(consts::ROADMAP_UNAVAILABLE));
        }
        Ok(value) => value,
    };
    let Some(roadmap) = roadmaps.track(track) else {
        return Err(not_found(format!("Unknown roadmap track: {track}")));
    };

    Ok(Json(RoadmapResponse {
        track: track.to_string(),
        nodes: roadmap.nodes().into_iter().map(Into::into).collect(),
    }))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing roadmap entrypoints", |rocket| async {
        rocket.mount("/roadmap", rocket::routes![get_tracks, get_track])
    })
}
