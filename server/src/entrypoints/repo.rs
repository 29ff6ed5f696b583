use pixel_phantoms_server::{consts, context::Context};
use rocket::{serde::json::Json, State};
use tracing::error;

use super::types::{unavailable, ApiResult, RepoResponse};

#[utoipa::path(context_path = "/repo", responses(
    (status = 200, description = "Get repository counters", body = RepoResponse),
    (status = 503, description = "Repository could not be loaded", body = ErrorResponse)
))]
#[get("/")]
pub async fn get_repo(context: &State<Context>) -> ApiResult<RepoResponse> {
    let github = context
        .github()
        .ok_or_else(|| unavailable(consts::GITHUB_NOT_CONFIGURED))?;
    let repo = match github
        .repo_metadata(&context.env.repo_owner, &context.env.repo_name)
        .await
    {
        Err(e) => {
            error!("Failed to load repository metadata: {e:#}");
            return Err(unavailable(consts::REPO_UNAVAILABLE));
        }
        Ok(value) => value,
    };

    Ok(Json(repo.into()))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing repo entrypoints", |rocket| async {
        rocket.mount("/repo", rocket::routes![get_repo])
    })
}
