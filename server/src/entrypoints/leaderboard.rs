use pixel_phantoms_server::{
    consts,
    context::{Context, LoadedScores},
};
use rocket::{serde::json::Json, State};
use shared::{github::GithubClient, ranking, top_n, Dashboard};
use tracing::{error, warn};

use super::types::{
    bad_request, unavailable, ApiError, ApiResult, DashboardResponse, LeaderboardResponse,
    PaginatedResponse, PodiumResponse,
};

fn github(context: &Context) -> Result<&GithubClient, ApiError> {
    context
        .github()
        .ok_or_else(|| unavailable(consts::GITHUB_NOT_CONFIGURED))
}

fn check_limit(limit: usize) -> Result<usize, ApiError> {
    if limit == 0 || limit > consts::MAX_LIMIT {
        return Err(bad_request(consts::INVALID_LIMIT));
    }
    Ok(limit)
}

async fn scores(context: &Context) -> Result<LoadedScores, ApiError> {
    match context.load_scores(github(context)?).await {
        Err(e) => {
            error!("Failed to load pull requests: {e}");
            Err(unavailable(consts::CONTRIBUTORS_UNAVAILABLE))
        }
        Ok(value) => Ok(value),
    }
}

#[utoipa::path(context_path = "/leaderboard", responses(
    (status = 200, description = "Get the top contributors", body = PodiumResponse),
    (status = 400, description = "Invalid limit", body = ErrorResponse),
    (status = 503, description = "Pull requests could not be loaded", body = ErrorResponse)
))]
#[get("/top?<limit>")]
pub async fn get_top(context: &State<Context>, limit: Option<usize>) -> ApiResult<PodiumResponse> {
    let limit = check_limit(limit.unwrap_or(context.env.leaderboard_size))?;
    let loaded = scores(context).await?;

    Ok(Json(podium(&loaded, limit)))
}

fn podium(loaded: &LoadedScores, limit: usize) -> PodiumResponse {
    PodiumResponse {
        records: top_n(&loaded.scores, limit)
            .into_iter()
            .map(Into::into)
            .collect(),
        partial: loaded.truncated.is_some(),
    }
}

#[utoipa::path(context_path = "/leaderboard", responses(
    (status = 200, description = "Get the full contributor ranking", body = PaginatedLeaderboardResponse),
    (status = 400, description = "Invalid page or limit", body = ErrorResponse),
    (status = 503, description = "Pull requests could not be loaded", body = ErrorResponse)
))]
#[get("/users?<page>&<limit>")]
pub async fn get_users(
    context: &State<Context>,
    page: Option<usize>,
    limit: Option<usize>,
) -> ApiResult<PaginatedResponse<LeaderboardResponse>> {
    let page = page.unwrap_or(1);
    if page == 0 {
        return Err(bad_request(consts::INVALID_PAGE));
    }
    let limit = check_limit(limit.unwrap_or(consts::DEFAULT_USERS_LIMIT))?;
    let loaded = scores(context).await?;
    if loaded.truncated.is_some() {
        warn!("{}", consts::PARTIAL_HISTORY_NOTICE);
    }

    let ranked = ranking(&loaded.scores);
    Ok(Json(
        shared::page(&ranked, page, limit)
            .map(LeaderboardResponse::from)
            .into(),
    ))
}

#[utoipa::path(context_path = "/leaderboard", responses(
    (status = 200, description = "Get contributor profiles and totals", body = DashboardResponse),
    (status = 503, description = "Contributors could not be loaded", body = ErrorResponse)
))]
#[get("/dashboard?<search>")]
pub async fn get_dashboard(
    context: &State<Context>,
    search: Option<String>,
) -> ApiResult<DashboardResponse> {
    let github = github(context)?;
    let owner = &context.env.repo_owner;
    let name = &context.env.repo_name;
    let (contributors, repo) = rocket::tokio::join!(
        github.contributors(owner, name),
        github.repo_metadata(owner, name)
    );

    let contributors = match contributors {
        Err(e) => {
            error!("Failed to load contributors: {e:#}");
            return Err(unavailable(consts::CONTRIBUTORS_UNAVAILABLE));
        }
        Ok(value) => value,
    };
    let repo = match repo {
        Err(e) => {
            warn!("Failed to load repository metadata: {e:#}");
            None
        }
        Ok(value) => Some(value.into()),
    };

    let dashboard = Dashboard::new(contributors).search(search.as_deref().unwrap_or_default());
    Ok(Json(DashboardResponse {
        kpis: dashboard.kpis.into(),
        profiles: dashboard.profiles.into_iter().map(Into::into).collect(),
        repo,
    }))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing leaderboard entrypoints", |rocket| async {
        rocket.mount(
            "/leaderboard",
            rocket::routes![get_top, get_users, get_dashboard],
        )
    })
}

#[cfg(test)]
mod tests {
    use shared::{github::PullHistory, PullRequestRecord, ScoringRules};

    use super::*;

    fn history(authors: &[&str]) -> PullHistory {
        let mut history = PullHistory::default();
        history.push_page(
            authors
                .iter()
                .map(|author| PullRequestRecord::new(*author, Some(chrono::Utc::now()), ["level 1"]))
                .collect(),
        );
        history
    }

    #[test]
    fn podium_flags_partial_history() {
        let mut history = history(&["alice", "bob", "alice", "carol", "dave"]);
        history.interrupt(2, "API rate limit exceeded");
        let loaded = LoadedScores::from_history(history, &ScoringRules::new("sayeeg-11")).unwrap();

        let response = serde_json::to_value(podium(&loaded, 3)).unwrap();

        assert_eq!(response["partial"], true);
        assert_eq!(response["records"].as_array().unwrap().len(), 3);
        assert_eq!(response["records"][0]["user"]["login"], "alice");
        assert_eq!(response["records"][0]["xp_display"], "400 XP");
        assert_eq!(response["records"][1]["place"], 2);
    }

    #[test]
    fn podium_from_complete_history() {
        let loaded =
            LoadedScores::from_history(history(&["alice"]), &ScoringRules::new("sayeeg-11"))
                .unwrap();

        let response = serde_json::to_value(podium(&loaded, 3)).unwrap();

        assert_eq!(response["partial"], false);
        assert_eq!(response["records"].as_array().unwrap().len(), 1);
    }
}
