use rocket::fairing::AdHoc;
use utoipa::OpenApi;

pub mod events;
pub mod leaderboard;
pub mod repo;
pub mod roadmap;
pub mod types;

use types::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        events::get_events,
        events::get_next_event,
        events::get_countdown,
        events::post_proposal,
        leaderboard::get_top,
        leaderboard::get_users,
        leaderboard::get_dashboard,
        repo::get_repo,
        roadmap::get_tracks,
        roadmap::get_track,
    ),
    components(schemas(
        ErrorResponse,
        GithubMeta,
        EventResponse,
        EventsResponse,
        PaginatedEventResponse,
        CountdownResponse,
        NextEventResponse,
        ProposalRequest,
        ProposalResponse,
        LeaderboardResponse,
        PaginatedLeaderboardResponse,
        PodiumResponse,
        ProfileResponse,
        KpiResponse,
        DashboardResponse,
        RepoResponse,
        ModuleResponse,
        PhaseNodeResponse,
        RoadmapResponse,
    ))
)]
pub struct ApiDoc;

pub fn stage() -> AdHoc {
    AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket
            .attach(events::stage())
            .attach(leaderboard::stage())
            .attach(repo::stage())
            .attach(roadmap::stage())
    })
}
