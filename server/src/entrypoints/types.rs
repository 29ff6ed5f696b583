use rocket::{http::Status, response::status, serde::json::Json};
use serde::{Deserialize, Serialize};
use shared::{
    Countdown, ContributorProfile, DashboardKpis, EventRecord, PageView, PhaseNode,
    RankedEntry, RepoMetadata, RoadmapModule, SubmissionReceipt,
};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = status::Custom<Json<ErrorResponse>>;
pub type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn api_error(status: Status, message: impl Into<String>) -> ApiError {
    status::Custom(
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn unavailable(message: impl Into<String>) -> ApiError {
    api_error(Status::ServiceUnavailable, message)
}

pub fn not_found(message: impl Into<String>) -> ApiError {
    api_error(Status::NotFound, message)
}

pub fn bad_request(message: impl Into<String>) -> ApiError {
    api_error(Status::BadRequest, message)
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, ToSchema)]
#[aliases(PaginatedEventResponse = PaginatedResponse<EventResponse>, PaginatedLeaderboardResponse = PaginatedResponse<LeaderboardResponse>)]
pub struct PaginatedResponse<T: Serialize> {
    pub records: Vec<T>,
    pub page: u64,
    pub total_pages: u64,
    pub limit: u64,
    pub total_records: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T: Serialize> From<PageView<T>> for PaginatedResponse<T> {
    fn from(view: PageView<T>) -> Self {
        Self {
            has_previous: view.has_previous(),
            has_next: view.has_next(),
            page: view.page_number as u64,
            total_pages: view.total_pages as u64,
            limit: view.page_size as u64,
            total_records: view.total_items as u64,
            records: view.items,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GithubMeta {
    login: String,
    image: String,
}

impl GithubMeta {
    pub fn new(login: String) -> Self {
        let image = format!("https://github.com/{}.png", login);
        Self { login, image }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub title: String,
    /// Date as provided by the source.
    pub date: String,
    pub display_date: String,
    pub location: String,
    pub description: String,
    pub link: String,
    pub status: Option<String>,
}

impl From<EventRecord> for EventResponse {
    fn from(record: EventRecord) -> Self {
        Self {
            date: record.date.raw().to_string(),
            display_date: record.date.display(),
            location: record.location_or_default().to_string(),
            description: record.description_or_default().to_string(),
            link: record.link_or_default().to_string(),
            title: record.title,
            status: record.status,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EventsResponse {
    pub events: PaginatedEventResponse,
    pub next_up: Option<EventResponse>,
    /// `primary` or `fallback`.
    pub origin: String,
    pub notice: Option<String>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CountdownResponse {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub display: String,
}

impl From<Countdown> for CountdownResponse {
    fn from(countdown: Countdown) -> Self {
        Self {
            display: countdown.to_string(),
            days: countdown.days,
            hours: countdown.hours,
            minutes: countdown.minutes,
            seconds: countdown.seconds,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NextEventResponse {
    pub event: EventResponse,
    pub countdown: CountdownResponse,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProposalRequest {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProposalResponse {
    pub status: u16,
    pub confirmed: bool,
}

impl From<SubmissionReceipt> for ProposalResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            status: receipt.status,
            confirmed: receipt.confirmed,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub user: GithubMeta,
    pub score: u32,
    pub xp: u32,
    pub xp_display: String,
    pub place: u32,
}

impl From<RankedEntry> for LeaderboardResponse {
    fn from(entry: RankedEntry) -> Self {
        Self {
            xp: entry.xp(),
            xp_display: entry.xp_display(),
            score: entry.points,
            place: entry.rank,
            user: GithubMeta::new(entry.identity),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PodiumResponse {
    pub records: Vec<LeaderboardResponse>,
    pub partial: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub rank: u32,
    pub user: GithubMeta,
    pub avatar: String,
    pub contributions: u32,
    pub xp: u32,
    pub level: u32,
    /// `ELITE` or `ACTIVE`.
    pub status: String,
}

impl From<ContributorProfile> for ProfileResponse {
    fn from(profile: ContributorProfile) -> Self {
        Self {
            rank: profile.rank,
            status: profile.status.to_string(),
            user: GithubMeta::new(profile.login),
            avatar: profile.avatar,
            contributions: profile.contributions,
            xp: profile.xp,
            level: profile.level,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct KpiResponse {
    pub total_agents: u32,
    pub total_merges: u32,
    pub global_xp: u32,
}

impl From<DashboardKpis> for KpiResponse {
    fn from(kpis: DashboardKpis) -> Self {
        Self {
            total_agents: kpis.total_agents,
            total_merges: kpis.total_merges,
            global_xp: kpis.global_xp,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub kpis: KpiResponse,
    pub profiles: Vec<ProfileResponse>,
    pub repo: Option<RepoResponse>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RepoResponse {
    pub name: String,
    pub organization: GithubMeta,
    pub repo_language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub open_issues: u32,
    pub watchers: u32,
}

impl From<RepoMetadata> for RepoResponse {
    fn from(repo: RepoMetadata) -> Self {
        let (organization, name) = match repo.full_name.split_once('/') {
            Some((owner, name)) => (owner.to_string(), name.to_string()),
            None => (String::new(), repo.full_name.clone()),
        };
        Self {
            name,
            organization: GithubMeta::new(organization),
            repo_language: repo.primary_language,
            stars: repo.stars,
            forks: repo.forks,
            open_issues: repo.open_issues,
            watchers: repo.watchers,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ModuleResponse {
    pub title: String,
    pub desc: String,
    pub link: String,
}

impl From<RoadmapModule> for ModuleResponse {
    fn from(module: RoadmapModule) -> Self {
        Self {
            title: module.title,
            desc: module.desc,
            link: module.link,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PhaseNodeResponse {
    pub index: usize,
    /// `left` or `right` of the timeline.
    pub side: String,
    pub title: String,
    pub modules: Vec<ModuleResponse>,
}

impl From<PhaseNode> for PhaseNodeResponse {
    fn from(node: PhaseNode) -> Self {
        Self {
            index: node.index,
            side: node.side.to_string(),
            title: node.phase.title,
            modules: node.phase.modules.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RoadmapResponse {
    pub track: String,
    pub nodes: Vec<PhaseNodeResponse>,
}
