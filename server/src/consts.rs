pub const REPO_OWNER: &str = "sayeeg-11";
pub const REPO_NAME: &str = "Pixel_Phantoms";

pub const EVENTS_API_URL: &str = "https://script.google.com/macros/s/AKfycbza1-ZyT4B8hU3h87Agc_jkPQ8dAjQBJkXkvxYfQ4SNAUENQtlXmYzdXgkC_Kj_zt-B/exec";
pub const EVENTS_FALLBACK_PATH: &str = "data/events.json";
pub const ROADMAP_PATH: &str = "data/roadmaps.json";

pub const REQUEST_TIMEOUT_IN_SECONDS: u64 = 10;
pub const COUNTDOWN_PERIOD_IN_SECONDS: u64 = 1;
pub const DEFAULT_USERS_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 100;

// Notices
pub const OFFLINE_NOTICE: &str = "Offline mode: showing cached events";
pub const NO_EVENTS_MESSAGE: &str = "No upcoming events found.";
pub const PARTIAL_HISTORY_NOTICE: &str =
    "Some pull requests could not be loaded, scores may be incomplete.";

// Error messages
pub const EVENTS_UNAVAILABLE: &str = "Unable to load events.";
pub const CONTRIBUTORS_UNAVAILABLE: &str = "Unable to load contributors.";
pub const REPO_UNAVAILABLE: &str = "Unable to load repository info.";
pub const ROADMAP_UNAVAILABLE: &str = "Unable to load roadmap.";
pub const GITHUB_NOT_CONFIGURED: &str = "GitHub access is not configured.";
pub const PROPOSALS_UNAVAILABLE: &str = "Proposal submissions are not available.";
pub const PROPOSAL_MISSING_FIELDS: &str = "Title and date are required.";
pub const INVALID_PAGE: &str = "Page numbers start at 1.";
pub const INVALID_LIMIT: &str = "Limit must be between 1 and 100.";
