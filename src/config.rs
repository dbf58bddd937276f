//! API endpoint configuration.
//!
//! The browser build talks to the API on the page's own origin unless
//! `PORTAL_API_BASE` is set at compile time. The CLI passes its own base URL.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const LOGIN_PATH: &str = "/api/auth/login/";
pub const REGISTER_PATH: &str = "/api/auth/register/";
pub const USER_PROFILE_PATH: &str = "/api/user-profile/";
pub const COMPETITION_CREATE_PATH: &str = "/api/competitions/create/";
pub const TEAM_APPLICATIONS_PATH: &str = "/api/team-applications/";
pub const TEAMS_PATH: &str = "/api/teams/";
pub const PUBLIC_TEAMS_PATH: &str = "/api/teams/public/";
pub const USER_TEAMS_PATH: &str = "/api/user/teams/";
pub const COMPETITIONS_PATH: &str = "/api/competitions/";
pub const REGIONS_PATH: &str = "/api/regions/";
pub const ROLES_PATH: &str = "/api/roles/";
pub const DISCIPLINES_PATH: &str = "/api/disciplines/";
pub const USERS_PATH: &str = "/api/users/";
pub const APPROVALS_PATH: &str = "/api/approvals/";
pub const ORGANIZER_TEAM_APPLICATIONS_PATH: &str = "/api/organizer/team/applications/";
pub const USER_INVITATIONS_PATH: &str = "/api/user/invitations/";
pub const REPRESENTATIVES_PATH: &str = "/api/regional-representatives/";
pub const NEWS_PATH: &str = "/api/news/";
pub const FAQ_PATH: &str = "/api/faq/";

/// Where API requests are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme and host (e.g. `https://portal.example`), without trailing
    /// slash. Empty means relative URLs.
    pub base_url: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim().trim_end_matches('/').to_owned() }
    }

    /// Build from the compile-time `PORTAL_API_BASE` variable.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("PORTAL_API_BASE").unwrap_or_default())
    }

    /// Join `path` onto the base URL. Absolute URLs pass through unchanged.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
