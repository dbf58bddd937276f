//! Route table and authentication guard.
//!
//! This is pure domain logic with no DOM dependency: `AppRoute` names every
//! page and carries its `auth` requirement, `decide` is the per-navigation
//! predicate, and `resolve` follows guard redirects to a final route.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::fmt;

pub const AUTH_PATH: &str = "/auth";

/// Sub-pages of the personal cabinet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CabinetSection {
    #[default]
    Profile,
    MyTeam,
    AllCompetitions,
    UserApprovals,
    ApprovedApplications,
    Applications,
    MyTeamApplications,
    Messages,
}

impl CabinetSection {
    pub const ALL: [Self; 8] = [
        Self::Profile,
        Self::MyTeam,
        Self::AllCompetitions,
        Self::UserApprovals,
        Self::ApprovedApplications,
        Self::Applications,
        Self::MyTeamApplications,
        Self::Messages,
    ];

    /// Path segment below `/cabinet`.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Profile => "",
            Self::MyTeam => "infocomand",
            Self::AllCompetitions => "infoallcompetitions",
            Self::UserApprovals => "InfoCardUserAdmin",
            Self::ApprovedApplications => "InfoCardZavkaProved",
            Self::Applications => "InfoIZavka",
            Self::MyTeamApplications => "myInfoZavkaCommand",
            Self::Messages => "message",
        }
    }

    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.segment() == segment)
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Profile => "Личные данные",
            Self::MyTeam => "Моя команда",
            Self::AllCompetitions => "Все соревнования",
            Self::UserApprovals => "Подтверждение пользователей",
            Self::ApprovedApplications => "Одобренные заявки",
            Self::Applications => "Заявки",
            Self::MyTeamApplications => "Заявки моей команды",
            Self::Messages => "Сообщения",
        }
    }
}

/// Every page of the portal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    Admins,
    Regions,
    RegionDetail(String),
    Command,
    Competitions,
    Rating,
    News,
    Faq,
    Cabinet(CabinetSection),
    Auth,
    NotFound,
}

impl AppRoute {
    /// Parse a URL path. Trailing slashes are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let mut parts = trimmed.trim_start_matches('/').splitn(2, '/');
        let head = parts.next().unwrap_or_default();
        let rest = parts.next();
        match (head, rest) {
            ("", None) => Self::Home,
            ("admins", None) => Self::Admins,
            ("region", None) => Self::Regions,
            ("region", Some(name)) if !name.is_empty() && !name.contains('/') => Self::RegionDetail(name.to_owned()),
            ("command", None) => Self::Command,
            ("competitions", None) => Self::Competitions,
            ("rating", None) => Self::Rating,
            ("news", None) => Self::News,
            ("FAQ", None) => Self::Faq,
            ("cabinet", None) => Self::Cabinet(CabinetSection::Profile),
            ("cabinet", Some(segment)) => {
                CabinetSection::from_segment(segment).filter(|s| *s != CabinetSection::Profile).map_or(Self::NotFound, Self::Cabinet)
            }
            ("auth", None) => Self::Auth,
            _ => Self::NotFound,
        }
    }

    #[must_use]
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Admins => "/admins".to_owned(),
            Self::Regions => "/region".to_owned(),
            Self::RegionDetail(name) => format!("/region/{name}"),
            Self::Command => "/command".to_owned(),
            Self::Competitions => "/competitions".to_owned(),
            Self::Rating => "/rating".to_owned(),
            Self::News => "/news".to_owned(),
            Self::Faq => "/FAQ".to_owned(),
            Self::Cabinet(CabinetSection::Profile) => "/cabinet".to_owned(),
            Self::Cabinet(section) => format!("/cabinet/{}", section.segment()),
            Self::Auth => AUTH_PATH.to_owned(),
            Self::NotFound => "/404".to_owned(),
        }
    }

    /// The route's `auth` flag: only the personal cabinet is gated.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Cabinet(_))
    }

    /// Where a denied navigation is sent.
    #[must_use]
    pub fn auth_failure_redirect() -> Self {
        Self::Auth
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// Result of checking one navigation against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(AppRoute),
}

/// The navigation predicate.
#[must_use]
pub fn decide(auth_required: bool, is_authenticated: bool) -> GuardOutcome {
    if auth_required && !is_authenticated {
        GuardOutcome::Redirect(AppRoute::auth_failure_redirect())
    } else {
        GuardOutcome::Allow
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("redirect cycle while navigating to {0}")]
    RedirectCycle(AppRoute),
}

/// Apply the guard to `target`, following redirects until a route is
/// allowed. Fails if a redirect leads back to a route already visited.
///
/// # Errors
///
/// Returns `NavigationError::RedirectCycle` if the guard keeps redirecting.
pub fn resolve(target: AppRoute, is_authenticated: bool) -> Result<AppRoute, NavigationError> {
    resolve_with(target, is_authenticated, AppRoute::requires_auth)
}

/// `resolve` with a caller-supplied requirement table.
///
/// # Errors
///
/// Returns `NavigationError::RedirectCycle` if the guard keeps redirecting.
pub fn resolve_with<F>(target: AppRoute, is_authenticated: bool, requires_auth: F) -> Result<AppRoute, NavigationError>
where
    F: Fn(&AppRoute) -> bool,
{
    let mut visited = vec![target.clone()];
    let mut current = target.clone();
    loop {
        match decide(requires_auth(&current), is_authenticated) {
            GuardOutcome::Allow => return Ok(current),
            GuardOutcome::Redirect(next) => {
                if visited.contains(&next) {
                    return Err(NavigationError::RedirectCycle(target));
                }
                visited.push(next.clone());
                current = next;
            }
        }
    }
}
