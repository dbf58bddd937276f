//! Wire DTOs for the portal API.
//!
//! DESIGN
//! ======
//! The server's response shapes are not fully guaranteed (a pending
//! registration omits `token`, roles arrive as `{id, name}` or a bare id,
//! error bodies come from several DRF conventions). Every field here is
//! optional and deserialized leniently: a field with an unexpected type reads
//! as absent instead of failing the whole body.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::state::session::RoleId;
use crate::util::dates::format_date_range;

/// Body of a login or registration response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub role: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

impl AuthResponse {
    /// Read the fields out of any JSON body; non-objects yield all-absent.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    /// Non-empty token, if the server issued one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// User profile, if present and not `null`.
    #[must_use]
    pub fn user(&self) -> Option<&Value> {
        self.user.as_ref().filter(|u| !u.is_null())
    }

    /// Role id: the top-level `role` wins over `user.role`.
    #[must_use]
    pub fn role_id(&self) -> Option<RoleId> {
        self.role
            .as_ref()
            .and_then(role_from_value)
            .or_else(|| self.user()?.get("role").and_then(role_from_value))
    }
}

/// Accepts `{ "id": 2, ... }`, `2`, or `"2"`.
fn role_from_value(value: &Value) -> Option<RoleId> {
    match value {
        Value::Object(map) => map.get("id").and_then(scalar_role),
        other => scalar_role(other),
    }
}

fn scalar_role(value: &Value) -> Option<RoleId> {
    match value {
        Value::Number(n) => Some(RoleId::new(n.to_string())),
        Value::String(s) if !s.is_empty() => Some(RoleId::new(s.clone())),
        _ => None,
    }
}

/// Conventional error-body fields, in the order they are consulted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "lenient")]
    pub non_field_errors: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub nickname: Option<Vec<String>>,
}

impl ErrorBody {
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    /// First non-empty message in priority order.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        [
            first_of(self.non_field_errors.as_deref()),
            self.detail.as_deref(),
            self.message.as_deref(),
            first_of(self.email.as_deref()),
            first_of(self.nickname.as_deref()),
        ]
        .into_iter()
        .flatten()
        .find(|m| !m.is_empty())
    }
}

fn first_of(list: Option<&[String]>) -> Option<&str> {
    list?.first().map(String::as_str)
}

/// Human-readable message for a failed response: a recognized error field,
/// else the raw body, else the status code.
#[must_use]
pub fn error_message(body: Option<&Value>, status: u16) -> String {
    let Some(body) = body.filter(|b| !b.is_null()) else {
        return format!("HTTP {status}");
    };
    if let Some(message) = ErrorBody::from_body(body).first_message() {
        return message.to_owned();
    }
    match body {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// =============================================================
// Profile
// =============================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileAccount {
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, rename = "nickName", deserialize_with = "lenient")]
    pub nickname: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub surname: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub patronymic: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub birthday: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub role_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_approved: Option<bool>,
}

/// `/api/user-profile/` body: account under `user`, personal data under
/// `info`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<ProfileAccount>,
    #[serde(default, deserialize_with = "lenient")]
    pub info: Option<ProfileInfo>,
}

impl UserProfile {
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }
}

// =============================================================
// Reference lists
// =============================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
    /// `DD.MM.YYYY` as sent by the server.
    #[serde(default)]
    pub date: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FaqItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// `{id, name}` entries: regions, roles, disciplines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NamedItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// A person in the representatives or participants list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PersonItem {
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub patronymic: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<i64>,
}

impl PersonItem {
    /// "Фамилия Имя Отчество", skipping blank parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        [Some(self.surname.as_str()), Some(self.name.as_str()), self.patronymic.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TeamItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_private: bool,
    /// The team already applied to its competition.
    #[serde(default)]
    pub is_register: bool,
}

/// A team application or an invitation: both name a team, a competition
/// and a status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicationItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub competition_name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "lenient")]
    pub reason: Option<String>,
}

impl ApplicationItem {
    #[must_use]
    pub fn is_approved(&self) -> bool {
        matches!(self.status.as_str(), "approved" | "accepted")
    }

    /// Russian label for the `pending` / `approved` / `rejected` statuses.
    #[must_use]
    pub fn status_label(&self) -> &str {
        if self.is_approved() {
            return "Одобрена";
        }
        match self.status.as_str() {
            "pending" => "На рассмотрении",
            "rejected" | "declined" => "Отклонена",
            other => other,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CompetitionDates {
    #[serde(default)]
    pub registration_start: String,
    #[serde(default)]
    pub registration_end: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CompetitionItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub discipline_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub type_display: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "lenient")]
    pub dates: Option<CompetitionDates>,
}

impl CompetitionItem {
    /// "1 мая - 3 июня", when both event dates parse.
    #[must_use]
    pub fn date_range(&self) -> Option<String> {
        let dates = self.dates.as_ref()?;
        format_date_range(&dates.start_date, &dates.end_date)
    }
}

/// Decode list entries, skipping the ones that are not objects of the
/// expected shape.
#[must_use]
pub fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::warn!("skipping malformed list entry: {e}");
                None
            }
        })
        .collect()
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
