//! Records exchanged with the backend and the feed's bookkeeping types.
//!
//! Wire names follow the backend's JSON: camelCase fields with MongoDB-style
//! `_id` identifiers. Records are never mutated in place; a fresh value from
//! the server replaces the old one wholesale.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier the backend assigns to every profile record.
///
/// Stable across fetches; equality on it is the only identity notion the
/// engine has.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProfileId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A prospective match offered to the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_img: Option<String>,
    #[serde(default)]
    pub skill: Vec<String>,
}

impl Candidate {
    /// Full name as rendered on a feed card.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Gender values the backend accepts on signup and profile update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// The authenticated user's own profile record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(rename = "_id")]
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_img: Option<String>,
    #[serde(default)]
    pub skill: Vec<String>,
}

/// Login request payload.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup request payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub password: String,
    pub skill: Vec<String>,
}

/// Profile fields submitted to `PATCH /user/profile`.
///
/// Sent as a multipart form; the photo part is optional and the skill list
/// travels JSON-encoded inside its form field, matching the backend contract.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub skill: Vec<String>,
    pub photo: Option<ImageUpload>,
}

/// Raw image bytes attached to a profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// User verdict on the currently displayed candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// Path segment of the decision endpoint (`/request/send/{segment}/{id}`).
    #[must_use]
    pub const fn wire_segment(self) -> &'static str {
        match self {
            Self::Accept => "interested",
            Self::Reject => "ignored",
        }
    }
}

/// Lifecycle stage of a feed fetch attempt.
///
/// Transitions are monotonic per attempt: `Idle` → `Loading` → (`Loaded` |
/// `Errored`). A new attempt starts only from `Idle` or once the loaded queue
/// has been drained or invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Feed pagination position, advanced only on a successful non-empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page_number: u32,
    limit: u32,
}

impl PageCursor {
    /// Page size used when the caller does not pick one.
    pub const DEFAULT_LIMIT: u32 = 5;

    /// Build a cursor, clamping out-of-range inputs to the valid minimum
    /// (`page_number >= 1`, `limit >= 1`).
    #[must_use]
    pub fn new(page_number: u32, limit: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            limit: limit.max(1),
        }
    }

    #[must_use]
    pub const fn page_number(self) -> u32 {
        self.page_number
    }

    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Cursor for the next page at the same limit.
    #[must_use]
    pub const fn advanced(self) -> Self {
        Self {
            page_number: self.page_number + 1,
            limit: self.limit,
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_decodes_backend_json() {
        let raw = r#"{
            "_id": "66f0a1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "skill": ["rust", "math"]
        }"#;
        let candidate: Candidate = serde_json::from_str(raw).expect("decode candidate");
        assert_eq!(candidate.id, ProfileId::from("66f0a1"));
        assert_eq!(candidate.display_name(), "Ada Lovelace");
        assert_eq!(candidate.profile_img, None);
        assert_eq!(candidate.skill, vec!["rust", "math"]);
    }

    #[test]
    fn registration_serializes_camel_case() {
        let registration = Registration {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            gender: Gender::Female,
            dob: NaiveDate::from_ymd_opt(1990, 12, 10).expect("valid date"),
            password: "Secret1!".into(),
            skill: vec!["rust".into()],
        };
        let value = serde_json::to_value(&registration).expect("encode registration");
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["gender"], "female");
        assert_eq!(value["dob"], "1990-12-10");
    }

    #[test]
    fn cursor_clamps_and_advances() {
        let cursor = PageCursor::new(0, 0);
        assert_eq!(cursor.page_number(), 1);
        assert_eq!(cursor.limit(), 1);

        let next = PageCursor::default().advanced();
        assert_eq!(next.page_number(), 2);
        assert_eq!(next.limit(), PageCursor::DEFAULT_LIMIT);
    }

    #[test]
    fn decision_maps_to_wire_segment() {
        assert_eq!(Decision::Accept.wire_segment(), "interested");
        assert_eq!(Decision::Reject.wire_segment(), "ignored");
    }
}
