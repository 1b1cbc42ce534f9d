use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned identifier of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProjectId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A tracked project as stored and as returned over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub eid: String,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(id: ProjectId, fields: ValidatedProject, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            eid: fields.eid,
            name: fields.name,
            description: fields.description,
            start_date: fields.start_date,
            end_date: fields.end_date,
            created_at,
        }
    }

    /// Full replacement of the editable fields; `id` and `created_at` stay.
    pub fn replace_fields(&mut self, fields: ValidatedProject) {
        self.eid = fields.eid;
        self.name = fields.name;
        self.description = fields.description;
        self.start_date = fields.start_date;
        self.end_date = fields.end_date;
    }
}

/// Body accepted by create and update.
///
/// A missing or `null` field becomes an empty string so that it reaches
/// validation and gets a specific message instead of a deserializer error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInput {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub eid: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub end_date: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ProjectInput {
    pub fn new(
        name: impl Into<String>,
        eid: impl Into<String>,
        description: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            eid: eid.into(),
            description: description.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

/// Field values that passed server-side validation: trimmed text and parsed dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProject {
    pub name: String,
    pub eid: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
