//! Entity types exchanged with storage backends.
//!
//! Entities are transient: backends build them fresh from rows, and mutation
//! resolvers build them from their arguments. Nothing here is cached.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Rendering of an unset timestamp.
pub const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00Z";

/// Current UTC time at the microsecond precision of a `timestamptz` column,
/// so a created entity matches what a later read returns.
fn now_micros() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - time::Duration::nanoseconds(i64::from(now.nanosecond() % 1_000))
}

/// A row of the `patient` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Storage-assigned identifier.
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Creation time. `None` when the entity was rebuilt from update
    /// arguments or the stored row has no timestamp.
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Patient {
    /// Builds the entity returned by a create mutation.
    #[must_use]
    pub fn created(id: i32, new: &NewPatient) -> Self {
        Self {
            id,
            name: new.name.clone(),
            email: new.email.clone(),
            created_at: Some(new.created_at),
        }
    }

    /// Returns `created_at` as RFC 3339, or [`ZERO_TIMESTAMP`] when unset.
    #[must_use]
    pub fn created_at_rfc3339(&self) -> String {
        format_timestamp(self.created_at)
    }
}

impl From<PatientChanges> for Patient {
    fn from(changes: PatientChanges) -> Self {
        Self {
            id: changes.id,
            name: changes.name,
            email: changes.email,
            created_at: None,
        }
    }
}

/// A row of the `posts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Storage-assigned identifier.
    pub id: i32,
    pub title: String,
    pub content: String,
    /// Id of the owning patient. Referential only: the post does not hold
    /// the patient itself.
    pub patient_id: i32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Post {
    /// Builds the entity returned by a create mutation.
    #[must_use]
    pub fn created(id: i32, new: &NewPost) -> Self {
        Self {
            id,
            title: new.title.clone(),
            content: new.content.clone(),
            patient_id: new.patient_id,
            created_at: Some(new.created_at),
        }
    }

    /// Returns `created_at` as RFC 3339, or [`ZERO_TIMESTAMP`] when unset.
    #[must_use]
    pub fn created_at_rfc3339(&self) -> String {
        format_timestamp(self.created_at)
    }
}

impl From<PostChanges> for Post {
    fn from(changes: PostChanges) -> Self {
        Self {
            id: changes.id,
            title: changes.title,
            content: changes.content,
            patient_id: changes.patient_id,
            created_at: None,
        }
    }
}

/// Values inserted by `createPatient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    /// Computed by the mutation handler, not by a storage default.
    pub created_at: OffsetDateTime,
}

impl NewPatient {
    /// Creates an insert payload stamped with the current UTC time.
    #[must_use]
    pub fn now(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            created_at: now_micros(),
        }
    }
}

/// Values written by `updatePatient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientChanges {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Values inserted by `createPost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub patient_id: i32,
    pub created_at: OffsetDateTime,
}

impl NewPost {
    /// Creates an insert payload stamped with the current UTC time.
    #[must_use]
    pub fn now(title: impl Into<String>, content: impl Into<String>, patient_id: i32) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            patient_id,
            created_at: now_micros(),
        }
    }
}

/// Values written by `updatePost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub patient_id: i32,
}

fn format_timestamp(ts: Option<OffsetDateTime>) -> String {
    ts.and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| ZERO_TIMESTAMP.to_string())
}
