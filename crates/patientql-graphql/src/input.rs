//! Typed mutation and query arguments.
//!
//! Each operation reads its arguments once into one of these structs. The
//! engine already rejects wrongly typed values, so what is left to check
//! here is presence of nullable arguments and the 32-bit id range.

use async_graphql::dynamic::ObjectAccessor;
use patientql_storage::{NewPatient, NewPost, PatientChanges, PostChanges};

use crate::error::GraphQLError;

/// Name of the foreign-key argument on both post mutations.
pub const PATIENT_ID_ARG: &str = "Patient_id";

fn to_i32(value: i64, name: &str) -> Result<i32, GraphQLError> {
    i32::try_from(value).map_err(|_| {
        GraphQLError::validation(format!("argument '{name}' is out of range: {value}"))
    })
}

fn required_int(args: &ObjectAccessor<'_>, name: &str) -> Result<i32, GraphQLError> {
    let value = args
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| GraphQLError::validation(format!("missing argument '{name}'")))?;
    let raw = value
        .i64()
        .map_err(|e| GraphQLError::validation(format!("argument '{name}': {}", e.message)))?;
    to_i32(raw, name)
}

fn required_string(args: &ObjectAccessor<'_>, name: &str) -> Result<String, GraphQLError> {
    let value = args
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| GraphQLError::validation(format!("missing argument '{name}'")))?;
    value
        .string()
        .map(str::to_owned)
        .map_err(|e| GraphQLError::validation(format!("argument '{name}': {}", e.message)))
}

/// Arguments of `Patient`, `post`, `deletePatient` and `deletePost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdInput {
    pub id: i32,
}

impl IdInput {
    /// Reads the `id` argument.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::Validation` when `id` is absent or null.
    pub fn from_args(args: &ObjectAccessor<'_>) -> Result<Self, GraphQLError> {
        Ok(Self {
            id: required_int(args, "id")?,
        })
    }
}

/// Arguments of `createPatient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePatientInput {
    pub name: String,
    pub email: String,
}

impl CreatePatientInput {
    pub fn from_args(args: &ObjectAccessor<'_>) -> Result<Self, GraphQLError> {
        Ok(Self {
            name: required_string(args, "name")?,
            email: required_string(args, "email")?,
        })
    }

    /// Stamps the creation time (UTC now) and produces the insert payload.
    #[must_use]
    pub fn into_new(self) -> NewPatient {
        NewPatient::now(self.name, self.email)
    }
}

/// Arguments of `updatePatient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePatientInput {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl UpdatePatientInput {
    pub fn from_args(args: &ObjectAccessor<'_>) -> Result<Self, GraphQLError> {
        Ok(Self {
            id: required_int(args, "id")?,
            name: required_string(args, "name")?,
            email: required_string(args, "email")?,
        })
    }
}

impl From<UpdatePatientInput> for PatientChanges {
    fn from(input: UpdatePatientInput) -> Self {
        Self {
            id: input.id,
            name: input.name,
            email: input.email,
        }
    }
}

/// Arguments of `createPost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub patient_id: i32,
}

impl CreatePostInput {
    pub fn from_args(args: &ObjectAccessor<'_>) -> Result<Self, GraphQLError> {
        Ok(Self {
            title: required_string(args, "title")?,
            content: required_string(args, "content")?,
            patient_id: required_int(args, PATIENT_ID_ARG)?,
        })
    }

    /// Stamps the creation time (UTC now) and produces the insert payload.
    #[must_use]
    pub fn into_new(self) -> NewPost {
        NewPost::now(self.title, self.content, self.patient_id)
    }
}

/// Arguments of `updatePost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePostInput {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub patient_id: i32,
}

impl UpdatePostInput {
    pub fn from_args(args: &ObjectAccessor<'_>) -> Result<Self, GraphQLError> {
        Ok(Self {
            id: required_int(args, "id")?,
            title: required_string(args, "title")?,
            content: required_string(args, "content")?,
            patient_id: required_int(args, PATIENT_ID_ARG)?,
        })
    }
}

impl From<UpdatePostInput> for PostChanges {
    fn from(input: UpdatePostInput) -> Self {
        Self {
            id: input.id,
            title: input.title,
            content: input.content,
            patient_id: input.patient_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_i32_in_range() {
        assert_eq!(to_i32(42, "id").unwrap(), 42);
        assert_eq!(to_i32(i64::from(i32::MIN), "id").unwrap(), i32::MIN);
    }

    #[test]
    fn test_to_i32_out_of_range() {
        let err = to_i32(i64::from(i32::MAX) + 1, "Patient_id").unwrap_err();
        assert!(matches!(err, GraphQLError::Validation(_)));
        assert!(err.to_string().contains("Patient_id"));
    }

    #[test]
    fn test_create_patient_stamps_time() {
        let new = CreatePatientInput {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }
        .into_new();
        assert_eq!(new.name, "Ada");
        assert_eq!(new.created_at.offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn test_update_post_into_changes() {
        let changes: PostChanges = UpdatePostInput {
            id: 3,
            title: "t".into(),
            content: "c".into(),
            patient_id: 7,
        }
        .into();
        assert_eq!(changes.id, 3);
        assert_eq!(changes.patient_id, 7);
    }
}
