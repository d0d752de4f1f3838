//! Create mutation resolvers.
//!
//! The returned entity is built from the arguments, the generated id and
//! the creation time stamped here; the row is not read back.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use patientql_storage::{Patient, Post};
use tracing::debug;

use super::{get_graphql_context, storage_error, validation_error};
use crate::input::{CreatePatientInput, CreatePostInput};

/// Resolver for `createPatient` and `createPost`.
pub struct CreateResolver;

impl CreateResolver {
    /// `createPatient(name: String!, email: String!): Patient`
    pub fn patient() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let new = CreatePatientInput::from_args(&ctx.args)
                    .map_err(|e| validation_error(gql_ctx, "createPatient", e))?
                    .into_new();

                let id = gql_ctx
                    .storage
                    .create_patient(&new)
                    .await
                    .map_err(|e| storage_error(gql_ctx, "createPatient", e))?;

                debug!(request_id = %gql_ctx.request_id, id, "Patient created");

                Ok(Some(FieldValue::owned_any(Patient::created(id, &new))))
            })
        }
    }

    /// `createPost(title: String!, content: String!, Patient_id: Int!): Post`
    pub fn post() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let new = CreatePostInput::from_args(&ctx.args)
                    .map_err(|e| validation_error(gql_ctx, "createPost", e))?
                    .into_new();

                let id = gql_ctx
                    .storage
                    .create_post(&new)
                    .await
                    .map_err(|e| storage_error(gql_ctx, "createPost", e))?;

                debug!(
                    request_id = %gql_ctx.request_id,
                    id,
                    patient_id = new.patient_id,
                    "Post created"
                );

                Ok(Some(FieldValue::owned_any(Post::created(id, &new))))
            })
        }
    }
}
