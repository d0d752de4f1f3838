//! Update mutation resolvers.
//!
//! The returned entity is built purely from the arguments, so its
//! `created_at` is the zero value. An update that matches no row fails with
//! `NOT_FOUND`.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use patientql_storage::{Patient, PatientChanges, Post, PostChanges, StorageError};
use tracing::debug;

use super::{get_graphql_context, storage_error, validation_error};
use crate::input::{UpdatePatientInput, UpdatePostInput};

/// Resolver for `updatePatient` and `updatePost`.
pub struct UpdateResolver;

impl UpdateResolver {
    /// `updatePatient(id: Int!, name: String!, email: String!): Patient`
    pub fn patient() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let changes: PatientChanges = UpdatePatientInput::from_args(&ctx.args)
                    .map_err(|e| validation_error(gql_ctx, "updatePatient", e))?
                    .into();

                let affected = gql_ctx
                    .storage
                    .update_patient(&changes)
                    .await
                    .map_err(|e| storage_error(gql_ctx, "updatePatient", e))?;

                if affected == 0 {
                    return Err(storage_error(
                        gql_ctx,
                        "updatePatient",
                        StorageError::not_found("Patient", changes.id),
                    ));
                }

                debug!(request_id = %gql_ctx.request_id, id = changes.id, "Patient updated");

                Ok(Some(FieldValue::owned_any(Patient::from(changes))))
            })
        }
    }

    /// `updatePost(id: Int!, title: String!, content: String!, Patient_id: Int!): Post`
    pub fn post() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let changes: PostChanges = UpdatePostInput::from_args(&ctx.args)
                    .map_err(|e| validation_error(gql_ctx, "updatePost", e))?
                    .into();

                let affected = gql_ctx
                    .storage
                    .update_post(&changes)
                    .await
                    .map_err(|e| storage_error(gql_ctx, "updatePost", e))?;

                if affected == 0 {
                    return Err(storage_error(
                        gql_ctx,
                        "updatePost",
                        StorageError::not_found("Post", changes.id),
                    ));
                }

                debug!(request_id = %gql_ctx.request_id, id = changes.id, "Post updated");

                Ok(Some(FieldValue::owned_any(Post::from(changes))))
            })
        }
    }
}
