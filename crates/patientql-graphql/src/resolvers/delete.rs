//! Delete mutation resolvers.
//!
//! Both mutations resolve to `null`. Deleting an id that does not exist is
//! a no-op, so repeating a delete is harmless.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use tracing::debug;

use super::{get_graphql_context, storage_error, validation_error};
use crate::input::IdInput;

/// Resolver for `deletePatient` and `deletePost`.
pub struct DeleteResolver;

impl DeleteResolver {
    /// `deletePatient(id: Int): Patient`
    ///
    /// Fails with `CONFLICT` while posts still reference the patient.
    pub fn patient() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let input = IdInput::from_args(&ctx.args)
                    .map_err(|e| validation_error(gql_ctx, "deletePatient", e))?;

                let affected = gql_ctx
                    .storage
                    .delete_patient(input.id)
                    .await
                    .map_err(|e| storage_error(gql_ctx, "deletePatient", e))?;

                debug!(request_id = %gql_ctx.request_id, id = input.id, affected, "deletePatient");

                Ok(None::<FieldValue<'_>>)
            })
        }
    }

    /// `deletePost(id: Int): Post`
    pub fn post() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let input = IdInput::from_args(&ctx.args)
                    .map_err(|e| validation_error(gql_ctx, "deletePost", e))?;

                let affected = gql_ctx
                    .storage
                    .delete_post(input.id)
                    .await
                    .map_err(|e| storage_error(gql_ctx, "deletePost", e))?;

                debug!(request_id = %gql_ctx.request_id, id = input.id, affected, "deletePost");

                Ok(None::<FieldValue<'_>>)
            })
        }
    }
}
