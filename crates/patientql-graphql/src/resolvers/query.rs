//! Root query resolvers.
//!
//! Single-entity queries return `null` when no row matches. List queries
//! return rows in storage order, or fail the field without a partial list.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use tracing::debug;

use super::{get_graphql_context, storage_error, validation_error};
use crate::input::IdInput;

/// Resolvers for `Patient`, `Patients`, `post` and `posts`.
pub struct QueryResolver;

impl QueryResolver {
    /// `Patient(id: Int): Patient`
    pub fn patient() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let input = IdInput::from_args(&ctx.args)
                    .map_err(|e| validation_error(gql_ctx, "Patient", e))?;

                debug!(request_id = %gql_ctx.request_id, id = input.id, "Resolving Patient");

                let patient = gql_ctx
                    .storage
                    .get_patient(input.id)
                    .await
                    .map_err(|e| storage_error(gql_ctx, "Patient", e))?;

                if patient.is_none() {
                    debug!(id = input.id, "Patient not found");
                }

                Ok(patient.map(FieldValue::owned_any))
            })
        }
    }

    /// `Patients: [Patient]`
    pub fn patients() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;

                debug!(request_id = %gql_ctx.request_id, "Resolving Patients");

                let patients = gql_ctx
                    .storage
                    .list_patients()
                    .await
                    .map_err(|e| storage_error(gql_ctx, "Patients", e))?;

                Ok(Some(FieldValue::list(
                    patients.into_iter().map(FieldValue::owned_any),
                )))
            })
        }
    }

    /// `post(id: Int): Post`
    pub fn post() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let input = IdInput::from_args(&ctx.args)
                    .map_err(|e| validation_error(gql_ctx, "post", e))?;

                debug!(request_id = %gql_ctx.request_id, id = input.id, "Resolving post");

                let post = gql_ctx
                    .storage
                    .get_post(input.id)
                    .await
                    .map_err(|e| storage_error(gql_ctx, "post", e))?;

                Ok(post.map(FieldValue::owned_any))
            })
        }
    }

    /// `posts: [Post]`
    pub fn posts() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;

                debug!(request_id = %gql_ctx.request_id, "Resolving posts");

                let posts = gql_ctx
                    .storage
                    .list_posts()
                    .await
                    .map_err(|e| storage_error(gql_ctx, "posts", e))?;

                Ok(Some(FieldValue::list(posts.into_iter().map(FieldValue::owned_any))))
            })
        }
    }
}
