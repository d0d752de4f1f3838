//! `Post.Patient` resolver.
//!
//! Looks up the owning patient by the parent post's `patient_id`. This runs
//! once per post in a list: resolving `posts { Patient { id } }` over N
//! posts costs N lookups on top of the list query, with no batching and no
//! deduplication of repeated owners.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use patientql_storage::Post;
use tracing::trace;

use super::{get_graphql_context, storage_error};

/// Resolver for relations between entities.
pub struct RelationResolver;

impl RelationResolver {
    /// `Post.Patient: Patient`
    ///
    /// A dangling `patient_id` resolves to `null`.
    pub fn resolve_patient() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone
    {
        |ctx| {
            FieldFuture::new(async move {
                let post = ctx.parent_value.try_downcast_ref::<Post>()?;
                let gql_ctx = get_graphql_context(&ctx)?;

                trace!(post_id = post.id, patient_id = post.patient_id, "Resolving Post.Patient");

                let patient = gql_ctx
                    .storage
                    .get_patient(post.patient_id)
                    .await
                    .map_err(|e| storage_error(gql_ctx, "Post.Patient", e))?;

                Ok(patient.map(FieldValue::owned_any))
            })
        }
    }
}
