//! GraphQL resolvers for patients and posts.
//!
//! - `query`: root single-entity and list queries
//! - `relation`: the per-post patient lookup
//! - `create`, `update`, `delete`: root mutations
//!
//! Every resolver awaits at most one storage call.

mod create;
mod delete;
mod query;
mod relation;
mod update;

pub use create::CreateResolver;
pub use delete::DeleteResolver;
pub use query::QueryResolver;
pub use relation::RelationResolver;
pub use update::UpdateResolver;

use async_graphql::dynamic::ResolverContext;
use patientql_storage::StorageError;
use tracing::warn;

use crate::context::GraphQLContext;
use crate::error::GraphQLError;

/// Helper to extract GraphQL context from resolver context.
pub(crate) fn get_graphql_context<'a>(
    ctx: &'a ResolverContext<'_>,
) -> Result<&'a GraphQLContext, async_graphql::Error> {
    ctx.data::<GraphQLContext>().map_err(|_| {
        GraphQLError::Internal("GraphQL context not available".into()).into_server_error()
    })
}

/// Logs a storage failure and converts it into a field error.
pub(crate) fn storage_error(
    ctx: &GraphQLContext,
    operation: &'static str,
    error: StorageError,
) -> async_graphql::Error {
    warn!(
        request_id = %ctx.request_id,
        operation,
        category = %error.category(),
        error = %error,
        "Storage operation failed"
    );
    GraphQLError::from(error).into_server_error()
}

/// Logs an argument validation failure and converts it into a field error.
pub(crate) fn validation_error(
    ctx: &GraphQLContext,
    operation: &'static str,
    error: GraphQLError,
) -> async_graphql::Error {
    warn!(
        request_id = %ctx.request_id,
        operation,
        error = %error,
        "Invalid arguments"
    );
    error.into_server_error()
}
