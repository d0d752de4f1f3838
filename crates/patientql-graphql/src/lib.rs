//! # patientql-graphql
//!
//! GraphQL API layer for the patientql service.
//!
//! This crate declares the schema (`Patient`, `Post`, `RootQuery`,
//! `RootMutation`) with async-graphql's dynamic API and binds every field to
//! a single call on the injected [`DynStorage`](patientql_storage::DynStorage).
//!
//! ## Endpoints
//!
//! - `POST /graphql` - Execute a GraphQL request
//! - `GET /graphql` - Execute a query from URL params, or serve GraphiQL
//!
//! ## Configuration
//!
//! Add to `patientql.toml`:
//!
//! ```toml
//! [graphql]
//! graphiql = true
//! pretty = true
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`schema`] - Schema building
//! - [`input`] - Typed operation arguments
//! - [`resolvers`] - Field resolvers
//! - [`context`] - GraphQL execution context
//! - [`handler`] - Axum HTTP handlers
//! - [`error`] - Error types for GraphQL operations

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod input;
pub mod resolvers;
pub mod schema;

pub use config::GraphQLConfig;
pub use context::{GraphQLContext, GraphQLContextBuilder};
pub use error::GraphQLError;
pub use handler::{GRAPHQL_PATH, GraphQLState, graphql_handler, graphql_handler_get};
pub use schema::{PatientSchemaBuilder, SchemaBuilderConfig};

/// Result type for GraphQL operations.
pub type Result<T> = std::result::Result<T, GraphQLError>;
