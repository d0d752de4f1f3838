//! Schema builder.
//!
//! `PatientSchemaBuilder` assembles the dynamic async-graphql schema and
//! wires each root field to its resolver.

use async_graphql::dynamic::{Field, InputValue, Object, Schema, TypeRef};
use tracing::debug;

use super::types::{PATIENT_TYPE, POST_TYPE, patient_type, post_type};
use crate::error::GraphQLError;
use crate::input::PATIENT_ID_ARG;
use crate::resolvers::{CreateResolver, DeleteResolver, QueryResolver, UpdateResolver};

/// Name of the query root type.
pub const QUERY_TYPE: &str = "RootQuery";

/// Name of the mutation root type.
pub const MUTATION_TYPE: &str = "RootMutation";

/// Configuration for the schema builder.
#[derive(Debug, Clone)]
pub struct SchemaBuilderConfig {
    /// Maximum query depth allowed.
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    pub max_complexity: usize,

    /// Whether to enable introspection queries.
    pub introspection_enabled: bool,
}

impl Default for SchemaBuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: 15,
            max_complexity: 500,
            introspection_enabled: true,
        }
    }
}

/// Builds the patients-and-posts GraphQL schema.
///
/// # Example
///
/// ```ignore
/// let schema = PatientSchemaBuilder::new(SchemaBuilderConfig::default()).build()?;
/// ```
pub struct PatientSchemaBuilder {
    config: SchemaBuilderConfig,
}

impl PatientSchemaBuilder {
    /// Creates a new schema builder.
    #[must_use]
    pub fn new(config: SchemaBuilderConfig) -> Self {
        Self { config }
    }

    /// Builds the GraphQL schema.
    ///
    /// # Errors
    ///
    /// Returns an error if schema construction fails.
    pub fn build(&self) -> Result<Schema, GraphQLError> {
        debug!("Starting GraphQL schema build");

        let mut schema_builder = Schema::build(QUERY_TYPE, Some(MUTATION_TYPE), None)
            .register(patient_type())
            .register(post_type())
            .register(Self::build_query_type())
            .register(Self::build_mutation_type())
            .limit_depth(self.config.max_depth)
            .limit_complexity(self.config.max_complexity);

        if !self.config.introspection_enabled {
            schema_builder = schema_builder.disable_introspection();
        }

        let schema = schema_builder
            .finish()
            .map_err(|e| GraphQLError::Internal(format!("Failed to build GraphQL schema: {e}")))?;

        debug!("GraphQL schema build complete");
        Ok(schema)
    }

    /// Builds the `RootQuery` type.
    fn build_query_type() -> Object {
        Object::new(QUERY_TYPE)
            .field(
                Field::new("Patient", TypeRef::named(PATIENT_TYPE), QueryResolver::patient())
                    .description("Get a Patient.")
                    .argument(InputValue::new("id", TypeRef::named(TypeRef::INT))),
            )
            .field(
                Field::new(
                    "Patients",
                    TypeRef::named_list(PATIENT_TYPE),
                    QueryResolver::patients(),
                )
                .description("List of Patients."),
            )
            .field(
                Field::new("post", TypeRef::named(POST_TYPE), QueryResolver::post())
                    .description("Get a patient's post.")
                    .argument(InputValue::new("id", TypeRef::named(TypeRef::INT))),
            )
            .field(
                Field::new("posts", TypeRef::named_list(POST_TYPE), QueryResolver::posts())
                    .description("List of posts."),
            )
    }

    /// Builds the `RootMutation` type.
    fn build_mutation_type() -> Object {
        Object::new(MUTATION_TYPE)
            .field(
                Field::new(
                    "createPatient",
                    TypeRef::named(PATIENT_TYPE),
                    CreateResolver::patient(),
                )
                .description("Create new Patient")
                .argument(InputValue::new("name", TypeRef::named_nn(TypeRef::STRING)))
                .argument(InputValue::new("email", TypeRef::named_nn(TypeRef::STRING))),
            )
            .field(
                Field::new(
                    "updatePatient",
                    TypeRef::named(PATIENT_TYPE),
                    UpdateResolver::patient(),
                )
                .description("Update an Patient")
                .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::INT)))
                .argument(InputValue::new("name", TypeRef::named_nn(TypeRef::STRING)))
                .argument(InputValue::new("email", TypeRef::named_nn(TypeRef::STRING))),
            )
            .field(
                Field::new(
                    "deletePatient",
                    TypeRef::named(PATIENT_TYPE),
                    DeleteResolver::patient(),
                )
                .description("Delete an Patient")
                .argument(InputValue::new("id", TypeRef::named(TypeRef::INT))),
            )
            .field(
                Field::new("createPost", TypeRef::named(POST_TYPE), CreateResolver::post())
                    .description("Create new post")
                    .argument(InputValue::new("title", TypeRef::named_nn(TypeRef::STRING)))
                    .argument(InputValue::new("content", TypeRef::named_nn(TypeRef::STRING)))
                    .argument(InputValue::new(PATIENT_ID_ARG, TypeRef::named_nn(TypeRef::INT))),
            )
            .field(
                Field::new("updatePost", TypeRef::named(POST_TYPE), UpdateResolver::post())
                    .description("Update a post")
                    .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::INT)))
                    .argument(InputValue::new("title", TypeRef::named_nn(TypeRef::STRING)))
                    .argument(InputValue::new("content", TypeRef::named_nn(TypeRef::STRING)))
                    .argument(InputValue::new(PATIENT_ID_ARG, TypeRef::named_nn(TypeRef::INT))),
            )
            .field(
                Field::new("deletePost", TypeRef::named(POST_TYPE), DeleteResolver::post())
                    .description("Delete a post")
                    .argument(InputValue::new("id", TypeRef::named(TypeRef::INT))),
            )
    }
}
