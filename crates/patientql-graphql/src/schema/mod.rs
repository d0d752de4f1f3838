//! GraphQL schema definition.
//!
//! The schema is static: two object types (`Patient`, `Post`) and the
//! `RootQuery`/`RootMutation` roots. It is built once at startup with
//! [`PatientSchemaBuilder`] and shared by all requests.

mod builder;
mod types;

pub use builder::{MUTATION_TYPE, PatientSchemaBuilder, QUERY_TYPE, SchemaBuilderConfig};
pub use types::{PATIENT_TYPE, POST_TYPE, patient_type, post_type};
