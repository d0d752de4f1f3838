//! Object types exposed by the schema.
//!
//! Scalar fields read straight from the parent entity, which resolvers
//! hand over as an owned `Patient` or `Post` value. Only `Post.Patient`
//! touches storage.

use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, Object, TypeRef};
use patientql_storage::{Patient, Post};

use crate::resolvers::RelationResolver;

/// GraphQL type name of the patient object.
pub const PATIENT_TYPE: &str = "Patient";

/// GraphQL type name of the post object.
pub const POST_TYPE: &str = "Post";

/// Builds a non-null scalar field that reads from a parent of type `T`.
fn scalar_field<T, F>(name: &str, type_name: &str, description: &str, read: F) -> Field
where
    T: Send + Sync + 'static,
    F: Fn(&T) -> Value + Send + Sync + 'static,
{
    Field::new(name, TypeRef::named_nn(type_name), move |ctx| {
        let value = ctx.parent_value.try_downcast_ref::<T>().map(&read);
        FieldFuture::new(async move { Ok(Some(value?)) })
    })
    .description(description)
}

/// Builds the `Patient` object type.
pub fn patient_type() -> Object {
    Object::new(PATIENT_TYPE)
        .description("A Patient who wrote the post")
        .field(scalar_field(
            "id",
            TypeRef::INT,
            "The identifier of the Patient.",
            |p: &Patient| Value::from(p.id),
        ))
        .field(scalar_field(
            "name",
            TypeRef::STRING,
            "The name of the Patient.",
            |p: &Patient| Value::from(p.name.as_str()),
        ))
        .field(scalar_field(
            "email",
            TypeRef::STRING,
            "The email address of the Patient.",
            |p: &Patient| Value::from(p.email.as_str()),
        ))
        .field(scalar_field(
            "created_at",
            TypeRef::STRING,
            "The created_at date of the Patient.",
            |p: &Patient| Value::from(p.created_at_rfc3339()),
        ))
}

/// Builds the `Post` object type.
pub fn post_type() -> Object {
    Object::new(POST_TYPE)
        .description("A Post made by a registered Patient")
        .field(scalar_field(
            "id",
            TypeRef::INT,
            "The identifier of the post.",
            |p: &Post| Value::from(p.id),
        ))
        .field(scalar_field(
            "title",
            TypeRef::STRING,
            "The title of the post.",
            |p: &Post| Value::from(p.title.as_str()),
        ))
        .field(scalar_field(
            "content",
            TypeRef::STRING,
            "The content of the post.",
            |p: &Post| Value::from(p.content.as_str()),
        ))
        .field(scalar_field(
            "created_at",
            TypeRef::STRING,
            "The created_at date of the post.",
            |p: &Post| Value::from(p.created_at_rfc3339()),
        ))
        .field(scalar_field(
            "patient_id",
            TypeRef::INT,
            "The identifier of the Patient who wrote the post.",
            |p: &Post| Value::from(p.patient_id),
        ))
        .field(
            Field::new(
                "Patient",
                TypeRef::named(PATIENT_TYPE),
                RelationResolver::resolve_patient(),
            )
            .description("The Patient who wrote the post."),
        )
}
