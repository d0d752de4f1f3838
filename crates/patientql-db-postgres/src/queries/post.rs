//! Statements against the `posts` table.

use chrono::{DateTime, Utc};
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_core::query_scalar::query_scalar;
use sqlx_postgres::PgPool;

use patientql_storage::{NewPost, Post, PostChanges, StorageError};

use super::{chrono_to_time, time_to_chrono};
use crate::error::classify;

type PostRow = (i32, String, String, i32, Option<DateTime<Utc>>);

fn from_row((id, title, content, patient_id, created_at): PostRow) -> Result<Post, StorageError> {
    Ok(Post {
        id,
        title,
        content,
        patient_id,
        created_at: created_at.map(chrono_to_time).transpose()?,
    })
}

/// Fetches one post by id.
pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<Post>, StorageError> {
    let row: Option<PostRow> = query_as(
        "SELECT id, title, content, patient_id, created_at FROM posts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| classify(e, "select post"))?;

    row.map(from_row).transpose()
}

/// Fetches every post in id order.
pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Post>, StorageError> {
    let rows: Vec<PostRow> =
        query_as("SELECT id, title, content, patient_id, created_at FROM posts ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(|e| classify(e, "select posts"))?;

    rows.into_iter().map(from_row).collect()
}

/// Inserts a post and returns the assigned id.
///
/// Fails with a foreign key violation when `patient_id` does not exist.
pub async fn insert(pool: &PgPool, post: &NewPost) -> Result<i32, StorageError> {
    let created_at = time_to_chrono(post.created_at)?;

    query_scalar(
        "INSERT INTO posts (title, content, patient_id, created_at) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&post.title)
    .bind(&post.content)
    .bind(post.patient_id)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .map_err(|e| classify(e, "insert post"))
}

/// Updates title, content and owner; returns the number of rows changed.
pub async fn update(pool: &PgPool, changes: &PostChanges) -> Result<u64, StorageError> {
    let result =
        query("UPDATE posts SET title = $1, content = $2, patient_id = $3 WHERE id = $4")
            .bind(&changes.title)
            .bind(&changes.content)
            .bind(changes.patient_id)
            .bind(changes.id)
            .execute(pool)
            .await
            .map_err(|e| classify(e, "update post"))?;

    Ok(result.rows_affected())
}

/// Deletes a post; returns the number of rows removed.
pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, StorageError> {
    let result = query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| classify(e, "delete post"))?;

    Ok(result.rows_affected())
}
