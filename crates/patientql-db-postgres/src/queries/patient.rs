//! Statements against the `patient` table.

use chrono::{DateTime, Utc};
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_core::query_scalar::query_scalar;
use sqlx_postgres::PgPool;

use patientql_storage::{NewPatient, Patient, PatientChanges, StorageError};

use super::{chrono_to_time, time_to_chrono};
use crate::error::classify;

type PatientRow = (i32, String, String, Option<DateTime<Utc>>);

fn from_row((id, name, email, created_at): PatientRow) -> Result<Patient, StorageError> {
    Ok(Patient {
        id,
        name,
        email,
        created_at: created_at.map(chrono_to_time).transpose()?,
    })
}

/// Fetches one patient by id.
pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<Patient>, StorageError> {
    let row: Option<PatientRow> =
        query_as("SELECT id, name, email, created_at FROM patient WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| classify(e, "select patient"))?;

    row.map(from_row).transpose()
}

/// Fetches every patient in id order.
pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Patient>, StorageError> {
    let rows: Vec<PatientRow> =
        query_as("SELECT id, name, email, created_at FROM patient ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(|e| classify(e, "select patients"))?;

    rows.into_iter().map(from_row).collect()
}

/// Inserts a patient and returns the assigned id.
pub async fn insert(pool: &PgPool, patient: &NewPatient) -> Result<i32, StorageError> {
    let created_at = time_to_chrono(patient.created_at)?;

    query_scalar(
        "INSERT INTO patient (name, email, created_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&patient.name)
    .bind(&patient.email)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .map_err(|e| classify(e, "insert patient"))
}

/// Updates name and email; returns the number of rows changed.
pub async fn update(pool: &PgPool, changes: &PatientChanges) -> Result<u64, StorageError> {
    let result = query("UPDATE patient SET name = $1, email = $2 WHERE id = $3")
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(changes.id)
        .execute(pool)
        .await
        .map_err(|e| classify(e, "update patient"))?;

    Ok(result.rows_affected())
}

/// Deletes a patient; returns the number of rows removed.
pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, StorageError> {
    let result = query("DELETE FROM patient WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| classify(e, "delete patient"))?;

    Ok(result.rows_affected())
}
