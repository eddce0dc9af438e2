use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::{optional, provided};
use super::{
    ApiError, AppState, CreateReadingRequest, MessageResponse, ReadingResponse,
    ReadingsListResponse, UpdateReadingRequest,
};
use crate::db::{NewReading, ReadingUpdate};

/// Lists the caller's entries, newest date first.
///
/// # Endpoint
/// `GET /api/readings`
pub async fn list_readings(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Result<Json<ReadingsListResponse>, ApiError> {
    let readings = state
        .store
        .list_readings(&claims.sub)
        .await
        .map_err(|e| ApiError::database("An error occurred", e.to_string()))?;

    Ok(Json(ReadingsListResponse {
        readings: readings.into_iter().map(Into::into).collect(),
    }))
}

/// Records a completed reading for the caller.
///
/// # Endpoint
/// `POST /api/readings`
pub async fn create_reading(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(payload): Json<CreateReadingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(bible_book), Some(chapters), Some(date_read)) = (
        provided(&payload.bible_book),
        provided(&payload.chapters),
        provided(&payload.date_read),
    ) else {
        return Err(ApiError::validation(
            "Bible book, chapters, and date are required",
        ));
    };

    let reading = state
        .store
        .add_reading(
            &claims.sub,
            NewReading {
                bible_book: bible_book.to_string(),
                chapters: chapters.to_string(),
                verses: optional(&payload.verses),
                date_read: date_read.to_string(),
                notes: optional(&payload.notes),
            },
        )
        .await
        .map_err(|e| ApiError::database("An error occurred", e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ReadingResponse {
            message: "Reading added successfully".to_string(),
            reading: reading.into(),
        }),
    ))
}

/// Replaces an entry the caller owns. The id and owner are matched in
/// one statement; a miss on either reads as the same 404.
///
/// # Endpoint
/// `PUT /api/readings/{id}`
pub async fn update_reading(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReadingRequest>,
) -> Result<Json<ReadingResponse>, ApiError> {
    let (Some(bible_book), Some(chapters), Some(date_read)) = (
        provided(&payload.bible_book),
        provided(&payload.chapters),
        provided(&payload.date_read),
    ) else {
        return Err(ApiError::validation(
            "Bible book, chapters, and date are required",
        ));
    };

    let updated = state
        .store
        .update_reading(
            &id,
            &claims.sub,
            ReadingUpdate {
                bible_book: bible_book.to_string(),
                chapters: chapters.to_string(),
                verses: optional(&payload.verses),
                date_read: date_read.to_string(),
                notes: optional(&payload.notes),
                completed: payload.completed,
            },
        )
        .await
        .map_err(|e| ApiError::database("An error occurred", e.to_string()))?;

    match updated {
        Some(reading) => Ok(Json(ReadingResponse {
            message: "Reading updated successfully".to_string(),
            reading: reading.into(),
        })),
        None => Err(ApiError::not_found("Reading not found or unauthorized")),
    }
}

/// Deletes an entry the caller owns.
///
/// # Endpoint
/// `DELETE /api/readings/{id}`
pub async fn delete_reading(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .store
        .delete_reading(&id, &claims.sub)
        .await
        .map_err(|e| ApiError::database("An error occurred", e.to_string()))?;

    if !deleted {
        return Err(ApiError::not_found("Reading not found or unauthorized"));
    }

    Ok(Json(MessageResponse {
        message: "Reading deleted successfully".to_string(),
    }))
}
