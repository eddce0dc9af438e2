use serde::{Deserialize, Serialize};

use crate::db::{Reading, User};

/// Error body for every failed response: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// User payload as returned to clients. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub profile_picture: Option<String>,
    pub email_verified: bool,
    pub status: String,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            phone_number: user.phone_number,
            date_of_birth: user.date_of_birth,
            country: user.country,
            city: user.city,
            address: user.address,
            postal_code: user.postal_code,
            profile_picture: user.profile_picture,
            email_verified: user.email_verified,
            status: user.status,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingDto {
    pub id: String,
    pub user_id: String,
    pub bible_book: String,
    pub chapters: String,
    pub verses: Option<String>,
    pub date_read: String,
    pub completed: bool,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Reading> for ReadingDto {
    fn from(reading: Reading) -> Self {
        Self {
            id: reading.id,
            user_id: reading.user_id,
            bible_book: reading.bible_book,
            chapters: reading.chapters,
            verses: reading.verses,
            date_read: reading.date_read,
            completed: reading.completed,
            notes: reading.notes,
            created_at: reading.created_at,
            updated_at: reading.updated_at,
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub remember_me: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserDto,
}

// ============================================================================
// Readings
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingRequest {
    pub bible_book: Option<String>,
    pub chapters: Option<String>,
    pub verses: Option<String>,
    pub date_read: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReadingRequest {
    pub bible_book: Option<String>,
    pub chapters: Option<String>,
    pub verses: Option<String>,
    pub date_read: Option<String>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ReadingsListResponse {
    pub readings: Vec<ReadingDto>,
}

#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub message: String,
    pub reading: ReadingDto,
}

// ============================================================================
// System
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub total_users: u64,
    pub total_readings: u64,
    pub database: String,
}
