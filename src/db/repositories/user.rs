use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{prelude::*, users};

/// User data returned from the repository (without the password hash)
#[derive(Debug, Clone)]
pub struct User {
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

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            gender: model.gender,
            phone_number: model.phone_number,
            date_of_birth: model.date_of_birth,
            country: model.country,
            city: model.city,
            address: model.address,
            postal_code: model.postal_code,
            profile_picture: model.profile_picture,
            email_verified: model.email_verified,
            status: model.status,
            last_login_at: model.last_login_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Fields required to create a user. The password arrives pre-hashed;
/// this layer never sees plaintext credentials.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Already lowercased by the caller.
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = users::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            gender: Set(new_user.gender),
            phone_number: Set(new_user.phone_number),
            date_of_birth: Set(new_user.date_of_birth),
            country: Set(new_user.country),
            city: Set(new_user.city),
            address: Set(new_user.address),
            postal_code: Set(new_user.postal_code),
            profile_picture: Set(None),
            email_verified: Set(false),
            email_verified_at: Set(None),
            phone_verified: Set(false),
            status: Set(users::UserStatus::PendingVerification.as_str().to_string()),
            last_login_at: Set(None),
            password_reset_token: Set(None),
            password_reset_expires: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        Ok(User::from(model))
    }

    /// Get user by email. Callers pass emails already lowercased.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(User::from))
    }

    /// Get user by email with password hash (for credential verification)
    pub async fn get_by_email_with_password(&self, email: &str) -> Result<Option<(User, String)>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(|u| {
            let password_hash = u.password_hash.clone();
            (User::from(u), password_hash)
        }))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Record a successful login. Touches only `last_login_at`.
    pub async fn touch_last_login(&self, id: &str) -> Result<()> {
        Users::update_many()
            .col_expr(
                users::Column::LastLoginAt,
                sea_orm::sea_query::Expr::value(Some(chrono::Utc::now().to_rfc3339())),
            )
            .filter(users::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update last login timestamp")?;

        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        let rows = Users::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")?;

        Ok(count)
    }
}
