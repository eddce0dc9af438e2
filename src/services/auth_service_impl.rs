//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tokio::task;

use crate::auth::{self, TokenService};
use crate::constants::session;
use crate::db::{NewUser, Store};
use crate::services::auth_service::{AuthError, AuthService, LoginResult, Registration};

pub struct SeaOrmAuthService {
    store: Store,
    tokens: TokenService,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenService) -> Self {
        Self { store, tokens }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<crate::db::User, AuthError> {
        let email = registration.email.to_lowercase();

        // Duplicate check before insert; the unique index backstops races.
        if self.store.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password = registration.password;
        // Hashing is CPU-bound, keep it off the async runtime
        let password_hash = task::spawn_blocking(move || auth::password::hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task panicked: {e}")))??;

        let user = self
            .store
            .create_user(NewUser {
                email,
                password_hash,
                first_name: registration.first_name,
                last_name: registration.last_name,
                gender: registration.gender,
                phone_number: registration.phone_number,
                date_of_birth: registration.date_of_birth,
                country: registration.country,
                city: registration.city,
                address: registration.address,
                postal_code: registration.postal_code,
            })
            .await?;

        Ok(user)
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<LoginResult, AuthError> {
        let email = email.to_lowercase();

        // Unknown email and wrong password take the same exit
        let Some((user, password_hash)) =
            self.store.get_user_by_email_with_password(&email).await?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        let password = password.to_string();
        let is_valid =
            task::spawn_blocking(move || auth::password::verify_password(&password, &password_hash))
                .await
                .map_err(|e| AuthError::Internal(format!("Verification task panicked: {e}")))?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        self.store.touch_last_login(&user.id).await?;

        let max_age_secs = if remember_me {
            session::REMEMBER_ME_MAX_AGE_SECS
        } else {
            session::DEFAULT_MAX_AGE_SECS
        };

        let token = self
            .tokens
            .issue(&user.id, &user.email, chrono::Duration::seconds(max_age_secs))
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))?;

        Ok(LoginResult {
            user,
            token,
            max_age_secs,
        })
    }

    async fn current_user(&self, user_id: &str) -> Result<crate::db::User, AuthError> {
        let user = self
            .store
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user)
    }
}
