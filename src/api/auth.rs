use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::validation::{optional, provided, validate_gender};
use super::{
    ApiError, AppState, LoginRequest, LoginResponse, MeResponse, MessageResponse, RegisterRequest,
    RegisterResponse,
};
use crate::auth::{Claims, cookie};
use crate::services::{AuthError, Registration};

/// Verified token claims, inserted into request extensions by
/// [`session_auth`] for downstream handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

// ============================================================================
// Middleware
// ============================================================================

/// Session authentication for API routes. Reads the session cookie,
/// verifies the token, and stores the claims in request extensions.
///
/// Absent cookie and failed verification both end in 401; the guard on
/// navigational routes never sees API traffic.
pub async fn session_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = cookie::session_token(request.headers()) else {
        return Err(ApiError::unauthorized("Not authenticated"));
    };

    let Some(claims) = state.tokens.verify(&token) else {
        return Err(ApiError::unauthorized("Invalid token"));
    };

    tracing::Span::current().record("user_id", claims.sub.as_str());
    request.extensions_mut().insert(AuthUser(claims));

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// Creates a new account.
///
/// # Endpoint
/// `POST /api/auth/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(email), Some(password), Some(first_name), Some(last_name), Some(gender)) = (
        provided(&payload.email),
        provided(&payload.password),
        provided(&payload.first_name),
        provided(&payload.last_name),
        provided(&payload.gender),
    ) else {
        return Err(ApiError::validation(
            "Email, password, first name, last name, and gender are required",
        ));
    };

    let gender = validate_gender(gender)?;

    let registration = Registration {
        email: email.to_string(),
        password: password.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender: gender.to_string(),
        phone_number: optional(&payload.phone_number),
        date_of_birth: optional(&payload.date_of_birth),
        country: optional(&payload.country),
        city: optional(&payload.city),
        address: optional(&payload.address),
        postal_code: optional(&payload.postal_code),
    };

    match state.auth_service.register(registration).await {
        Ok(user) => {
            tracing::info!("New user registered: {}", user.email);
            Ok((
                StatusCode::CREATED,
                Json(RegisterResponse {
                    message: "User registered successfully".to_string(),
                    user: user.into(),
                }),
            ))
        }
        Err(AuthError::EmailTaken) => {
            Err(ApiError::conflict("User with this email already exists"))
        }
        Err(AuthError::Database(detail)) => Err(ApiError::database(
            "An error occurred during registration",
            detail,
        )),
        Err(err) => Err(ApiError::internal(
            "An error occurred during registration",
            err.to_string(),
        )),
    }
}

/// Verifies credentials and opens a session. The token travels both in
/// the response body and in the session cookie.
///
/// # Endpoint
/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let (Some(email), Some(password)) =
        (provided(&payload.email), provided(&payload.password))
    else {
        return Err(ApiError::validation("Email and password are required"));
    };

    let remember_me = payload.remember_me.unwrap_or(false);

    match state.auth_service.login(email, password, remember_me).await {
        Ok(result) => {
            let set_cookie = cookie::session_cookie(
                &result.token,
                result.max_age_secs,
                state.config.server.secure_cookies,
            );

            let body = Json(LoginResponse {
                message: "Login successful".to_string(),
                user: result.user.into(),
                token: result.token,
            });

            Ok(([(header::SET_COOKIE, set_cookie)], body).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            Err(ApiError::unauthorized("Invalid email or password"))
        }
        Err(AuthError::Database(detail)) => {
            Err(ApiError::database("An error occurred during login", detail))
        }
        Err(err) => Err(ApiError::internal(
            "An error occurred during login",
            err.to_string(),
        )),
    }
}

/// Clears the session cookie. The token itself stays valid until its
/// natural expiry; there is no server-side revocation.
///
/// # Endpoint
/// `POST /api/auth/logout`
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let set_cookie = cookie::clear_session_cookie(state.config.server.secure_cookies);

    (
        [(header::SET_COOKIE, set_cookie)],
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Returns the account behind the verified session.
///
/// # Endpoint
/// `GET /api/auth/me`
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Result<Json<MeResponse>, ApiError> {
    match state.auth_service.current_user(&claims.sub).await {
        Ok(user) => Ok(Json(MeResponse { user: user.into() })),
        Err(AuthError::UserNotFound) => Err(ApiError::unauthorized("Invalid token")),
        Err(AuthError::Database(detail)) => Err(ApiError::database("An error occurred", detail)),
        Err(err) => Err(ApiError::internal("An error occurred", err.to_string())),
    }
}
