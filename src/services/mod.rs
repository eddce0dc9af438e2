pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, Registration};
pub use auth_service_impl::SeaOrmAuthService;
