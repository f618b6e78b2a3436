//! Role-based authorization guards.
//!
//! These extract the authenticated user from request extensions and verify
//! the required role. Rejections are the generic access-denial: handlers
//! never explain *why* a caller was refused.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for triage operations (status updates, officer assignment).
///
/// Allows `staff` and `admin`.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireStaff(user): RequireStaff) { ... }
/// ```
pub struct RequireStaff(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.role.can_triage() {
            return Err(AppError::Forbidden);
        }

        Ok(RequireStaff(user.clone()))
    }
}

/// Guard for admin-only operations (deletion, statistics, user directory).
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        Ok(RequireAdmin(user.clone()))
    }
}
