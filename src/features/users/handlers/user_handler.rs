use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::{UserListQuery, UserResponseDto};
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;

/// User directory listing (admin)
#[utoipa::path(
    get,
    path = "/api/users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Directory entries", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let users = service.list(query.role).await?;
    let dtos: Vec<UserResponseDto> = users.into_iter().map(|u| u.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}
