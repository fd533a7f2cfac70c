//! User handlers.
//!
//! Each handler makes exactly one repository call and maps its result to a
//! status code and JSON body.

use axum::extract::{Path, State};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use common::{AppResult, JsonUtf8, OptionExt};
use domain::{DeleteOutcome, User};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// User payload for add and update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Unique login
    #[validate(
        required(message = "login may not be null"),
        custom(function = "not_blank", message = "login may not be empty")
    )]
    #[schema(example = "jlong")]
    pub login: Option<String>,
    /// First name
    #[validate(required(message = "firstName may not be null"))]
    #[schema(example = "Joshua")]
    pub first_name: Option<String>,
    /// Last name
    #[validate(required(message = "lastName may not be null"))]
    #[schema(example = "Long")]
    pub last_name: Option<String>,
}

/// Rejects empty and whitespace-only values
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl From<UserRequest> for User {
    fn from(request: UserRequest) -> Self {
        User::new(
            request.login.unwrap_or_default(),
            request.first_name.unwrap_or_default(),
            request.last_name.unwrap_or_default(),
        )
    }
}

/// Count users
#[utoipa::path(
    get,
    path = "/count",
    tag = "Users",
    responses(
        (status = 200, description = "Number of stored users", body = u64)
    )
)]
pub async fn count_users(State(state): State<AppState>) -> AppResult<JsonUtf8<u64>> {
    let count = state.users.count().await?;
    Ok(JsonUtf8::ok(count))
}

/// List all users
#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    responses(
        (status = 200, description = "All stored users", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<JsonUtf8<Vec<User>>> {
    let users = state.users.find_all().await?;
    Ok(JsonUtf8::ok(users))
}

/// Get user by login
#[utoipa::path(
    get,
    path = "/{login}",
    tag = "Users",
    params(
        ("login" = String, Path, description = "User login")
    ),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> AppResult<JsonUtf8<User>> {
    let user = state.users.find_one(&login).await?.ok_or_not_found()?;
    Ok(JsonUtf8::ok(user))
}

/// Add a user
#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 202, description = "User as stored", body = User),
        (status = 400, description = "Malformed body or missing field"),
        (status = 409, description = "Login already taken")
    )
)]
pub async fn add_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<JsonUtf8<User>> {
    let user = state.users.save(User::from(payload)).await?;
    Ok(JsonUtf8::accepted(user))
}

/// Update a user, possibly changing its login
#[utoipa::path(
    put,
    path = "/{login}",
    tag = "Users",
    params(
        ("login" = String, Path, description = "Current user login")
    ),
    request_body = UserRequest,
    responses(
        (status = 202, description = "User as stored under its new login", body = User),
        (status = 400, description = "Malformed body or missing field"),
        (status = 404, description = "User not found"),
        (status = 409, description = "New login already taken")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(login): Path<String>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<JsonUtf8<User>> {
    let user = state
        .users
        .update(&login, User::from(payload))
        .await?
        .ok_or_not_found()?;
    Ok(JsonUtf8::accepted(user))
}

/// Delete a user by login
#[utoipa::path(
    delete,
    path = "/{login}",
    tag = "Users",
    params(
        ("login" = String, Path, description = "User login")
    ),
    responses(
        (status = 202, description = "Delete outcome, also when nothing matched", body = DeleteOutcome)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> AppResult<JsonUtf8<DeleteOutcome>> {
    let outcome = state.users.delete_one(&login).await?;
    Ok(JsonUtf8::accepted(outcome))
}

/// Delete all users
#[utoipa::path(
    delete,
    path = "/",
    tag = "Users",
    responses(
        (status = 202, description = "Delete outcome", body = DeleteOutcome)
    )
)]
pub async fn delete_all_users(
    State(state): State<AppState>,
) -> AppResult<JsonUtf8<DeleteOutcome>> {
    let outcome = state.users.delete_all().await?;
    Ok(JsonUtf8::accepted(outcome))
}
