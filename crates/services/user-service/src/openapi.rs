//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::UserRequest;
use domain::{DeleteOutcome, User};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::count_users,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::add_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::user_handler::delete_all_users,
    ),
    components(
        schemas(
            User,
            UserRequest,
            DeleteOutcome,
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;
