//! HTTP request handlers.

pub mod user_handler;

pub use user_handler::{
    add_user, count_users, delete_all_users, delete_user, get_user, list_users, update_user,
    UserRequest,
};
