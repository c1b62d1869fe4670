use axum::routing::{get, post};
use axum::Router;

use crate::service::UserService;

use super::handlers;

pub const BASE_PATH: &str = "/user-info";
pub const ALL_USERS_PATH: &str = "/get-all-users";
pub const CREATE_USER_PATH: &str = "/create-user";
pub const USER_BY_EMAIL_PATH: &str = "/get-user/email";
pub const USER_BY_ID_PATH: &str = "/get-user/userId";
pub const USER_EMAIL_PATH: &str = "/get-user-email";
pub const USER_EMAIL_PREFERENCES_PATH: &str = "/get-user/email/preferences";

/// Builds the router for every directory operation, nested under
/// [`BASE_PATH`].
pub fn router(service: UserService) -> Router {
    let routes = Router::new()
        .route(ALL_USERS_PATH, get(handlers::get_all_users))
        .route(CREATE_USER_PATH, post(handlers::create_user))
        .route(USER_BY_EMAIL_PATH, get(handlers::get_user_by_email))
        .route(
            USER_BY_ID_PATH,
            get(handlers::get_user_by_id)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(USER_EMAIL_PATH, get(handlers::get_user_email))
        .route(
            USER_EMAIL_PREFERENCES_PATH,
            get(handlers::get_email_preferences).put(handlers::update_email_preferences),
        )
        .with_state(service);

    Router::new().nest(BASE_PATH, routes)
}
