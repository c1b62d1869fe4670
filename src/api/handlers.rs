use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::{NewUser, UserId, UserPatch};
use crate::envelope::ResponseEnvelope;
use crate::error::UserError;
use crate::service::UserService;

type EnvelopeResult = Result<(StatusCode, Json<ResponseEnvelope>), UserError>;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmailQuery {
    pub email: String,
}

pub async fn get_all_users(State(svc): State<UserService>) -> EnvelopeResult {
    let users = svc.list_all().await?;
    Ok((StatusCode::OK, Json(ResponseEnvelope::with_users(users))))
}

pub async fn create_user(
    State(svc): State<UserService>,
    Json(new_user): Json<NewUser>,
) -> EnvelopeResult {
    svc.create(new_user).await?;
    Ok((StatusCode::CREATED, Json(ResponseEnvelope::success())))
}

pub async fn get_user_by_email(
    State(svc): State<UserService>,
    Query(query): Query<EmailQuery>,
) -> EnvelopeResult {
    let user = svc.get_by_email(&query.email).await?;
    Ok((StatusCode::OK, Json(ResponseEnvelope::with_user(user))))
}

pub async fn get_user_by_id(
    State(svc): State<UserService>,
    Query(query): Query<UserIdQuery>,
) -> EnvelopeResult {
    let user = svc.get_by_id(query.user_id).await?;
    Ok((StatusCode::OK, Json(ResponseEnvelope::with_user(user))))
}

pub async fn update_user(
    State(svc): State<UserService>,
    Query(query): Query<UserIdQuery>,
    Json(patch): Json<UserPatch>,
) -> EnvelopeResult {
    svc.update(query.user_id, patch).await?;
    Ok((StatusCode::ACCEPTED, Json(ResponseEnvelope::success())))
}

pub async fn delete_user(
    State(svc): State<UserService>,
    Query(query): Query<UserIdQuery>,
) -> EnvelopeResult {
    svc.delete(query.user_id).await?;
    Ok((StatusCode::ACCEPTED, Json(ResponseEnvelope::success())))
}

pub async fn get_user_email(
    State(svc): State<UserService>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<String>, UserError> {
    Ok(Json(svc.get_email(query.user_id).await?))
}

pub async fn get_email_preferences(
    State(svc): State<UserService>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<bool>, UserError> {
    Ok(Json(svc.get_email_preference(query.user_id).await?))
}

pub async fn update_email_preferences(
    State(svc): State<UserService>,
    Query(query): Query<UserIdQuery>,
    Json(allows_email): Json<bool>,
) -> EnvelopeResult {
    svc.set_email_preference(query.user_id, allows_email).await?;
    Ok((StatusCode::ACCEPTED, Json(ResponseEnvelope::success())))
}
