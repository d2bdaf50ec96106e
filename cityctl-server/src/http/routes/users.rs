//! User profiles and complaint tracking

use axum::{
    extract::{rejection::FormRejection, Path},
    response::Redirect,
    routing::{get, post},
    Form, Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::state::AppState;
use crate::views::users::{user_list, user_profile};

/// Optional note submitted with a track request
#[derive(Debug, Default, Deserialize)]
pub struct TrackForm {
    #[serde(default)]
    pub note: Option<String>,
}

impl TrackForm {
    /// Trimmed note, `None` when blank.
    fn note(&self) -> Option<&str> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

fn profile_url(user_id: i32) -> String {
    format!("/user/{}", user_id)
}

/// GET /user
async fn list_users(mut conn: DbConn) -> Result<Markup, ApiError> {
    let users = conn.session()?.users().await?;
    Ok(user_list(&users))
}

/// GET /user/{id}
async fn show_user(mut conn: DbConn, Path(user_id): Path<i32>) -> Result<Markup, ApiError> {
    let session = conn.session()?;
    let user = session
        .user(user_id)
        .await?
        .ok_or(ApiError::NotFound { resource: "User" })?;
    let tracked = session.tracked_complaints(user_id).await?;
    Ok(user_profile(&user, &tracked))
}

/// POST /user/{user_id}/track/{complaint_id}
async fn track(
    mut conn: DbConn,
    Path((user_id, complaint_id)): Path<(i32, i32)>,
    form: Result<Form<TrackForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let form = form.map(|Form(f)| f).unwrap_or_default();

    let added = conn
        .session()?
        .track(user_id, complaint_id, form.note())
        .await?;

    if added {
        tracing::info!(user_id, complaint_id, "Complaint tracked");
    } else {
        tracing::debug!(user_id, complaint_id, "Complaint already tracked");
    }

    Ok(Redirect::to(&profile_url(user_id)))
}

/// POST /user/{user_id}/untrack/{complaint_id}
async fn untrack(
    mut conn: DbConn,
    Path((user_id, complaint_id)): Path<(i32, i32)>,
) -> Result<Redirect, ApiError> {
    let removed = conn.session()?.untrack(user_id, complaint_id).await?;
    tracing::info!(user_id, complaint_id, removed, "Complaint untracked");
    Ok(Redirect::to(&profile_url(user_id)))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users))
        .route("/user/{id}", get(show_user))
        .route("/user/{user_id}/track/{complaint_id}", post(track))
        .route("/user/{user_id}/untrack/{complaint_id}", post(untrack))
}
