//! Demo pages: the `test` table, a static page and the login stub

use axum::{
    response::Redirect,
    routing::{get, post},
    Form, Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::models::ValidationError;
use crate::state::AppState;
use crate::views::demo;

#[derive(Debug, Deserialize)]
pub struct AddNameForm {
    #[serde(default)]
    pub name: String,
}

/// GET /
async fn index(mut conn: DbConn) -> Result<Markup, ApiError> {
    let names = conn.session()?.demo_names().await?;
    Ok(demo::index(&names))
}

/// GET /another
async fn another() -> Markup {
    demo::another()
}

/// POST /add
async fn add_name(mut conn: DbConn, Form(form): Form<AddNameForm>) -> Result<Redirect, ApiError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Empty { field: "name" }.into());
    }

    conn.session()?.insert_demo_name(name).await?;
    tracing::info!(name, "Demo name added");

    Ok(Redirect::to("/"))
}

/// GET /login - authentication is not implemented
async fn login() -> ApiError {
    ApiError::Unauthorized
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/another", get(another))
        .route("/add", post(add_name))
        .route("/login", get(login))
}
