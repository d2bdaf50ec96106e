//! Custom Axum extractors

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::ApiError;
use crate::db::Session;
use crate::state::AppState;

/// The request's database session.
///
/// Acquired before the handler runs. Acquisition failures are logged and
/// leave the connection absent; the handler then fails with
/// [`ApiError::Unavailable`] the first time it asks for the session.
/// Dropping the extractor at the end of the request releases the
/// connection, whichever way the handler exits.
pub struct DbConn(Option<Box<dyn Session>>);

impl DbConn {
    /// Borrow the session, or fail if none was acquired.
    pub fn session(&mut self) -> Result<&mut Box<dyn Session>, ApiError> {
        self.0.as_mut().ok_or(ApiError::Unavailable)
    }
}

impl FromRequestParts<AppState> for DbConn {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.store().acquire().await {
            Ok(session) => Ok(Self(Some(session))),
            Err(e) => {
                tracing::error!(error = %e, "Failed to acquire database connection");
                Ok(Self(None))
            }
        }
    }
}

impl Drop for DbConn {
    fn drop(&mut self) {
        if self.0.is_some() {
            tracing::trace!("Releasing database connection");
        }
    }
}
