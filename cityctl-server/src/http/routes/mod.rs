//! Route handlers organized by page
//!
//! - demo: the `test` table listing, static page, login stub
//! - listings: addresses and default handlers
//! - neighborhood / agency: search forms with resolution statistics
//! - users: profiles and complaint tracking
//! - complaints: free-text complaint search
//! - health: liveness probe

pub mod agency;
pub mod complaints;
pub mod demo;
pub mod health;
pub mod listings;
pub mod neighborhood;
mod search;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// All page routes
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(demo::router())
        .merge(health::router())
        .merge(listings::router())
        .merge(neighborhood::router())
        .merge(agency::router())
        .merge(users::router())
        .merge(complaints::router())
}
