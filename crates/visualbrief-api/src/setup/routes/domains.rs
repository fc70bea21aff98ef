//! Route groups: stateless analysis and document export, and the brief session.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;

pub fn brief_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/analyze", API_PREFIX), post(handlers::analyze::analyze_images))
        .route(&format!("{}/brief/pdf", API_PREFIX), post(handlers::brief::brief_pdf))
        .with_state(state)
}

pub fn session_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/session", API_PREFIX), get(handlers::session::get_session))
        .route(
            &format!("{}/session/images", API_PREFIX),
            post(handlers::session::upload_images),
        )
        .route(
            &format!("{}/session/images/{{id}}", API_PREFIX),
            delete(handlers::session::remove_image),
        )
        .route(
            &format!("{}/session/analyze", API_PREFIX),
            post(handlers::session::start_analysis),
        )
        .route(
            &format!("{}/session/cancel", API_PREFIX),
            post(handlers::session::cancel_analysis),
        )
        .route(
            &format!("{}/session/reset", API_PREFIX),
            post(handlers::session::reset_session),
        )
        .route(&format!("{}/session/brief", API_PREFIX), get(handlers::session::get_brief))
        .route(
            &format!("{}/session/brief.pdf", API_PREFIX),
            get(handlers::session::get_brief_pdf),
        )
        .with_state(state)
}
