//! JSON HTTP surface over the store. Every route lives under `/api`; the
//! caller is whoever the session pointer names.

pub mod events;
pub mod session;
pub mod site;
pub mod users;

use std::str::FromStr;

use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::auth::AuthContext;
use crate::error::Error;
use crate::store::Store;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Session
            .service(session::session_get)
            .service(session::login_post)
            .service(session::logout_post)
            // Events
            .service(events::events_get)
            .service(events::event_get)
            .service(events::event_create)
            .service(events::event_update)
            .service(events::event_delete)
            .service(events::status_post)
            .service(events::cycle_post)
            .service(events::like_post)
            .service(events::share_post)
            .service(events::comment_post)
            .service(events::register_post)
            .service(events::cancel_delete)
            .service(events::registration_status_post)
            // Users
            .service(users::users_get)
            .service(users::user_delete)
            .service(users::role_put)
            .service(users::profile_put)
            .service(users::follow_post)
            .service(users::user_events_get)
            // Notifications, stats and dashboard
            .service(site::notifications_get)
            .service(site::unread_get)
            .service(site::read_post)
            .service(site::stats_get)
            .service(site::visit_post)
            .service(site::logs_get)
            .service(site::clubs_get)
            .service(site::distribution_get),
    );
}

pub fn status_for(e: &Error) -> StatusCode {
    match e {
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::AlreadyExists(_) => StatusCode::CONFLICT,
        Error::Unauthorized(_) => StatusCode::FORBIDDEN,
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::InvalidTransition { .. } => StatusCode::CONFLICT,
        Error::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(e: &Error) -> HttpResponse {
    let status = status_for(e);
    if status.is_server_error() {
        log::error!("Store error: {}", e);
    }
    HttpResponse::build(status).json(json!({ "error": e.to_string() }))
}

pub fn bad_request(msg: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": msg }))
}

pub fn respond<T: Serialize>(result: crate::error::Result<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

/// The signed-in caller, or the response to send when there is none.
pub fn session(store: &Store) -> Result<AuthContext, HttpResponse> {
    match store.session_context() {
        Ok(Some(ctx)) => Ok(ctx),
        Ok(None) => Err(HttpResponse::Unauthorized().json(json!({ "error": "not signed in" }))),
        Err(e) => Err(error_response(&e)),
    }
}

pub fn parse_key<K: FromStr>(s: &str) -> Result<K, HttpResponse> {
    K::from_str(s).map_err(|_| bad_request(&format!("invalid id {:?}", s)))
}
