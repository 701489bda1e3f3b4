use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::api;
use crate::club::ClubInfo;
use crate::notifications::NotificationKey;
use crate::store::Store;

#[get("/notifications")]
pub async fn notifications_get(data: web::Data<Arc<Store>>) -> HttpResponse {
    match api::session(&data) {
        Ok(ctx) => api::respond(data.notifications_for_user(&ctx.user_id)),
        Err(r) => r,
    }
}

#[get("/notifications/unread")]
pub async fn unread_get(data: web::Data<Arc<Store>>) -> HttpResponse {
    match api::session(&data) {
        Ok(ctx) => match data.unread_count(&ctx.user_id) {
            Ok(count) => HttpResponse::Ok().json(json!({ "count": count })),
            Err(e) => api::error_response(&e),
        },
        Err(r) => r,
    }
}

#[post("/notifications/{id}/read")]
pub async fn read_post(data: web::Data<Arc<Store>>, id: web::Path<String>) -> HttpResponse {
    let id: NotificationKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.mark_notification_read(&ctx, &id)),
        Err(r) => r,
    }
}

#[get("/stats")]
pub async fn stats_get(data: web::Data<Arc<Store>>) -> HttpResponse {
    api::respond(data.stats())
}

/// Called once per page load by the front end.
#[post("/stats/visit")]
pub async fn visit_post(data: web::Data<Arc<Store>>) -> HttpResponse {
    api::respond(data.increment_visitor())
}

#[get("/logs")]
pub async fn logs_get(data: web::Data<Arc<Store>>) -> HttpResponse {
    match api::session(&data) {
        Ok(ctx) => match ctx.require_dashboard() {
            Ok(()) => api::respond(data.logs()),
            Err(e) => api::error_response(&e),
        },
        Err(r) => r,
    }
}

#[get("/clubs")]
pub async fn clubs_get() -> HttpResponse {
    let clubs: Vec<serde_json::Value> = ClubInfo::club_list()
        .iter()
        .map(|info| {
            json!({
                "club": info.club,
                "name": info.club.display_name(),
                "description": info.description,
            })
        })
        .collect();
    HttpResponse::Ok().json(clubs)
}

#[get("/clubs/distribution")]
pub async fn distribution_get(data: web::Data<Arc<Store>>) -> HttpResponse {
    api::respond(data.club_distribution())
}
