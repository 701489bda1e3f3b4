use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::api;
use crate::club::Club;
use crate::store::Store;
use crate::user::{ProfileUpdate, Role, UserKey};

#[get("/users")]
pub async fn users_get(data: web::Data<Arc<Store>>) -> HttpResponse {
    api::respond(data.list_users())
}

#[delete("/users/{id}")]
pub async fn user_delete(data: web::Data<Arc<Store>>, id: web::Path<String>) -> HttpResponse {
    let id: UserKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.delete_user(&ctx, &id)),
        Err(r) => r,
    }
}

#[derive(serde::Deserialize)]
pub struct RoleForm {
    role: Role,
}

#[put("/users/{id}/role")]
pub async fn role_put(
    data: web::Data<Arc<Store>>,
    id: web::Path<String>,
    form: web::Json<RoleForm>,
) -> HttpResponse {
    let id: UserKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.update_user_role(&ctx, &id, form.role)),
        Err(r) => r,
    }
}

#[put("/users/{id}/profile")]
pub async fn profile_put(
    data: web::Data<Arc<Store>>,
    id: web::Path<String>,
    form: web::Json<ProfileUpdate>,
) -> HttpResponse {
    let id: UserKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.update_user_info(&ctx, &id, form.into_inner())),
        Err(r) => r,
    }
}

#[derive(serde::Deserialize)]
pub struct FollowForm {
    club: Club,
}

/// Responds with the updated user, or `null` when asking for someone else.
#[post("/users/{id}/follow")]
pub async fn follow_post(
    data: web::Data<Arc<Store>>,
    id: web::Path<String>,
    form: web::Json<FollowForm>,
) -> HttpResponse {
    let id: UserKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.toggle_follow_club(&ctx, &id, form.club)),
        Err(r) => r,
    }
}

#[get("/users/{id}/events")]
pub async fn user_events_get(data: web::Data<Arc<Store>>, id: web::Path<String>) -> HttpResponse {
    match api::parse_key::<UserKey>(&id) {
        Ok(id) => api::respond(data.user_events(&id)),
        Err(r) => r,
    }
}
