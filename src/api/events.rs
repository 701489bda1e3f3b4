use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::api;
use crate::event::{
    Comment, EventKey, EventPost, EventStatus, NewEvent, RegistrationForm, RegistrationStatus,
};
use crate::store::Store;
use crate::user::UserKey;

#[get("/events")]
pub async fn events_get(data: web::Data<Arc<Store>>) -> HttpResponse {
    api::respond(data.list_events())
}

#[get("/events/{id}")]
pub async fn event_get(data: web::Data<Arc<Store>>, id: web::Path<String>) -> HttpResponse {
    let id: EventKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match data.get_event(&id) {
        Ok(Some(post)) => HttpResponse::Ok().json(post),
        Ok(None) => api::error_response(&crate::Error::not_found("event", id)),
        Err(e) => api::error_response(&e),
    }
}

#[post("/events")]
pub async fn event_create(
    data: web::Data<Arc<Store>>,
    form: web::Json<NewEvent>,
) -> HttpResponse {
    let required = [&form.title, &form.date, &form.time];
    if required.iter().any(|field| field.trim().is_empty()) {
        return api::bad_request("Please provide a title, date and time!");
    }
    match api::session(&data) {
        Ok(ctx) => {
            let author = ctx.user_id;
            api::respond(data.create_event(&ctx, form.into_inner(), author))
        }
        Err(r) => r,
    }
}

#[put("/events/{id}")]
pub async fn event_update(
    data: web::Data<Arc<Store>>,
    id: web::Path<String>,
    post: web::Json<EventPost>,
) -> HttpResponse {
    let id: EventKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    if post.id != id {
        return api::bad_request("event id in body does not match the path");
    }
    match api::session(&data) {
        Ok(ctx) => api::respond(data.update_event(&ctx, post.into_inner())),
        Err(r) => r,
    }
}

#[delete("/events/{id}")]
pub async fn event_delete(data: web::Data<Arc<Store>>, id: web::Path<String>) -> HttpResponse {
    let id: EventKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.delete_event(&ctx, &id)),
        Err(r) => r,
    }
}

#[derive(serde::Deserialize)]
pub struct EventStatusForm {
    status: EventStatus,
}

#[post("/events/{id}/status")]
pub async fn status_post(
    data: web::Data<Arc<Store>>,
    id: web::Path<String>,
    form: web::Json<EventStatusForm>,
) -> HttpResponse {
    let id: EventKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.set_event_status(&ctx, &id, form.status)),
        Err(r) => r,
    }
}

#[post("/events/{id}/cycle")]
pub async fn cycle_post(data: web::Data<Arc<Store>>, id: web::Path<String>) -> HttpResponse {
    let id: EventKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.cycle_event_status(&ctx, &id)),
        Err(r) => r,
    }
}

#[post("/events/{id}/like")]
pub async fn like_post(data: web::Data<Arc<Store>>, id: web::Path<String>) -> HttpResponse {
    let id: EventKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.toggle_like(&id, ctx.user_id)),
        Err(r) => r,
    }
}

#[post("/events/{id}/share")]
pub async fn share_post(data: web::Data<Arc<Store>>, id: web::Path<String>) -> HttpResponse {
    let id: EventKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.record_share(&id, ctx.user_id)),
        Err(r) => r,
    }
}

#[derive(serde::Deserialize)]
pub struct CommentForm {
    content: String,
}

#[post("/events/{id}/comments")]
pub async fn comment_post(
    data: web::Data<Arc<Store>>,
    id: web::Path<String>,
    form: web::Json<CommentForm>,
) -> HttpResponse {
    let id: EventKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.add_comment(&id, Comment::new(&ctx.user, &form.content))),
        Err(r) => r,
    }
}

#[post("/events/{id}/registrations")]
pub async fn register_post(
    data: web::Data<Arc<Store>>,
    id: web::Path<String>,
    form: web::Json<RegistrationForm>,
) -> HttpResponse {
    let id: EventKey = match api::parse_key(&id) {
        Ok(id) => id,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.register_for_event(&ctx, &id, form.into_inner())),
        Err(r) => r,
    }
}

fn event_and_user(path: web::Path<(String, String)>) -> Result<(EventKey, UserKey), HttpResponse> {
    let (event, user) = path.into_inner();
    Ok((api::parse_key(&event)?, api::parse_key(&user)?))
}

#[delete("/events/{id}/registrations/{user_id}")]
pub async fn cancel_delete(
    data: web::Data<Arc<Store>>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (post_id, user_id) = match event_and_user(path) {
        Ok(ids) => ids,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.cancel_registration(&ctx, &post_id, &user_id)),
        Err(r) => r,
    }
}

#[derive(serde::Deserialize)]
pub struct RegistrationStatusForm {
    status: RegistrationStatus,
}

#[post("/events/{id}/registrations/{user_id}/status")]
pub async fn registration_status_post(
    data: web::Data<Arc<Store>>,
    path: web::Path<(String, String)>,
    form: web::Json<RegistrationStatusForm>,
) -> HttpResponse {
    let (post_id, user_id) = match event_and_user(path) {
        Ok(ids) => ids,
        Err(r) => return r,
    };
    match api::session(&data) {
        Ok(ctx) => api::respond(data.update_registration_status(
            &ctx,
            &post_id,
            &user_id,
            form.status,
        )),
        Err(r) => r,
    }
}
