use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::api;
use crate::store::Store;

/// The signed-in user, or `null`.
#[get("/session")]
pub async fn session_get(data: web::Data<Arc<Store>>) -> HttpResponse {
    api::respond(data.session_user())
}

#[derive(serde::Deserialize)]
pub struct LoginForm {
    username: String,
}

#[post("/session/login")]
pub async fn login_post(data: web::Data<Arc<Store>>, form: web::Json<LoginForm>) -> HttpResponse {
    if form.username.trim().is_empty() {
        return api::bad_request("Please provide a username!");
    }
    api::respond(data.login(&form.username))
}

#[post("/session/logout")]
pub async fn logout_post(data: web::Data<Arc<Store>>) -> HttpResponse {
    match data.logout() {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => api::error_response(&e),
    }
}
