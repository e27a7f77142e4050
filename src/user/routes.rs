use crate::api_error::ApiError;
use crate::db::Pool;
use crate::user::{AuthUser, LoggedUser, LoginRequest, User, UserMessage};
use actix_identity::Identity;
use actix_web::{get, post, route, web, HttpResponse};

use serde_json::json;

fn remember(id: &Identity, user: &User) -> Result<(), ApiError> {
    let identity = serde_json::to_string(&AuthUser::from(user))?;
    id.remember(identity);
    Ok(())
}

#[post("/signup")]
async fn signup(
    user: web::Json<UserMessage>,
    id: Identity,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ApiError> {
    let user = web::block(move || {
        let mut conn = pool.get()?;
        User::create(&mut conn, user.into_inner())
    })
    .await??;

    remember(&id, &user)?;
    info!("Signed up user {}", user.id);

    Ok(HttpResponse::Created().json(user))
}

#[post("/login")]
async fn login(
    credentials: web::Json<LoginRequest>,
    id: Identity,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ApiError> {
    let user = web::block(move || {
        let mut conn = pool.get()?;
        User::find_by_credentials(&mut conn, credentials.into_inner())
    })
    .await??;

    remember(&id, &user)?;

    Ok(HttpResponse::Ok().json(user))
}

#[route("/logout", method = "GET", method = "POST")]
async fn logout(id: Identity) -> HttpResponse {
    id.forget();
    HttpResponse::Ok().finish()
}

#[post("/delete_account")]
async fn delete_account(
    identity: LoggedUser,
    id: Identity,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ApiError> {
    let user_id = identity.id;
    let deleted = web::block(move || {
        let mut conn = pool.get()?;
        let user = User::find_logged_in(&mut conn, &identity)?;
        User::delete(&mut conn, user.id)
    })
    .await?;

    // A cookie for an account that is already gone is dropped as well.
    id.forget();
    let num_deleted = deleted?;
    info!("Deleted account {}", user_id);

    Ok(HttpResponse::Ok().json(json!({ "deleted": num_deleted })))
}

#[get("/account")]
async fn account(identity: LoggedUser, pool: web::Data<Pool>) -> Result<HttpResponse, ApiError> {
    let summary = web::block(move || {
        let mut conn = pool.get()?;
        User::summary(&mut conn, &identity)
    })
    .await??;

    Ok(HttpResponse::Ok().json(summary))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(signup);
    cfg.service(login);
    cfg.service(logout);
    cfg.service(delete_account);
    cfg.service(account);
}
