#[macro_use]
extern crate log;

#[cfg(test)]
mod tests;

mod api_error;
mod calendar;
mod config;
mod db;
mod handlers;
mod models;
#[rustfmt::skip]
mod schema;
mod user;

use actix_identity::{CookieIdentityPolicy, IdentityService};
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use listenfd::ListenFd;
use std::io;

use crate::config::Config;

/// Cookie backed identity, holding the JSON of the logged in user.
pub fn session_service(secret_key: &[u8], secure: bool) -> IdentityService<CookieIdentityPolicy> {
    IdentityService::new(
        CookieIdentityPolicy::new(secret_key)
            .name("auth")
            .path("/")
            .secure(secure),
    )
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    user::init_routes(cfg);
    handlers::calendar_routes(cfg);
    handlers::assignment_routes(cfg);
    handlers::schedule_routes(cfg);
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let pool = db::init_pool(&config.database_url)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let secret_key = config.secret_key.clone();
    let cookie_secure = config.cookie_secure;
    let bind_address = config.bind_address();
    let pool = web::Data::new(pool);
    let config = web::Data::new(config);

    let mut listenfd = ListenFd::from_env();

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(config.clone())
            .wrap(middleware::Logger::default())
            .wrap(session_service(&secret_key, cookie_secure))
            .configure(routes)
    });

    server = match listenfd.take_tcp_listener(0)? {
        Some(listener) => server.listen(listener)?,
        None => server.bind(&bind_address)?,
    };

    info!("Starting server on {} 🚀", bind_address);

    server.run().await
}
