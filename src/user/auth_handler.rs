use actix_identity::RequestIdentity;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};

use crate::api_error::ApiError;
use crate::user::AuthUser;

pub type LoggedUser = AuthUser;

impl FromRequest for LoggedUser {
    type Error = ApiError;
    type Future = Ready<Result<LoggedUser, ApiError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(user_json) = req.get_identity() {
            if let Ok(user) = serde_json::from_str(&user_json) {
                return ok(user);
            }
        }
        err(ApiError::new(401, "Unauthorized".to_string()))
    }
}
