use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use diesel::result::Error as DieselError;

#[derive(Debug, Display)]
#[display(fmt = "{}", message)]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status_code: u16, message: String) -> ApiError {
        ApiError {
            status_code,
            message,
        }
    }

    pub fn bad_request(message: &str) -> ApiError {
        ApiError::new(400, message.to_string())
    }

    pub fn not_found(message: &str) -> ApiError {
        ApiError::new(404, message.to_string())
    }
}

impl From<DieselError> for ApiError {
    fn from(error: DieselError) -> ApiError {
        match error {
            DieselError::NotFound => ApiError::new(404, "Record not found".to_string()),
            DieselError::DatabaseError(_, err) => ApiError::new(500, err.message().to_string()),
            err => ApiError::new(500, format!("Diesel error: {}", err)),
        }
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(error: r2d2::Error) -> ApiError {
        ApiError::new(500, format!("Failed getting db connection: {}", error))
    }
}

impl From<BlockingError> for ApiError {
    fn from(error: BlockingError) -> ApiError {
        ApiError::new(500, format!("Blocking task failed: {}", error))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> ApiError {
        ApiError::new(500, format!("Failed to encode identity: {}", error))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            error!("{}", self.message);
            "Internal server error".to_string()
        } else {
            self.message.clone()
        };

        HttpResponse::build(status_code)
            .content_type("text/plain; charset=utf-8")
            .body(message)
    }
}
