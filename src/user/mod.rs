mod auth_handler;
mod model;
mod routes;

pub use auth_handler::*;
pub use model::*;
pub use routes::init_routes;
