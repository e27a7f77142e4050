use crate::api_error::ApiError;
use crate::db::Pool;
use crate::models::{Assignment, AssignmentInput, Schedule};
use crate::user::LoggedUser;
use actix_web::{get, post, web, HttpResponse};
use chrono::NaiveDateTime;
use serde::Deserialize;

use serde_json::json;

#[derive(Deserialize)]
struct RangeQuery {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Names exactly one assignment or schedule to delete.
#[derive(Deserialize)]
struct DeleteRequest {
    assignment_id: Option<i32>,
    schedule_id: Option<i32>,
}

#[get("/assignment")]
async fn find_all(identity: LoggedUser, pool: web::Data<Pool>) -> Result<HttpResponse, ApiError> {
    let assignments = web::block(move || {
        let mut conn = pool.get()?;
        Assignment::find_for_user(&mut conn, identity.id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(assignments))
}

#[get("/get_assignments")]
async fn find_in_range(
    range: web::Query<RangeQuery>,
    identity: LoggedUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ApiError> {
    let RangeQuery { start, end } = range.into_inner();

    let assignments = web::block(move || {
        let mut conn = pool.get()?;
        Assignment::find_due_between(&mut conn, identity.id, start, end)
    })
    .await??;

    Ok(HttpResponse::Ok().json(assignments))
}

#[post("/add")]
async fn create(
    assignment: web::Json<AssignmentInput>,
    identity: LoggedUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ApiError> {
    let assignment = web::block(move || {
        let mut conn = pool.get()?;
        Assignment::create(&mut conn, assignment.into_inner(), identity.id)
    })
    .await??;

    Ok(HttpResponse::Created().json(assignment))
}

#[post("/delete")]
async fn delete(
    request: web::Json<DeleteRequest>,
    identity: LoggedUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();

    let num_deleted = web::block(move || {
        let mut conn = pool.get()?;
        match (request.assignment_id, request.schedule_id) {
            (Some(id), None) => Assignment::delete(&mut conn, id, identity.id),
            (None, Some(id)) => Schedule::delete(&mut conn, id, identity.id),
            _ => Err(ApiError::bad_request(
                "Expected exactly one of assignment_id or schedule_id",
            )),
        }
    })
    .await??;

    Ok(HttpResponse::Ok().json(json!({ "deleted": num_deleted })))
}

pub fn assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find_in_range);
    cfg.service(create);
    cfg.service(delete);
}
