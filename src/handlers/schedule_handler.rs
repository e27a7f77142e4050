use crate::api_error::ApiError;
use crate::db::Pool;
use crate::models::{Schedule, ScheduleInput};
use crate::user::LoggedUser;
use actix_web::{get, post, web, HttpResponse};

#[get("/schedules")]
async fn find_all(identity: LoggedUser, pool: web::Data<Pool>) -> Result<HttpResponse, ApiError> {
    let schedules = web::block(move || {
        let mut conn = pool.get()?;
        Schedule::find_with_assignments(&mut conn, identity.id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(schedules))
}

#[post("/newSchedule")]
async fn create(
    schedule: web::Json<ScheduleInput>,
    identity: LoggedUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ApiError> {
    let schedule = web::block(move || {
        let mut conn = pool.get()?;
        Schedule::create(&mut conn, schedule.into_inner(), identity.id)
    })
    .await??;

    info!("Created schedule {} for user {}", schedule.id, schedule.user_id);

    Ok(HttpResponse::Created().json(schedule))
}

pub fn schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(create);
}
