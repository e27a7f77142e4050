use crate::api_error::ApiError;
use crate::calendar;
use crate::config::Config;
use crate::db::Pool;
use crate::models::{Assignment, Schedule};
use crate::user::LoggedUser;
use actix_web::{get, web, HttpResponse};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct YearView {
    year: i32,
    months: BTreeMap<u32, &'static str>,
}

#[derive(Serialize)]
struct MonthView {
    year: i32,
    month: u32,
    month_name: &'static str,
    num_days: u32,
    start_day: u32,
    weights: BTreeMap<u32, i64>,
}

#[derive(Serialize)]
struct DayView {
    year: i32,
    month: u32,
    day: u32,
    month_name: &'static str,
    day_name: &'static str,
    weight: i64,
    assignments: Vec<Assignment>,
    schedules: Vec<Schedule>,
}

fn unknown_month() -> ApiError {
    ApiError::not_found("No such month")
}

#[get("/year")]
async fn year_page(
    config: web::Data<Config>,
    _identity: LoggedUser,
) -> Result<HttpResponse, ApiError> {
    let months = (1..=12u32)
        .filter_map(|month| calendar::month_name(month).map(|name| (month, name)))
        .collect();

    Ok(HttpResponse::Ok().json(YearView {
        year: config.calendar_year,
        months,
    }))
}

#[get("/month/{month}")]
async fn month_page(
    path: web::Path<u32>,
    config: web::Data<Config>,
    pool: web::Data<Pool>,
    identity: LoggedUser,
) -> Result<HttpResponse, ApiError> {
    let year = config.calendar_year;
    let month = path.into_inner();

    let (first, last) = calendar::month_bounds(year, month).ok_or_else(unknown_month)?;
    let month_name = calendar::month_name(month).ok_or_else(unknown_month)?;
    let num_days = calendar::days_in_month(year, month).ok_or_else(unknown_month)?;
    let start_day = calendar::first_weekday(year, month).ok_or_else(unknown_month)?;

    let (assignments, schedules) = web::block(move || -> Result<_, ApiError> {
        let mut conn = pool.get()?;
        let assignments = Assignment::find_due_on_days(&mut conn, identity.id, first, last)?;
        let schedules = Schedule::find_active_between(&mut conn, identity.id, first, last)?;
        Ok((assignments, schedules))
    })
    .await??;

    let weights = calendar::combined_weights(year, month, &assignments, &schedules)
        .ok_or_else(unknown_month)?;

    Ok(HttpResponse::Ok().json(MonthView {
        year,
        month,
        month_name,
        num_days,
        start_day,
        weights,
    }))
}

#[get("/day/{month}/{day}")]
async fn day_page(
    path: web::Path<(u32, u32)>,
    config: web::Data<Config>,
    pool: web::Data<Pool>,
    identity: LoggedUser,
) -> Result<HttpResponse, ApiError> {
    let year = config.calendar_year;
    let (month, day) = path.into_inner();

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ApiError::not_found("No such day"))?;
    let month_name = calendar::month_name(month).ok_or_else(unknown_month)?;

    let (assignments, schedules) = web::block(move || -> Result<_, ApiError> {
        let mut conn = pool.get()?;
        let assignments = Assignment::find_due_on_days(&mut conn, identity.id, date, date)?;
        let schedules = Schedule::find_active_between(&mut conn, identity.id, date, date)?;
        Ok((assignments, schedules))
    })
    .await??;

    Ok(HttpResponse::Ok().json(DayView {
        year,
        month,
        day,
        month_name,
        day_name: calendar::weekday_name(date),
        weight: calendar::day_weight(date, &assignments, &schedules),
        assignments,
        schedules,
    }))
}

pub fn calendar_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(year_page);
    cfg.service(month_page);
    cfg.service(day_page);
}
