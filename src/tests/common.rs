use crate::db::{DbConnection, Pool};
use crate::schema::{assignment, assignment_schedule, schedule, user};
use diesel::prelude::*;

//***** Helper Macros *****//

/// Builds the full application around `$pool`, with a fixed session key and
/// the default configuration unless one is given.
macro_rules! test_app {
    ($pool:expr) => {
        test_app!($pool, crate::config::Config::default())
    };
    ($pool:expr, $config:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new($config))
                .wrap(crate::session_service(&[7; 32], false))
                .configure(crate::routes),
        )
        .await
    };
}

/// Signs up `$name` and returns the identity cookie.
macro_rules! signup {
    ($app:expr, $name:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/signup")
            .set_json(&serde_json::json!({ "name": $name, "password": "hunter2" }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "auth")
            .expect("an identity cookie")
            .into_owned();
        cookie
    }};
}

macro_rules! get_json {
    ($app:expr, $cookie:expr, $uri:expr) => {{
        let req = actix_web::test::TestRequest::get()
            .uri($uri)
            .cookie($cookie.clone())
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert!(resp.status().is_success(), "GET {} failed with {}", $uri, resp.status());
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body
    }};
}

macro_rules! post_json {
    ($app:expr, $cookie:expr, $uri:expr, $body:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .cookie($cookie.clone())
            .set_json(&$body)
            .to_request();
        actix_web::test::call_service(&$app, req).await
    }};
}

//***** Helper Methods *****//

#[derive(Debug, PartialEq)]
pub struct RowCounts {
    pub users: i64,
    pub assignments: i64,
    pub schedules: i64,
    pub links: i64,
}

pub fn count_rows(pool: &Pool) -> RowCounts {
    let mut pooled = pool.get().expect("a pooled connection");
    let conn: &mut DbConnection = &mut pooled;

    RowCounts {
        users: user::table.count().get_result(conn).unwrap(),
        assignments: assignment::table.count().get_result(conn).unwrap(),
        schedules: schedule::table.count().get_result(conn).unwrap(),
        links: assignment_schedule::table
            .count()
            .get_result(conn)
            .unwrap(),
    }
}

pub fn assignment_body(title: &str, due: &str, weight: Option<i32>) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "due": due,
        "weight": weight,
        "description": "",
    })
}

pub fn schedule_body(
    title: &str,
    start_date: &str,
    end_date: &str,
    weight: Option<i32>,
    assignments: &[i64],
) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "start_date": start_date,
        "end_date": end_date,
        "start_time": "09:00:00",
        "end_time": "11:00:00",
        "weight": weight,
        "assignments": assignments,
    })
}
