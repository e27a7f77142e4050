use super::common::*;
use crate::config::Config;
use crate::db;
use actix_web::http::StatusCode;
use actix_web::test;

#[actix_rt::test]
async fn year_lists_every_month() {
    let pool = db::test_pool();
    let app = test_app!(pool);
    let ada = signup!(app, "ada");

    let year = get_json!(app, ada, "/year");
    assert_eq!(year["year"], 2024);
    assert_eq!(year["months"].as_object().unwrap().len(), 12);
    assert_eq!(year["months"]["1"], "January");
    assert_eq!(year["months"]["12"], "December");
}

#[actix_rt::test]
async fn month_combines_assignment_and_schedule_weights() {
    let pool = db::test_pool();
    let app = test_app!(pool);
    let ada = signup!(app, "ada");
    let grace = signup!(app, "grace");

    for (title, due, weight) in [
        ("Essay", "2024-03-05T23:59:00", Some(3)),
        ("Quiz", "2024-03-05T08:00:00", None),
        ("Lab report", "2024-03-20T09:00:00", Some(4)),
        ("Next month", "2024-04-05T09:00:00", Some(50)),
    ] {
        let resp = post_json!(app, ada, "/add", assignment_body(title, due, weight));
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    let body = schedule_body("Study", "2024-03-04", "2024-03-06", Some(2), &[]);
    let resp = post_json!(app, ada, "/newSchedule", body);
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = assignment_body("Not mine", "2024-03-05T10:00:00", Some(100));
    let resp = post_json!(app, grace, "/add", body);
    assert_eq!(resp.status(), StatusCode::CREATED);

    let month = get_json!(app, ada, "/month/3");
    assert_eq!(month["month_name"], "March");
    assert_eq!(month["num_days"], 31);
    // 2024-03-01 was a Friday.
    assert_eq!(month["start_day"], 5);

    let weights = month["weights"].as_object().unwrap();
    assert_eq!(weights.len(), 31);
    assert_eq!(weights["3"], 0);
    assert_eq!(weights["4"], 2);
    assert_eq!(weights["5"], 5);
    assert_eq!(weights["6"], 2);
    assert_eq!(weights["7"], 0);
    assert_eq!(weights["20"], 4);
}

#[actix_rt::test]
async fn month_boundaries_do_not_leak() {
    let pool = db::test_pool();
    let app = test_app!(pool);
    let ada = signup!(app, "ada");

    let body = schedule_body("Exams", "2024-01-30", "2024-02-02", Some(4), &[]);
    let resp = post_json!(app, ada, "/newSchedule", body);
    assert_eq!(resp.status(), StatusCode::CREATED);

    let january = get_json!(app, ada, "/month/1");
    assert_eq!(january["weights"]["1"], 0);
    assert_eq!(january["weights"]["2"], 0);
    assert_eq!(january["weights"]["30"], 4);
    assert_eq!(january["weights"]["31"], 4);

    let february = get_json!(app, ada, "/month/2");
    assert_eq!(february["num_days"], 29);
    assert_eq!(february["weights"]["1"], 4);
    assert_eq!(february["weights"]["2"], 4);
    assert_eq!(february["weights"]["3"], 0);
    assert_eq!(february["weights"]["29"], 0);

    let march = get_json!(app, ada, "/month/3");
    assert!(march["weights"]
        .as_object()
        .unwrap()
        .values()
        .all(|w| w == 0));
}

#[actix_rt::test]
async fn day_shows_what_falls_on_it() {
    let pool = db::test_pool();
    let app = test_app!(pool);
    let ada = signup!(app, "ada");

    let body = assignment_body("Essay", "2024-03-05T23:59:00", Some(3));
    let resp = post_json!(app, ada, "/add", body);
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = assignment_body("Lab report", "2024-03-06T00:00:00", Some(9));
    let resp = post_json!(app, ada, "/add", body);
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = schedule_body("Study", "2024-03-04", "2024-03-05", Some(2), &[]);
    let resp = post_json!(app, ada, "/newSchedule", body);
    assert_eq!(resp.status(), StatusCode::CREATED);

    let day = get_json!(app, ada, "/day/3/5");
    assert_eq!(day["month_name"], "March");
    assert_eq!(day["day_name"], "Tuesday");
    assert_eq!(day["day"], 5);
    assert_eq!(day["weight"], 5);
    assert_eq!(day["assignments"].as_array().unwrap().len(), 1);
    assert_eq!(day["assignments"][0]["title"], "Essay");
    assert_eq!(day["schedules"][0]["title"], "Study");

    let day = get_json!(app, ada, "/day/3/6");
    assert_eq!(day["day_name"], "Wednesday");
    assert_eq!(day["weight"], 9);
    assert_eq!(day["schedules"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
async fn unknown_dates_are_not_found() {
    let pool = db::test_pool();
    let app = test_app!(pool);
    let ada = signup!(app, "ada");

    for uri in ["/month/0", "/month/13", "/day/2/30", "/day/13/1", "/day/4/31"] {
        let req = test::TestRequest::get().uri(uri).cookie(ada.clone()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {}", uri);
    }
}

#[actix_rt::test]
async fn views_follow_the_configured_year() {
    let pool = db::test_pool();
    let config = Config {
        calendar_year: 2025,
        ..Config::default()
    };
    let app = test_app!(pool, config);
    let ada = signup!(app, "ada");

    let body = schedule_body("Study", "2025-03-01", "2025-03-02", Some(2), &[]);
    let resp = post_json!(app, ada, "/newSchedule", body);
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = schedule_body("Last year", "2024-03-01", "2024-03-02", Some(7), &[]);
    let resp = post_json!(app, ada, "/newSchedule", body);
    assert_eq!(resp.status(), StatusCode::CREATED);

    let year = get_json!(app, ada, "/year");
    assert_eq!(year["year"], 2025);

    let march = get_json!(app, ada, "/month/3");
    assert_eq!(march["year"], 2025);
    assert_eq!(march["num_days"], 31);
    // 2025-03-01 is a Saturday.
    assert_eq!(march["start_day"], 6);
    assert_eq!(march["weights"]["1"], 2);
    assert_eq!(march["weights"]["2"], 2);
    assert_eq!(march["weights"]["3"], 0);

    let february = get_json!(app, ada, "/month/2");
    assert_eq!(february["num_days"], 28);

    let day = get_json!(app, ada, "/day/3/1");
    assert_eq!(day["year"], 2025);
    assert_eq!(day["day_name"], "Saturday");
    assert_eq!(day["weight"], 2);

    let req = test::TestRequest::get().uri("/day/2/29").cookie(ada).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn deleted_account_cookie_sees_empty_views() {
    let pool = db::test_pool();
    let app = test_app!(pool);
    let ada = signup!(app, "ada");

    let resp = post_json!(app, ada, "/delete_account", serde_json::json!({}));
    assert_eq!(resp.status(), StatusCode::OK);

    let grace = signup!(app, "grace");
    let body = assignment_body("Essay", "2024-03-05T23:59:00", Some(3));
    let resp = post_json!(app, grace, "/add", body);
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = schedule_body("Study", "2024-03-04", "2024-03-06", Some(2), &[]);
    let resp = post_json!(app, grace, "/newSchedule", body);
    assert_eq!(resp.status(), StatusCode::CREATED);

    let march = get_json!(app, ada, "/month/3");
    assert!(march["weights"]
        .as_object()
        .unwrap()
        .values()
        .all(|w| w == 0));

    let day = get_json!(app, ada, "/day/3/5");
    assert_eq!(day["weight"], 0);
    assert_eq!(day["assignments"], serde_json::json!([]));
    assert_eq!(day["schedules"], serde_json::json!([]));

    let day = get_json!(app, grace, "/day/3/5");
    assert_eq!(day["weight"], 5);
}
