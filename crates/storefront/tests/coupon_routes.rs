mod common;

use axum::{body::Body, http::Request};
use chrono::{Duration, Utc};
use common::{TestApp, admin_cookie, customer_cookie};
use serde_json::{Value, json};
use storefront::model::Coupon;
use uuid::Uuid;

fn coupon(code: &str, ends_in_days: i64) -> Coupon {
    let now = Utc::now();
    Coupon {
        id: Uuid::new_v4(),
        code: code.into(),
        discount_percent: 20,
        start_date: now - Duration::days(30),
        end_date: now + Duration::days(ends_in_days),
        usage_limit: 50,
        usage_count: 3,
        created_at: now,
    }
}

fn request(method: &str, uri: &str, cookie: String, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("cookie", cookie);

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn list_reports_status_per_coupon() {
    let app = TestApp::new();
    app.coupons.seed(coupon("LIVE10", 5));
    app.coupons.seed(coupon("OLD5", -1));

    let (status, body) = app
        .send(request("GET", "/api/coupon", admin_cookie(), None))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let list = body["couponList"].as_array().unwrap();
    assert_eq!(list.len(), 2);

    let status_of = |code: &str| {
        list.iter()
            .find(|c| c["code"] == code)
            .map(|c| c["status"].clone())
            .unwrap()
    };
    assert_eq!(status_of("LIVE10"), "Active");
    assert_eq!(status_of("OLD5"), "Expired");
    assert_eq!(list[0]["discountPercent"], 20);
    assert_eq!(list[0]["usageCount"], 3);
}

#[tokio::test]
async fn coupons_are_admin_only() {
    let app = TestApp::new();

    let (status, _) = app
        .send(request("GET", "/api/coupon", customer_cookie(), None))
        .await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn create_then_duplicate_conflicts() {
    let app = TestApp::new();
    let now = Utc::now();
    let payload = json!({
        "code": "SUMMER25",
        "discountPercent": 25,
        "startDate": now.to_rfc3339(),
        "endDate": (now + Duration::days(10)).to_rfc3339(),
        "usageLimit": 100
    });

    let (status, body) = app
        .send(request("POST", "/api/coupon", admin_cookie(), Some(payload.clone())))
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Coupon created successfully!");
    assert_eq!(body["coupon"]["code"], "SUMMER25");
    assert_eq!(body["coupon"]["usageCount"], 0);
    assert_eq!(body["coupon"]["status"], "Active");

    let (status, body) = app
        .send(request("POST", "/api/coupon", admin_cookie(), Some(payload)))
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_rejects_inverted_window() {
    let app = TestApp::new();
    let now = Utc::now();
    let payload = json!({
        "code": "BACKWARDS",
        "discountPercent": 10,
        "startDate": now.to_rfc3339(),
        "endDate": (now - Duration::days(1)).to_rfc3339(),
        "usageLimit": 1
    });

    let (status, body) = app
        .send(request("POST", "/api/coupon", admin_cookie(), Some(payload)))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "End date must be after start date");
}

#[tokio::test]
async fn create_rejects_blank_code() {
    let app = TestApp::new();
    let now = Utc::now();
    let payload = json!({
        "code": "   ",
        "discountPercent": 10,
        "startDate": now.to_rfc3339(),
        "endDate": (now + Duration::days(1)).to_rfc3339(),
        "usageLimit": 1
    });

    let (status, body) = app
        .send(request("POST", "/api/coupon", admin_cookie(), Some(payload)))
        .await;
    assert_eq!(status, 400);
    assert!(body["message"].as_str().unwrap().contains("Code is required"));
    assert!(app.coupons.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_existing_then_missing() {
    let app = TestApp::new();
    let seeded = coupon("GONE", 3);
    let id = seeded.id;
    app.coupons.seed(seeded);

    let uri = format!("/api/coupon/{id}");
    let (status, body) = app
        .send(request("DELETE", &uri, admin_cookie(), None))
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Coupon deleted successfully!" })
    );

    let (status, body) = app
        .send(request("DELETE", &uri, admin_cookie(), None))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_with_malformed_id_is_a_bad_request() {
    let app = TestApp::new();

    let (status, _) = app
        .send(request("DELETE", "/api/coupon/42", admin_cookie(), None))
        .await;
    assert_eq!(status, 400);
}
