//! Integration tests for the admin listings

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};

use crate::helpers::{admin_lead_payload, applicant_payload, contact_message_payload, TestApp};

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = TestApp::new();

    for (i, email) in ["first@example.com", "second@example.com", "third@example.com"].iter().enumerate() {
        app.clock.advance(Duration::minutes(i as i64 + 1));
        let response = app.post_json("/admins", None, &admin_lead_payload(email)).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let token = app.login().await;
    let response = app.get("/admins", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let emails: Vec<&str> = response
        .as_array()
        .iter()
        .map(|record| record["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["third@example.com", "second@example.com", "first@example.com"]);
}

#[tokio::test]
async fn test_listed_records_carry_id_and_created_at() {
    let app = TestApp::new();
    app.post_json("/users", None, &applicant_payload()).await;

    let token = app.login().await;
    let response = app.get("/users", Some(&token)).await;

    let record = &response.as_array()[0];
    assert!(record["id"].is_string());
    assert_eq!(record["createdAt"], "2024-03-15T10:00:00Z");
    assert_eq!(record["dob"], "2006-08-21");
    assert!(record["fullName"].is_string());
}

#[tokio::test]
async fn test_empty_listing_is_empty_array() {
    let app = TestApp::new();
    let token = app.login().await;

    let response = app.get("/messages", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.as_array().is_empty());
}

#[tokio::test]
async fn test_month_listing_uses_half_open_bounds() {
    let app = TestApp::new();

    let instants = [
        Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
    ];
    for at in instants {
        app.at(at);
        app.post_json("/messages", None, &contact_message_payload()).await;
    }

    let token = app.login().await;
    let response = app.get("/messages/2024/2", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let created: Vec<&str> = response
        .as_array()
        .iter()
        .map(|record| record["createdAt"].as_str().unwrap())
        .collect();
    assert_eq!(created, vec!["2024-02-29T23:59:59Z", "2024-02-01T00:00:00Z"]);
}

#[tokio::test]
async fn test_december_rolls_into_next_year() {
    let app = TestApp::new();

    app.at(Utc.with_ymd_and_hms(2023, 12, 31, 18, 0, 0).unwrap());
    app.post_json("/admins", None, &admin_lead_payload("dec@example.com")).await;
    app.at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    app.post_json("/admins", None, &admin_lead_payload("jan@example.com")).await;

    let token = app.login().await;
    let december = app.get("/admins/2023/12", Some(&token)).await;
    let january = app.get("/admins/2024/1", Some(&token)).await;

    assert_eq!(december.as_array().len(), 1);
    assert_eq!(december.as_array()[0]["email"], "dec@example.com");
    assert_eq!(january.as_array().len(), 1);
    assert_eq!(january.as_array()[0]["email"], "jan@example.com");
}

#[tokio::test]
async fn test_month_with_no_records_is_empty() {
    let app = TestApp::new();
    app.post_json("/users", None, &applicant_payload()).await;

    let token = app.login().await;
    let response = app.get("/users/2019/7", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.as_array().is_empty());
}

#[tokio::test]
async fn test_invalid_month_is_rejected() {
    let app = TestApp::new();
    let token = app.login().await;

    for uri in ["/admins/2024/13", "/admins/2024/0", "/users/2024/abc", "/messages/year/1"] {
        let response = app.get(uri, Some(&token)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response.error_kind(), Some("InvalidInput"), "{uri}");
    }
}

#[tokio::test]
async fn test_month_listing_requires_token() {
    let app = TestApp::new();

    let response = app.get("/admins/2024/3", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
