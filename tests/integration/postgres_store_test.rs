//! PostgreSQL record store tests
//!
//! Skipped unless `TEST_DATABASE_URL` is set.

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use serial_test::serial;

use admissions_api::models::{AdminLead, ContactMessage, NewsPost};
use admissions_api::PortalError;

use crate::helpers::TestDatabase;

fn lead(email: &str) -> AdminLead {
    AdminLead {
        name: "Asha".to_string(),
        phone: "9876543210".to_string(),
        email: email.to_string(),
        program: "BSc".to_string(),
    }
}

fn post(title: &str) -> NewsPost {
    NewsPost {
        title: title.to_string(),
        description: "desc".to_string(),
        image: format!("/uploads/{title}.png"),
    }
}

#[tokio::test]
#[serial]
async fn test_pg_insert_and_list_newest_first() {
    let Some(db) = TestDatabase::from_env().await else {
        return;
    };
    let store = db.store();

    store.admins.insert(lead("a@example.com")).await.unwrap();
    db.clock.advance(Duration::seconds(5));
    store.admins.insert(lead("b@example.com")).await.unwrap();

    let all = store.admins.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].doc.email, "b@example.com");
    assert!(all[0].created_at >= all[1].created_at);
}

#[tokio::test]
#[serial]
async fn test_pg_unique_email() {
    let Some(db) = TestDatabase::from_env().await else {
        return;
    };
    let store = db.store();

    store.admins.insert(lead("dup@example.com")).await.unwrap();
    let err = store.admins.insert(lead("dup@example.com")).await.unwrap_err();

    assert_matches!(err, PortalError::ConstraintViolation(_));
    assert_eq!(store.admins.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_pg_month_window() {
    let Some(db) = TestDatabase::from_env().await else {
        return;
    };
    let store = db.store();
    let message = ContactMessage {
        name: "Ravi".to_string(),
        email: "ravi@example.com".to_string(),
        subject: "Fees".to_string(),
        message: "What is the fee structure?".to_string(),
    };

    db.clock.set(Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap());
    store.messages.insert(message.clone()).await.unwrap();
    db.clock.set(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    store.messages.insert(message.clone()).await.unwrap();
    db.clock.set(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    store.messages.insert(message).await.unwrap();

    let february = store.messages.list_by_month(2024, 2).await.unwrap();
    assert_eq!(february.len(), 1);
    assert_eq!(february[0].created_at, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
}

#[tokio::test]
#[serial]
async fn test_pg_news_recent_find_and_delete() {
    let Some(db) = TestDatabase::from_env().await else {
        return;
    };
    let store = db.store();

    let mut ids = Vec::new();
    for i in 0..7 {
        db.clock.advance(Duration::minutes(1));
        ids.push(store.news.insert(post(&format!("p{i}"))).await.unwrap().id);
    }

    let recent = store.news.list_recent(5).await.unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].doc.title, "p6");

    let found = store.news.find_by_id(ids[0]).await.unwrap();
    assert_eq!(found.doc.title, "p0");

    store.news.delete_by_id(ids[0]).await.unwrap();
    assert_matches!(store.news.find_by_id(ids[0]).await, Err(PortalError::NotFound(_)));
    assert_matches!(store.news.delete_by_id(ids[0]).await, Err(PortalError::NotFound(_)));
}

#[tokio::test]
#[serial]
async fn test_pg_health_check() {
    let Some(db) = TestDatabase::from_env().await else {
        return;
    };

    assert!(db.store().health_check().await.is_ok());
}
